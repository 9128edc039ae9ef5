//! Tabular inputs for one simulated match year.
//!
//! Site names are interned to dense indices on load so the hot loops in
//! sampling and matching never touch a string. A [`Market`] bundles one
//! year's roster, priority counts, and capacities after validation; a
//! [`History`] keys markets by year and is the serde boundary of the crate.

mod capacities;
mod history;
mod market;
mod priorities;
mod site;

pub use capacities::*;
pub use history::*;
pub use market::*;
pub use priorities::*;
pub use site::*;
