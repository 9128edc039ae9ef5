//! Pareto-improving probability exchange.
//!
//! The RSD estimate from [`crate::matching::Dictator`] is only a
//! baseline: candidates can trade assignment probability amongst
//! themselves without anyone losing utility. [`Trader`] states that
//! exchange as a linear program over a [`Matrix`] of candidate×site
//! probabilities, built and solved behind the thin [`Program`] wrapper.

mod matrix;
mod program;
mod trader;

pub use matrix::*;
pub use program::*;
pub use trader::*;
