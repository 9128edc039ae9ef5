//! Cohort resolution.
//!
//! [`Deferred`] runs tie-aware deferred acceptance where a site ranks
//! its proposers by the rank they assigned to it, breaking intra-rank
//! ties by lottery. [`Dictator`] estimates assignment probabilities by
//! repeated random serial dictatorship. Both respect site capacities
//! and consume per-trial PRNG streams.

mod assignment;
mod deferred;
mod dictator;

pub use assignment::*;
pub use deferred::*;
pub use dictator::*;
