use thiserror::Error;

/// everything that can go wrong between loading tables and
/// reading off percentages. validation problems surface before
/// the first trial; anything raised mid-run aborts the run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("capacity exhausted: {0}")]
    Capacity(String),

    #[error("optimization failed: {0}")]
    Optimization(String),

    #[error("cancelled before any trial completed")]
    Cancelled,

    #[error("internal invariant broken: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }
    pub fn capacity(reason: impl Into<String>) -> Self {
        Self::Capacity(reason.into())
    }
    pub fn optimization(reason: impl Into<String>) -> Self {
        Self::Optimization(reason.into())
    }
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal(reason.into())
    }
}
