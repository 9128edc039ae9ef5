use crate::Error;
use crate::Seed;

/// which resolution procedure a simulation runs per trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Da,
    RsdTrade,
}

impl TryFrom<&str> for Method {
    type Error = Error;
    fn try_from(name: &str) -> Result<Self, Error> {
        match name.to_ascii_lowercase().as_str() {
            "da" => Ok(Self::Da),
            "rsd" | "rsd+trade" => Ok(Self::RsdTrade),
            other => Err(Error::config(format!("unknown method '{}'", other))),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Da => write!(f, "da"),
            Self::RsdTrade => write!(f, "rsd+trade"),
        }
    }
}

/// tuning knobs for one simulation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// number of independent trials M
    pub trials: usize,
    /// per-trial resolution procedure
    pub method: Method,
    /// inner RSD iterations per trial, RSD+trade only
    pub rsd_iterations: usize,
    /// master seed; None draws one from OS entropy
    pub seed: Option<Seed>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trials: crate::DEFAULT_TRIALS,
            method: Method::default(),
            rsd_iterations: crate::DEFAULT_RSD_ITERATIONS,
            seed: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), Error> {
        if self.trials < 1 {
            return Err(Error::config("trials must be positive"));
        }
        if self.rsd_iterations < 1 {
            return Err(Error::config("rsd iterations must be positive"));
        }
        Ok(())
    }
}
