use super::site::Site;
use crate::Count;
use crate::Error;

/// integer capacity per site, derived by summing each site's
/// per-rank acceptance counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capacities(Vec<usize>);

impl Capacities {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn of(&self, site: Site) -> usize {
        self.0[usize::from(site)]
    }
    /// cohort size downstream: one seat per unit of capacity
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
    /// mutable working copy for greedy assignment loops
    pub fn remaining(&self) -> Vec<usize> {
        self.0.clone()
    }
}

impl From<Vec<usize>> for Capacities {
    fn from(caps: Vec<usize>) -> Self {
        Self(caps)
    }
}

/// built from site-major rows of per-rank acceptance counts,
/// summed and truncated to whole seats. missing entries are zero.
impl TryFrom<Vec<Vec<Option<Count>>>> for Capacities {
    type Error = Error;
    fn try_from(rows: Vec<Vec<Option<Count>>>) -> Result<Self, Error> {
        if rows.is_empty() {
            return Err(Error::config("capacity table has no sites"));
        }
        let mut caps = Vec::with_capacity(rows.len());
        for (s, row) in rows.iter().enumerate() {
            let sum = row
                .iter()
                .map(|cell| cell.unwrap_or(0.))
                .map(|count| if count.is_nan() { 0. } else { count })
                .sum::<Count>();
            if sum < 0. {
                return Err(Error::config(format!("negative capacity at site {}", s)));
            }
            caps.push(sum as usize);
        }
        Ok(Self(caps))
    }
}
