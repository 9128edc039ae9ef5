use super::capacities::Capacities;
use super::priorities::Priorities;
use super::site::Roster;
use crate::Arbitrary;
use crate::Error;

/// one year's matching market: the roster of sites, the historical
/// priority-distribution table, and the capacity table. immutable
/// after construction; every trial borrows it read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    roster: Roster,
    priorities: Priorities,
    capacities: Capacities,
}

impl Market {
    pub fn new(
        roster: Roster,
        priorities: Priorities,
        capacities: Capacities,
    ) -> Result<Self, Error> {
        if priorities.sites() != roster.len() {
            return Err(Error::config(format!(
                "priority table covers {} sites but roster has {}",
                priorities.sites(),
                roster.len()
            )));
        }
        if capacities.len() != roster.len() {
            return Err(Error::config(format!(
                "capacity table covers {} sites but roster has {}",
                capacities.len(),
                roster.len()
            )));
        }
        if capacities.total() < 1 {
            return Err(Error::capacity("total capacity is zero"));
        }
        Ok(Self {
            roster,
            priorities,
            capacities,
        })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn priorities(&self) -> &Priorities {
        &self.priorities
    }
    pub fn capacities(&self) -> &Capacities {
        &self.capacities
    }
    /// number of sites N
    pub fn size(&self) -> usize {
        self.roster.len()
    }
}

impl Arbitrary for Market {
    fn random() -> Self {
        use rand::Rng;
        let ref mut rng = rand::rng();
        let n = rng.random_range(2..=8);
        let r = n;
        let names = (0..n).map(|i| format!("site-{}", i)).collect::<Vec<_>>();
        let rows = (0..n)
            .map(|_| {
                (0..r)
                    .map(|_| Some(rng.random_range(0..20) as f64))
                    .collect()
            })
            .collect::<Vec<Vec<_>>>();
        let caps = (0..n)
            .map(|_| vec![Some(rng.random_range(1..4) as f64)])
            .collect::<Vec<Vec<_>>>();
        Self::new(
            Roster::try_from(names).expect("distinct names"),
            Priorities::try_from(rows).expect("rectangular"),
            Capacities::try_from(caps).expect("non-negative"),
        )
        .expect("consistent dimensions")
    }
}
