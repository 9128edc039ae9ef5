use super::prefs::Prefs;
use super::sampler::Sampler;
use crate::market::Market;
use crate::Seed;

/// everyone competing in one simulated match: the real candidate's
/// list at row 0 and one sampled peer per remaining seat, so the
/// cohort exactly fills the market's total capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct Cohort(Vec<Prefs>);

impl Cohort {
    /// peer i draws from its own PRNG stream keyed by (seed, i), so a
    /// cohort is a pure function of the trial seed
    pub fn assemble(market: &Market, candidate: Prefs, seed: Seed) -> Self {
        let k = market.capacities().total();
        let sampler = Sampler::from(market);
        let rows = std::iter::once(candidate)
            .chain((1..k).map(|i| sampler.draw(&mut crate::stream(seed, i))))
            .collect::<Vec<Prefs>>();
        Self(rows)
    }

    /// cohort size K
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// the real candidate's list
    pub fn candidate(&self) -> &Prefs {
        &self.0[0]
    }
    pub fn row(&self, index: usize) -> &Prefs {
        &self.0[index]
    }
    pub fn rows(&self) -> impl Iterator<Item = &Prefs> {
        self.0.iter()
    }
}

impl From<Vec<Prefs>> for Cohort {
    fn from(rows: Vec<Prefs>) -> Self {
        Self(rows)
    }
}
