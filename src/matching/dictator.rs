use crate::market::Capacities;
use crate::sample::Cohort;
use crate::trade::Matrix;
use crate::Seed;
use rand::seq::SliceRandom;

/// random serial dictatorship: draw a uniform order over the cohort
/// and let each candidate in turn claim the first still-open site on
/// their list. repeating this over many orders estimates a K×N
/// assignment-probability matrix.
///
/// iterations are independent, so they fan out across rayon workers;
/// each one owns a PRNG stream keyed by (seed, iteration) and the
/// integer count matrices merge commutatively, which keeps the
/// estimate bitwise reproducible under any scheduling.
pub struct Dictator<'a> {
    cohort: &'a Cohort,
    capacities: &'a Capacities,
    iterations: usize,
}

impl<'a> From<(&'a Cohort, &'a Capacities)> for Dictator<'a> {
    fn from((cohort, capacities): (&'a Cohort, &'a Capacities)) -> Self {
        Self {
            cohort,
            capacities,
            iterations: crate::DEFAULT_RSD_ITERATIONS,
        }
    }
}

impl Dictator<'_> {
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// estimated probability that each candidate lands at each site
    pub fn probabilities(&self, seed: Seed) -> Matrix {
        use rayon::iter::IntoParallelIterator;
        use rayon::iter::ParallelIterator;
        let k = self.cohort.len();
        let n = self.capacities.len();
        let counts = (0..self.iterations)
            .into_par_iter()
            .map(|i| self.single(seed, i))
            .fold(
                || vec![0u32; k * n],
                |mut counts, placements| {
                    for (candidate, site) in placements.into_iter().enumerate() {
                        if let Some(site) = site {
                            counts[candidate * n + site] += 1;
                        }
                    }
                    counts
                },
            )
            .reduce(
                || vec![0u32; k * n],
                |mut a, b| {
                    a.iter_mut().zip(b).for_each(|(x, y)| *x += y);
                    a
                },
            );
        let t = self.iterations as f64;
        Matrix::from((
            k,
            n,
            counts.into_iter().map(|c| c as f64 / t).collect::<Vec<_>>(),
        ))
    }

    /// one pass of serial dictatorship: per-candidate chosen site index
    fn single(&self, seed: Seed, iteration: usize) -> Vec<Option<usize>> {
        let ref mut rng = crate::stream(seed, iteration);
        let mut order = (0..self.cohort.len()).collect::<Vec<usize>>();
        order.shuffle(rng);
        let mut remaining = self.capacities.remaining();
        let mut placements = vec![None; self.cohort.len()];
        for candidate in order {
            for site in self.cohort.row(candidate).iter() {
                let site = usize::from(site);
                if remaining[site] > 0 {
                    remaining[site] -= 1;
                    placements[candidate] = Some(site);
                    break;
                }
            }
        }
        placements
    }
}
