use super::matrix::Matrix;
use super::program::Program;
use super::program::Relation;
use super::program::Var;
use crate::market::Capacities;
use crate::market::Site;
use crate::sample::Cohort;
use crate::Error;
use crate::Utility;

/// pareto-improving probability exchange anchored on an RSD baseline.
///
/// a candidate whose r-th choice (0-based) is site s values a unit of
/// probability there at (n - r)^2, so top choices dominate. the trade
/// maximizes total utility over all candidate×site probabilities
/// subject to nobody ending below their baseline utility, every row
/// summing to one, and every column staying within capacity.
pub struct Trader<'a> {
    cohort: &'a Cohort,
    capacities: &'a Capacities,
}

impl<'a> From<(&'a Cohort, &'a Capacities)> for Trader<'a> {
    fn from((cohort, capacities): (&'a Cohort, &'a Capacities)) -> Self {
        Self { cohort, capacities }
    }
}

impl Trader<'_> {
    pub fn improved(&self, baseline: &Matrix) -> Result<Matrix, Error> {
        let k = self.cohort.len();
        let n = self.capacities.len();
        if baseline.rows() != k || baseline.cols() != n {
            return Err(Error::internal(format!(
                "baseline is {}x{} but cohort is {}x{}",
                baseline.rows(),
                baseline.cols(),
                k,
                n
            )));
        }
        let weights = self.weights();
        let anchors = (0..k)
            .map(|c| {
                (0..n)
                    .map(|s| baseline.at(c, s) * weights.at(c, s))
                    .sum::<Utility>()
            })
            .collect::<Vec<Utility>>();
        let mut lp = Program::maximize();
        let vars = (0..k)
            .map(|c| {
                (0..n)
                    .map(|s| lp.var(weights.at(c, s), (0., 1.)))
                    .collect::<Vec<Var>>()
            })
            .collect::<Vec<Vec<Var>>>();
        // individual rationality: no candidate trades below baseline
        for c in 0..k {
            let terms = (0..n)
                .map(|s| (vars[c][s], weights.at(c, s)))
                .collect::<Vec<_>>();
            lp.constrain(&terms, Relation::Ge, anchors[c]);
        }
        // row stochasticity: every candidate lands somewhere
        for c in 0..k {
            let terms = (0..n).map(|s| (vars[c][s], 1.)).collect::<Vec<_>>();
            lp.constrain(&terms, Relation::Eq, 1.);
        }
        // column capacity
        for s in 0..n {
            let terms = (0..k).map(|c| (vars[c][s], 1.)).collect::<Vec<_>>();
            lp.constrain(&terms, Relation::Le, self.capacities.of(Site::from(s)) as f64);
        }
        let valuation = lp.solve()?;
        let mut traded = Matrix::zeros(k, n);
        for c in 0..k {
            for s in 0..n {
                traded.set(c, s, valuation.value(vars[c][s]));
            }
        }
        self.summarize(baseline, &traded);
        Ok(traded)
    }

    /// squared-rank utility weights: entry (c, s) is (n - rank)^2
    fn weights(&self) -> Matrix {
        let k = self.cohort.len();
        let n = self.capacities.len();
        let mut weights = Matrix::zeros(k, n);
        for (c, prefs) in self.cohort.rows().enumerate() {
            for (r, site) in prefs.iter().enumerate() {
                let weight = (n - r) as Utility;
                weights.set(c, usize::from(site), weight * weight);
            }
        }
        weights
    }

    /// average probability of obtaining the k-th choice, before and
    /// after the trade
    fn summarize(&self, baseline: &Matrix, traded: &Matrix) {
        let k = self.cohort.len();
        let before = baseline.ranked(self.cohort);
        let after = traded.ranked(self.cohort);
        for choice in 0..5.min(self.capacities.len()) {
            let b = (0..k).map(|c| before.at(c, choice)).sum::<f64>() / k as f64;
            let a = (0..k).map(|c| after.at(c, choice)).sum::<f64>() / k as f64;
            log::debug!("choice {}: {:.3} -> {:.3}", choice + 1, b, a);
        }
    }
}
