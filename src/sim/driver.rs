use super::outcome::Outcome;
use super::progress::Abort;
use super::progress::Ticker;
use super::settings::Method;
use super::settings::Settings;
use crate::market::Market;
use crate::matching::Deferred;
use crate::matching::Dictator;
use crate::sample::Cohort;
use crate::sample::Prefs;
use crate::trade::Trader;
use crate::Error;
use crate::Percent;
use crate::Seed;
use rand::Rng;

/// the monte carlo driver: repeat independent trials and aggregate
/// where the real candidate landed.
///
/// each trial owns everything it touches. its seed is derived from
/// the master seed by trial index, so runs are reproducible and the
/// trial order is immaterial. cancellation is observed between
/// trials: a run stopped after at least one completed trial returns
/// the partial aggregate, a run stopped before any returns
/// [`Error::Cancelled`].
pub struct Simulation<'a> {
    market: &'a Market,
    settings: Settings,
}

impl<'a> Simulation<'a> {
    pub fn new(market: &'a Market, settings: Settings) -> Result<Self, Error> {
        settings.validate()?;
        Ok(Self { market, settings })
    }

    pub fn run(
        &self,
        candidate: &Prefs,
        ticker: Option<&Ticker>,
        abort: Option<&Abort>,
    ) -> Result<Outcome, Error> {
        if !candidate.permutes(self.market.size()) {
            return Err(Error::config(format!(
                "candidate list must be a permutation of the {} sites",
                self.market.size()
            )));
        }
        let master = self.settings.seed.unwrap_or_else(|| rand::rng().random());
        log::info!(
            "simulating {} {} trials over {} sites, cohorts of {} (seed {})",
            self.settings.trials,
            self.settings.method,
            self.market.size(),
            self.market.capacities().total(),
            master,
        );
        match self.settings.method {
            Method::Da => self.tally(candidate, master, ticker, abort),
            Method::RsdTrade => self.average(candidate, master, ticker, abort),
        }
    }

    /// DA path: count which site the candidate drew in each trial
    fn tally(
        &self,
        candidate: &Prefs,
        master: Seed,
        ticker: Option<&Ticker>,
        abort: Option<&Abort>,
    ) -> Result<Outcome, Error> {
        let mut counts = vec![0usize; self.market.size()];
        let mut completed = 0;
        for trial in 0..self.settings.trials {
            if abort.map(Abort::cancelled).unwrap_or(false) {
                log::warn!("cancelled after {} of {} trials", completed, self.settings.trials);
                break;
            }
            let seed: Seed = crate::stream(master, trial).random();
            let cohort = Cohort::assemble(self.market, candidate.clone(), seed);
            let matching = Deferred::from((&cohort, self.market.capacities()))
                .matching(&mut crate::stream(seed, 0));
            if let Some(site) = matching.site(0) {
                counts[usize::from(site)] += 1;
            }
            completed += 1;
            if let Some(ticker) = ticker {
                ticker.tick(completed as f64 / self.settings.trials as f64);
            }
        }
        let shares = counts
            .into_iter()
            .map(|c| c as Percent)
            .collect::<Vec<Percent>>();
        Self::normalize(shares, completed)
    }

    /// RSD+trade path: average the candidate's traded probability row
    fn average(
        &self,
        candidate: &Prefs,
        master: Seed,
        ticker: Option<&Ticker>,
        abort: Option<&Abort>,
    ) -> Result<Outcome, Error> {
        let mut sums = vec![0.; self.market.size()];
        let mut completed = 0;
        for trial in 0..self.settings.trials {
            if abort.map(Abort::cancelled).unwrap_or(false) {
                log::warn!("cancelled after {} of {} trials", completed, self.settings.trials);
                break;
            }
            let seed: Seed = crate::stream(master, trial).random();
            let cohort = Cohort::assemble(self.market, candidate.clone(), seed);
            let inner: Seed = crate::stream(seed, 0).random();
            let baseline = Dictator::from((&cohort, self.market.capacities()))
                .iterations(self.settings.rsd_iterations)
                .probabilities(inner);
            let traded = Trader::from((&cohort, self.market.capacities())).improved(&baseline)?;
            for (site, sum) in sums.iter_mut().enumerate() {
                *sum += traded.at(0, site);
            }
            completed += 1;
            if let Some(ticker) = ticker {
                ticker.tick(completed as f64 / self.settings.trials as f64);
            }
        }
        Self::normalize(sums, completed)
    }

    /// divide accumulated shares by completed trials and scale to 100
    fn normalize(shares: Vec<Percent>, completed: usize) -> Result<Outcome, Error> {
        match completed {
            0 => Err(Error::Cancelled),
            trials => Ok(Outcome::from(
                shares
                    .into_iter()
                    .map(|s| s * 100. / trials as Percent)
                    .collect::<Vec<Percent>>(),
            )),
        }
    }
}
