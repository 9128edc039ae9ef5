use super::prefs::Prefs;
use crate::market::Market;
use crate::market::Site;
use crate::Probability;
use rand::rngs::SmallRng;
use rand::Rng;

/// draws whole preference lists distributed like the empirical
/// ranking behavior in a year's priority table.
///
/// each rank column is normalized once into a categorical
/// distribution; a draw walks the columns in order, renormalizing
/// over the still-available sites, so the rank-1 draw follows the
/// rank-1 marginal and later draws follow the conditional marginal
/// restricted to whatever is left. an all-zero restricted column
/// falls back to a uniform pick.
pub struct Sampler {
    columns: Vec<Vec<Probability>>,
}

impl From<&Market> for Sampler {
    fn from(market: &Market) -> Self {
        let priorities = market.priorities();
        let columns = (0..priorities.ranks())
            .map(|rank| priorities.column(rank))
            .map(|counts| {
                let total = counts.iter().sum::<Probability>();
                match total > 0. {
                    true => counts.iter().map(|c| c / total).collect(),
                    false => counts.to_vec(),
                }
            })
            .collect();
        Self { columns }
    }
}

impl Sampler {
    /// one full permutation of the market's sites
    pub fn draw(&self, rng: &mut SmallRng) -> Prefs {
        let n = self.columns.first().map(Vec::len).unwrap_or(0);
        let mut available = (0..n).collect::<Vec<usize>>();
        let mut out = Vec::with_capacity(n);
        for column in self.columns.iter() {
            if available.is_empty() {
                break;
            }
            let choice = self.choose(column, &available, rng);
            out.push(Site::from(available.swap_remove(choice)));
        }
        // any positions beyond the table's deepest rank are filled
        // in uniform random order
        while !available.is_empty() {
            let choice = rng.random_range(0..available.len());
            out.push(Site::from(available.swap_remove(choice)));
        }
        Prefs::from(out)
    }

    /// index into `available` of the next pick: weighted by the rank
    /// column when it has mass on the remaining sites, uniform otherwise
    fn choose(&self, column: &[Probability], available: &[usize], rng: &mut SmallRng) -> usize {
        use rand::distr::weighted::WeightedIndex;
        use rand::distr::Distribution;
        let weights = available
            .iter()
            .map(|&s| column[s])
            .collect::<Vec<Probability>>();
        match weights.iter().sum::<Probability>() > 0. {
            true => WeightedIndex::new(&weights)
                .expect("positive mass on remaining sites")
                .sample(rng),
            false => rng.random_range(0..available.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::Capacities;
    use crate::market::Priorities;
    use crate::market::Roster;
    use crate::Arbitrary;

    fn market(rows: Vec<Vec<Option<f64>>>) -> Market {
        let n = rows.len();
        let names = (0..n).map(|i| format!("site-{}", i)).collect::<Vec<_>>();
        Market::new(
            Roster::try_from(names).unwrap(),
            Priorities::try_from(rows).unwrap(),
            Capacities::from(vec![1; n]),
        )
        .unwrap()
    }

    #[test]
    fn permutation() {
        let market = Market::random();
        let sampler = Sampler::from(&market);
        let ref mut rng = crate::stream(0, 0);
        for _ in 0..64 {
            assert!(sampler.draw(rng).permutes(market.size()));
        }
    }

    #[test]
    fn degenerate_columns_are_deterministic() {
        // each rank column puts all mass on one site
        let market = market(vec![
            vec![Some(10.), Some(0.), Some(0.)],
            vec![Some(0.), Some(10.), Some(0.)],
            vec![Some(0.), Some(0.), Some(10.)],
        ]);
        let sampler = Sampler::from(&market);
        let ref mut rng = crate::stream(7, 0);
        for _ in 0..32 {
            let prefs = sampler.draw(rng);
            assert_eq!(prefs.site(0), Site::from(0));
            assert_eq!(prefs.site(1), Site::from(1));
            assert_eq!(prefs.site(2), Site::from(2));
        }
    }

    #[test]
    fn zero_column_falls_back_to_uniform() {
        // rank 1 pins site 0; ranks 2 and 3 have no observations, so
        // both orderings of the remaining pair should show up
        let market = market(vec![
            vec![Some(10.), Some(0.), Some(0.)],
            vec![Some(0.), Some(0.), Some(0.)],
            vec![Some(0.), Some(0.), Some(0.)],
        ]);
        let sampler = Sampler::from(&market);
        let ref mut rng = crate::stream(11, 0);
        let mut orders = std::collections::BTreeSet::new();
        for _ in 0..256 {
            let prefs = sampler.draw(rng);
            assert_eq!(prefs.site(0), Site::from(0));
            orders.insert((prefs.site(1), prefs.site(2)));
        }
        assert_eq!(orders.len(), 2);
    }

    #[test]
    fn shallow_tables_fill_the_tail() {
        // two rank columns for four sites: the last two positions
        // come from the uniform tail
        let market = market(vec![
            vec![Some(1.), Some(1.)],
            vec![Some(1.), Some(1.)],
            vec![Some(1.), Some(1.)],
            vec![Some(1.), Some(1.)],
        ]);
        let sampler = Sampler::from(&market);
        let ref mut rng = crate::stream(3, 0);
        for _ in 0..32 {
            assert!(sampler.draw(rng).permutes(4));
        }
    }

    #[test]
    fn first_rank_tracks_the_marginal() {
        // site 0 drew 90% of rank-1 requests; its empirical share of
        // first positions should land near that
        let market = market(vec![
            vec![Some(90.), Some(5.)],
            vec![Some(10.), Some(5.)],
        ]);
        let sampler = Sampler::from(&market);
        let ref mut rng = crate::stream(17, 0);
        let trials = 2000;
        let hits = (0..trials)
            .map(|_| sampler.draw(rng))
            .filter(|p| p.site(0) == Site::from(0))
            .count();
        let share = hits as f64 / trials as f64;
        assert!((share - 0.9).abs() < 0.03, "share {}", share);
    }

    #[test]
    fn reproducibility() {
        let market = Market::random();
        let sampler = Sampler::from(&market);
        let a = sampler.draw(&mut crate::stream(5, 1));
        let b = sampler.draw(&mut crate::stream(5, 1));
        assert_eq!(a, b);
    }
}
