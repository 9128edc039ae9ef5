use super::assignment::Assignment;
use crate::market::Capacities;
use crate::market::Site;
use crate::sample::Cohort;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;

/// proposer-side deferred acceptance over one cohort.
///
/// every candidate proposes down their own list; a site holds
/// proposers tentatively and, once over capacity, keeps the ones who
/// ranked it best. the site has no opinion of its own beyond that:
/// proposers who assigned it the same rank are separated by a uniform
/// lottery, modelling the lottery in the real match. the order in
/// which unmatched candidates act each round is itself shuffled so a
/// crowded top site produces no ordering artefacts.
pub struct Deferred<'a> {
    cohort: &'a Cohort,
    capacities: &'a Capacities,
}

impl<'a> From<(&'a Cohort, &'a Capacities)> for Deferred<'a> {
    fn from((cohort, capacities): (&'a Cohort, &'a Capacities)) -> Self {
        Self { cohort, capacities }
    }
}

impl Deferred<'_> {
    /// run rounds until no unmatched candidate can still propose.
    /// reported ranks are 1-based.
    pub fn matching(&self, rng: &mut SmallRng) -> Assignment {
        let k = self.cohort.len();
        let n = self.capacities.len();
        let mut cursor = vec![0usize; k];
        let mut held: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
        let mut unmatched = (0..k).collect::<Vec<usize>>();
        while !unmatched.is_empty() {
            unmatched.shuffle(rng);
            for &candidate in unmatched.iter() {
                let list = self.cohort.row(candidate);
                if cursor[candidate] >= list.len() {
                    continue;
                }
                let rank = cursor[candidate];
                let site = list.site(rank);
                cursor[candidate] += 1;
                held[usize::from(site)].push((candidate, rank));
            }
            let mut spilled = Vec::new();
            for site in (0..n).map(Site::from) {
                let capacity = self.capacities.of(site);
                if held[usize::from(site)].len() > capacity {
                    spilled.extend(Self::resolve(&mut held[usize::from(site)], capacity, rng));
                }
            }
            unmatched = spilled;
        }
        let mut slots = vec![None; k];
        for (site, holders) in held.iter().enumerate() {
            for &(candidate, rank) in holders.iter() {
                slots[candidate] = Some((Site::from(site), rank + 1));
            }
        }
        Assignment::from(slots)
    }

    /// cut an over-subscribed site back to capacity. holders are
    /// grouped by the rank they proposed at and accepted best-rank
    /// first; the group straddling the capacity boundary is thinned
    /// by a without-replacement lottery, and every group beyond it
    /// spills entirely. returns the spilled candidates.
    fn resolve(
        holders: &mut Vec<(usize, usize)>,
        capacity: usize,
        rng: &mut SmallRng,
    ) -> Vec<usize> {
        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for &(candidate, rank) in holders.iter() {
            groups.entry(rank).or_default().push(candidate);
        }
        let mut accepted = Vec::with_capacity(capacity);
        let mut rejected = Vec::new();
        let mut remaining = capacity;
        for (rank, group) in groups {
            if remaining == 0 {
                rejected.extend(group);
            } else if group.len() <= remaining {
                remaining -= group.len();
                accepted.extend(group.into_iter().map(|candidate| (candidate, rank)));
            } else {
                let mut kept = vec![false; group.len()];
                for i in rand::seq::index::sample(rng, group.len(), remaining) {
                    kept[i] = true;
                }
                for (i, candidate) in group.into_iter().enumerate() {
                    match kept[i] {
                        true => accepted.push((candidate, rank)),
                        false => rejected.push(candidate),
                    }
                }
                remaining = 0;
            }
        }
        *holders = accepted;
        rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::Market;
    use crate::sample::Prefs;
    use crate::sample::Sampler;
    use crate::Arbitrary;

    fn identity(n: usize) -> Prefs {
        Prefs::from((0..n).map(Site::from).collect::<Vec<Site>>())
    }

    fn cohort(lists: &[&[usize]]) -> Cohort {
        Cohort::from(
            lists
                .iter()
                .map(|l| Prefs::from(l.iter().copied().map(Site::from).collect::<Vec<Site>>()))
                .collect::<Vec<Prefs>>(),
        )
    }

    #[test]
    fn capacities_are_respected() {
        for seed in 0..16 {
            let market = Market::random();
            let candidate = identity(market.size());
            let cohort = Cohort::assemble(&market, candidate, seed);
            let da = Deferred::from((&cohort, market.capacities()));
            let assignment = da.matching(&mut crate::stream(seed, 0));
            for site in market.roster().sites() {
                assert!(assignment.occupancy(site) <= market.capacities().of(site));
            }
        }
    }

    #[test]
    fn everyone_places_when_seats_suffice() {
        for seed in 0..16 {
            let market = Market::random();
            let candidate = identity(market.size());
            let cohort = Cohort::assemble(&market, candidate, seed);
            let da = Deferred::from((&cohort, market.capacities()));
            let assignment = da.matching(&mut crate::stream(seed, 0));
            assert_eq!(assignment.placed(), cohort.len());
        }
    }

    #[test]
    fn ranks_point_back_into_lists() {
        let market = Market::random();
        let cohort = Cohort::assemble(&market, identity(market.size()), 9);
        let da = Deferred::from((&cohort, market.capacities()));
        let assignment = da.matching(&mut crate::stream(9, 0));
        for (c, prefs) in cohort.rows().enumerate() {
            let site = assignment.site(c).expect("placed");
            let rank = assignment.rank(c).expect("placed");
            assert_eq!(prefs.site(rank - 1), site);
        }
    }

    #[test]
    fn uncontested_lists_resolve_exactly() {
        // three seats, three candidates, three disjoint first choices
        let cohort = cohort(&[&[0, 1, 2], &[1, 2, 0], &[2, 0, 1]]);
        let capacities = Capacities::from(vec![1, 1, 1]);
        let da = Deferred::from((&cohort, &capacities));
        let assignment = da.matching(&mut crate::stream(0, 0));
        assert_eq!(assignment.site(0), Some(Site::from(0)));
        assert_eq!(assignment.site(1), Some(Site::from(1)));
        assert_eq!(assignment.site(2), Some(Site::from(2)));
        assert_eq!(assignment.rank(0), Some(1));
    }

    #[test]
    fn better_rank_beats_worse_rank() {
        // sites 0 and 1 have no seats at all. candidate 1 reaches
        // site 2 as their second choice, candidate 0 only as their
        // third: whatever the lottery order, rank 2 beats rank 3.
        let cohort = cohort(&[&[0, 1, 2, 3], &[1, 2, 0, 3]]);
        let capacities = Capacities::from(vec![0, 0, 1, 1]);
        for seed in 0..8 {
            let da = Deferred::from((&cohort, &capacities));
            let assignment = da.matching(&mut crate::stream(seed, 0));
            assert_eq!(assignment.site(1), Some(Site::from(2)));
            assert_eq!(assignment.rank(1), Some(2));
            assert_eq!(assignment.site(0), Some(Site::from(3)));
            assert_eq!(assignment.rank(0), Some(4));
        }
    }

    #[test]
    fn zero_capacity_first_choice_shifts_mass_down() {
        // nobody can land at site 0 even though everyone asks first
        let cohort = cohort(&[&[0, 1, 2], &[0, 2, 1]]);
        let capacities = Capacities::from(vec![0, 1, 1]);
        for seed in 0..8 {
            let da = Deferred::from((&cohort, &capacities));
            let assignment = da.matching(&mut crate::stream(seed, 0));
            assert_eq!(assignment.occupancy(Site::from(0)), 0);
            assert_eq!(assignment.site(0), Some(Site::from(1)));
            assert_eq!(assignment.site(1), Some(Site::from(2)));
            assert_eq!(assignment.rank(0), Some(2));
        }
    }

    #[test]
    fn boundary_group_is_a_fair_lottery() {
        // two identical lists fight over one seat at site 0; over many
        // seeds each should win about half the time
        let cohort = cohort(&[&[0, 1], &[0, 1]]);
        let capacities = Capacities::from(vec![1, 1]);
        let da = Deferred::from((&cohort, &capacities));
        let trials = 2000;
        let wins = (0..trials)
            .filter(|&seed| {
                da.matching(&mut crate::stream(seed, 0)).site(0) == Some(Site::from(0))
            })
            .count();
        let share = wins as f64 / trials as f64;
        assert!((share - 0.5).abs() < 0.05, "share {}", share);
    }

    #[test]
    fn exhausted_lists_stay_unplaced() {
        // two candidates, one seat anywhere: somebody must end unplaced
        let cohort = cohort(&[&[0], &[0]]);
        let capacities = Capacities::from(vec![1]);
        let da = Deferred::from((&cohort, &capacities));
        let assignment = da.matching(&mut crate::stream(1, 0));
        assert_eq!(assignment.placed(), 1);
    }

    #[test]
    fn reproducibility() {
        let market = Market::random();
        let candidate = Sampler::from(&market).draw(&mut crate::stream(8, 0));
        let cohort = Cohort::assemble(&market, candidate, 8);
        let da = Deferred::from((&cohort, market.capacities()));
        let a = da.matching(&mut crate::stream(8, 1));
        let b = da.matching(&mut crate::stream(8, 1));
        assert_eq!(a, b);
    }
}
