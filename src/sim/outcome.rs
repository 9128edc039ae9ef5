use crate::market::Site;
use crate::Percent;

/// the answer: estimated percentage per site for the real candidate,
/// sorted descending, sites never drawn kept at zero. sums to 100
/// when every trial placed the candidate somewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome(Vec<(Site, Percent)>);

impl Outcome {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (Site, Percent)> + '_ {
        self.0.iter().copied()
    }
    pub fn share(&self, site: Site) -> Percent {
        self.0
            .iter()
            .find(|(s, _)| *s == site)
            .map(|(_, p)| *p)
            .unwrap_or(0.)
    }
    pub fn total(&self) -> Percent {
        self.0.iter().map(|(_, p)| p).sum()
    }
}

/// site-indexed percentages in, descending order out; percentage ties
/// break by site index so equal seeds render identically
impl From<Vec<Percent>> for Outcome {
    fn from(shares: Vec<Percent>) -> Self {
        let mut ranked = shares
            .into_iter()
            .enumerate()
            .map(|(site, share)| (Site::from(site), share))
            .collect::<Vec<(Site, Percent)>>();
        ranked.sort_by(|(s1, p1), (s2, p2)| p2.total_cmp(p1).then(s1.cmp(s2)));
        Self(ranked)
    }
}
