use crate::market::Roster;
use crate::market::Site;
use crate::Error;

/// one candidate's ordered preference list. always a permutation of
/// the year's sites: position 0 is the most preferred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefs(Vec<Site>);

impl Prefs {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// the site at a 0-based rank position
    pub fn site(&self, rank: usize) -> Site {
        self.0[rank]
    }
    /// the 0-based rank position of a site, if ranked
    pub fn rank(&self, site: Site) -> Option<usize> {
        self.0.iter().position(|&s| s == site)
    }
    pub fn iter(&self) -> impl Iterator<Item = Site> + '_ {
        self.0.iter().copied()
    }

    /// whether this list covers exactly the sites 0..n with no repeats
    pub fn permutes(&self, n: usize) -> bool {
        let mut seen = vec![false; n];
        self.0.len() == n
            && self
                .0
                .iter()
                .all(|&s| usize::from(s) < n && !std::mem::replace(&mut seen[usize::from(s)], true))
    }

    /// validate a candidate's list of site names against a roster.
    /// names must be distinct and known; a list shorter than the
    /// roster is completed with the missing sites in roster order,
    /// ranking them below every listed one.
    pub fn from_names(roster: &Roster, names: &[String]) -> Result<Self, Error> {
        let mut sites = Vec::with_capacity(roster.len());
        for name in names {
            let site = roster
                .site(name)
                .ok_or_else(|| Error::config(format!("unknown site '{}'", name)))?;
            if sites.contains(&site) {
                return Err(Error::config(format!("site '{}' listed twice", name)));
            }
            sites.push(site);
        }
        let remaining: Vec<Site> = roster.sites().filter(|s| !sites.contains(s)).collect();
        sites.extend(remaining);
        Ok(Self(sites))
    }
}

impl From<Vec<Site>> for Prefs {
    fn from(sites: Vec<Site>) -> Self {
        Self(sites)
    }
}

impl std::fmt::Display for Prefs {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "[{}]",
            self.0
                .iter()
                .map(|s| format!("{}", s))
                .collect::<Vec<_>>()
                .join(" > ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        let names = ["a", "b", "c", "d"].map(String::from).to_vec();
        Roster::try_from(names).unwrap()
    }

    #[test]
    fn full_list() {
        let names = ["d", "c", "b", "a"].map(String::from).to_vec();
        let prefs = Prefs::from_names(&roster(), &names).unwrap();
        assert!(prefs.permutes(4));
        assert_eq!(prefs.site(0), Site::from(3));
        assert_eq!(prefs.rank(Site::from(0)), Some(3));
    }

    #[test]
    fn short_list_is_completed() {
        let names = ["c".to_string()];
        let prefs = Prefs::from_names(&roster(), &names).unwrap();
        assert!(prefs.permutes(4));
        assert_eq!(prefs.site(0), Site::from(2));
        // missing sites follow in roster order
        assert_eq!(prefs.site(1), Site::from(0));
        assert_eq!(prefs.site(2), Site::from(1));
        assert_eq!(prefs.site(3), Site::from(3));
    }

    #[test]
    fn unknown_name() {
        let names = ["z".to_string()];
        assert!(Prefs::from_names(&roster(), &names).is_err());
    }

    #[test]
    fn repeated_name() {
        let names = ["a", "a"].map(String::from).to_vec();
        assert!(Prefs::from_names(&roster(), &names).is_err());
    }

    #[test]
    fn permutation_check() {
        assert!(Prefs::from(vec![Site::from(1), Site::from(0)]).permutes(2));
        assert!(!Prefs::from(vec![Site::from(0), Site::from(0)]).permutes(2));
        assert!(!Prefs::from(vec![Site::from(0)]).permutes(2));
        assert!(!Prefs::from(vec![Site::from(2), Site::from(0)]).permutes(2));
    }
}
