use super::capacities::Capacities;
use super::market::Market;
use super::priorities::Priorities;
use super::site::Roster;
use crate::Count;
use crate::Error;
use serde::Deserialize;
use std::collections::BTreeMap;

/// raw serde shape of one year's tables before validation.
/// `priorities[s]` is site s's rank-1..R count row and
/// `acceptances[s]` its per-rank acceptance counts; nulls
/// stand in for missing cells.
#[derive(Debug, Clone, Deserialize)]
pub struct Table {
    pub sites: Vec<String>,
    pub priorities: Vec<Vec<Option<Count>>>,
    pub acceptances: Vec<Vec<Option<Count>>>,
}

impl TryFrom<Table> for Market {
    type Error = Error;
    fn try_from(table: Table) -> Result<Self, Error> {
        Market::new(
            Roster::try_from(table.sites)?,
            Priorities::try_from(table.priorities)?,
            Capacities::try_from(table.acceptances)?,
        )
    }
}

/// every year we know about, validated up front so a bad table
/// fails at load rather than mid-simulation
#[derive(Debug, Clone)]
pub struct History(BTreeMap<u16, Market>);

impl History {
    pub fn year(&self, year: u16) -> Result<&Market, Error> {
        self.0
            .get(&year)
            .ok_or_else(|| Error::config(format!("unknown year {}", year)))
    }
    pub fn years(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.keys().copied()
    }

    /// deserialize a year → table JSON document
    pub fn load(path: &std::path::Path) -> Result<Self, Error> {
        let file = std::fs::File::open(path)
            .map_err(|e| Error::config(format!("cannot open {}: {}", path.display(), e)))?;
        let tables: BTreeMap<u16, Table> = serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|e| Error::config(format!("cannot parse {}: {}", path.display(), e)))?;
        Self::try_from(tables)
    }

    /// default candidate order: sites ranked by how often they were
    /// anyone's first priority, summed across all years, breaking
    /// count ties by name
    pub fn favorites(&self) -> Vec<String> {
        let mut totals: BTreeMap<&str, Count> = BTreeMap::new();
        for market in self.0.values() {
            let column = market.priorities().column(0);
            for site in market.roster().sites() {
                let name = market.roster().name(site);
                *totals.entry(name).or_insert(0.) += column[usize::from(site)];
            }
        }
        let mut order = totals.into_iter().collect::<Vec<_>>();
        order.sort_by(|(a, x), (b, y)| y.total_cmp(x).then(a.cmp(b)));
        order.into_iter().map(|(name, _)| name.to_string()).collect()
    }
}

impl TryFrom<BTreeMap<u16, Table>> for History {
    type Error = Error;
    fn try_from(tables: BTreeMap<u16, Table>) -> Result<Self, Error> {
        if tables.is_empty() {
            return Err(Error::config("history holds no years"));
        }
        tables
            .into_iter()
            .map(|(year, table)| Market::try_from(table).map(|market| (year, market)))
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"
    {
        "2024": {
            "sites": ["north", "south"],
            "priorities": [[5, 1], [1, 5]],
            "acceptances": [[1, 1], [2, 0]]
        },
        "2023": {
            "sites": ["north", "south"],
            "priorities": [[3, null], [2, 4]],
            "acceptances": [[1, 0], [1, 1]]
        }
    }"#;

    fn history() -> History {
        let tables: BTreeMap<u16, Table> = serde_json::from_str(DOCUMENT).unwrap();
        History::try_from(tables).unwrap()
    }

    #[test]
    fn lookup() {
        let history = history();
        assert_eq!(history.years().collect::<Vec<_>>(), vec![2023, 2024]);
        assert_eq!(history.year(2024).unwrap().capacities().total(), 4);
        assert!(history.year(1999).is_err());
    }

    #[test]
    fn favorites() {
        // north: 5 + 3 = 8 first-priority requests, south: 1 + 2 = 3
        assert_eq!(history().favorites(), vec!["north", "south"]);
    }

    #[test]
    fn nulls_are_zero() {
        let history = history();
        let market = history.year(2023).unwrap();
        assert_eq!(market.priorities().column(1), &[0., 4.]);
    }

    #[test]
    fn rejects_empty() {
        assert!(History::try_from(BTreeMap::new()).is_err());
    }

    #[test]
    fn rejects_malformed() {
        let raw = r#"{"2024": {"sites": ["a", "a"], "priorities": [[1], [1]], "acceptances": [[1], [1]]}}"#;
        let tables: BTreeMap<u16, Table> = serde_json::from_str(raw).unwrap();
        assert!(History::try_from(tables).is_err());
    }
}
