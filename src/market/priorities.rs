use crate::Count;
use crate::Error;

/// observed priority counts for one year: entry (s, r) is how many
/// candidates historically ranked site s at position r. stored
/// column-major because the sampler walks one rank column at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Priorities {
    columns: Vec<Vec<Count>>,
}

impl Priorities {
    /// number of rank positions R recorded by the table
    pub fn ranks(&self) -> usize {
        self.columns.len()
    }
    /// number of sites N covered by the table
    pub fn sites(&self) -> usize {
        self.columns.first().map(Vec::len).unwrap_or(0)
    }
    /// the raw count column for a given 0-based rank position
    pub fn column(&self, rank: usize) -> &[Count] {
        &self.columns[rank]
    }
}

/// built from site-major rows, the layout the source tables use.
/// missing entries arrive as None and coerce to zero.
impl TryFrom<Vec<Vec<Option<Count>>>> for Priorities {
    type Error = Error;
    fn try_from(rows: Vec<Vec<Option<Count>>>) -> Result<Self, Error> {
        let n = rows.len();
        if n < 1 {
            return Err(Error::config("priority table has no sites"));
        }
        let r = rows[0].len();
        if r < 1 {
            return Err(Error::config("priority table has no rank columns"));
        }
        if rows.iter().any(|row| row.len() != r) {
            return Err(Error::config("priority table rows have unequal lengths"));
        }
        let mut columns = vec![vec![0.; n]; r];
        for (s, row) in rows.iter().enumerate() {
            for (rank, cell) in row.iter().enumerate() {
                let count = cell.unwrap_or(0.);
                let count = if count.is_nan() { 0. } else { count };
                if count < 0. {
                    return Err(Error::config(format!(
                        "negative priority count at site {} rank {}",
                        s,
                        rank + 1
                    )));
                }
                columns[rank][s] = count;
            }
        }
        Ok(Self { columns })
    }
}
