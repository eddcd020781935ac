use crate::core::models::ligand::LigandRecord;
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortDirection {
    /// Lowest score first, the usual order for binding energies.
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!(
                "Invalid sort direction '{}'. Expected 'ascending' or 'descending'.",
                other
            )),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ascending"),
            SortDirection::Descending => write!(f, "descending"),
        }
    }
}

/// Anything that carries an optional numeric score.
pub trait Scored {
    fn score_value(&self) -> Option<f64>;
}

impl Scored for LigandRecord {
    fn score_value(&self) -> Option<f64> {
        LigandRecord::score_value(self)
    }
}

impl<T: Scored + ?Sized> Scored for &T {
    fn score_value(&self) -> Option<f64> {
        (**self).score_value()
    }
}

/// Orders `items` by score in the given direction.
///
/// Items with an unknown score take no part in the comparison: they are appended
/// after every scored item, in input order, whatever the direction. Equal scores
/// keep their input order.
pub fn rank_by_score<T: Scored>(items: Vec<T>, direction: SortDirection) -> Vec<T> {
    let (mut known, unknown): (Vec<T>, Vec<T>) =
        items.into_iter().partition(|item| item.score_value().is_some());

    // `sort_by` is stable, which gives the input-order tie-break.
    known.sort_by(|a, b| {
        let (a, b) = (a.score_value(), b.score_value());
        let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    known.extend(unknown);
    known
}

/// A batch of ligand records in score order.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    direction: SortDirection,
    records: Vec<LigandRecord>,
}

impl Ranking {
    pub fn new(records: Vec<LigandRecord>, direction: SortDirection) -> Self {
        Self {
            direction,
            records: rank_by_score(records, direction),
        }
    }

    /// Re-sorts the current order in `direction`.
    pub fn rerank(self, direction: SortDirection) -> Self {
        Self::new(self.records, direction)
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn records(&self) -> &[LigandRecord] {
        &self.records
    }

    /// Mutable access for attaching rescoring results. The order is not affected
    /// because rescoring never changes [`LigandRecord::score`].
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut LigandRecord> {
        self.records.iter_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LigandRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&LigandRecord> {
        self.records.get(position)
    }

    /// The top record, if it has a known score.
    pub fn best(&self) -> Option<&LigandRecord> {
        self.records.first().filter(|r| r.score_value().is_some())
    }

    /// Zero-based rank of the first record called `name`.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.name == name)
    }

    pub fn known_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.score_value().is_some())
            .count()
    }

    pub fn unknown_count(&self) -> usize {
        self.records.len() - self.known_count()
    }
}
