use crate::core::models::ligand::LigandRecord;
use crate::core::scoring::ranking::Ranking;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum RescoreError {
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("No {tool} result for ligand '{name}'")]
    MissingResult { tool: String, name: String },
    #[error("{tool} returned a non-finite score for ligand '{name}'")]
    NonFinite { tool: String, name: String },
}

/// Recomputes the score of one pose with an external scoring tool.
///
/// Implementations wrap whatever produced the numbers (a finished tool run, a
/// cached result table, a stub in tests); launching the tool is not their
/// concern here.
pub trait Rescorer {
    /// Short tool name stored next to each result, e.g. `vina`.
    fn tool_name(&self) -> &str;

    fn rescore(&self, record: &LigandRecord) -> Result<f64, RescoreError>;
}

#[derive(Debug, Deserialize)]
struct TableRow {
    name: String,
    score: f64,
}

/// Rescoring results read from a `name,score` CSV table.
///
/// Records are looked up by ligand name. When a name appears more than once
/// the first row is used.
#[derive(Debug, Clone)]
pub struct TableRescorer {
    tool: String,
    scores: HashMap<String, f64>,
}

impl TableRescorer {
    pub fn new(tool: impl Into<String>, scores: HashMap<String, f64>) -> Self {
        Self {
            tool: tool.into(),
            scores,
        }
    }

    pub fn load(tool: impl Into<String>, path: &Path) -> Result<Self, RescoreError> {
        let to_error = |e: csv::Error| RescoreError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        };
        let reader = csv::Reader::from_path(path).map_err(to_error)?;
        Self::from_csv(tool, reader).map_err(to_error)
    }

    pub fn from_reader(tool: impl Into<String>, reader: impl Read) -> Result<Self, RescoreError> {
        Self::from_csv(tool, csv::Reader::from_reader(reader)).map_err(|e| RescoreError::Csv {
            path: "<reader>".to_string(),
            source: e,
        })
    }

    fn from_csv<R: Read>(
        tool: impl Into<String>,
        mut reader: csv::Reader<R>,
    ) -> Result<Self, csv::Error> {
        let mut scores = HashMap::new();
        for result in reader.deserialize::<TableRow>() {
            let row = result?;
            scores.entry(row.name).or_insert(row.score);
        }
        Ok(Self::new(tool, scores))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl Rescorer for TableRescorer {
    fn tool_name(&self) -> &str {
        &self.tool
    }

    fn rescore(&self, record: &LigandRecord) -> Result<f64, RescoreError> {
        let value =
            self.scores
                .get(&record.name)
                .copied()
                .ok_or_else(|| RescoreError::MissingResult {
                    tool: self.tool.clone(),
                    name: record.name.clone(),
                })?;
        if !value.is_finite() {
            return Err(RescoreError::NonFinite {
                tool: self.tool.clone(),
                name: record.name.clone(),
            });
        }
        Ok(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RescoreSummary {
    pub rescored: usize,
    pub failed: usize,
}

/// Invokes the rescorer once per record of the ranking.
///
/// A success replaces the record's rescoring result; a failure leaves it as it
/// was. The ranking order itself is never changed.
pub fn apply_rescorer(ranking: &mut Ranking, rescorer: &dyn Rescorer) -> RescoreSummary {
    let mut summary = RescoreSummary::default();
    for record in ranking.iter_mut() {
        match rescorer.rescore(record) {
            Ok(value) => {
                debug!("{} rescored '{}': {}", rescorer.tool_name(), record.name, value);
                record.set_rescore(rescorer.tool_name(), value);
                summary.rescored += 1;
            }
            Err(e) => {
                warn!("Rescoring failed for '{}': {}", record.name, e);
                summary.failed += 1;
            }
        }
    }
    summary
}
