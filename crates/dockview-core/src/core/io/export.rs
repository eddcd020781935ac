use super::traits::RankingWriter;
use crate::core::models::ligand::LigandRecord;
use crate::core::scoring::ranking::Ranking;
use serde::Serialize;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One row of the tabular export. Unknown values serialise as empty cells.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    rank: usize,
    index: usize,
    name: &'a str,
    score: Option<f64>,
    score_source: Option<String>,
    molecular_weight: Option<f64>,
    logp: Option<f64>,
    rescore_tool: Option<&'a str>,
    rescore: Option<f64>,
}

impl<'a> ExportRow<'a> {
    fn new(rank: usize, record: &'a LigandRecord) -> Self {
        Self {
            rank,
            index: record.index,
            name: &record.name,
            score: record.score_value(),
            score_source: record.score.as_ref().map(|s| s.source.to_string()),
            molecular_weight: record.descriptors.molecular_weight,
            logp: record.descriptors.logp,
            rescore_tool: record.rescore().map(|r| r.tool.as_str()),
            rescore: record.rescore().map(|r| r.value),
        }
    }
}

/// CSV export of a ranking, one row per record in rank order (ranks are 1-based).
pub struct CsvExport;

impl RankingWriter for CsvExport {
    type Error = ExportError;

    fn write_to(ranking: &Ranking, writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for (position, record) in ranking.iter().enumerate() {
            csv_writer.serialize(ExportRow::new(position + 1, record))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
