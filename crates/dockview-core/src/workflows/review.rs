use crate::core::descriptors;
use crate::core::io::sdf::{SdfEntry, SdfFile};
use crate::core::models::ligand::LigandRecord;
use crate::core::scoring::extractor::ScoreExtractor;
use crate::core::scoring::ranking::Ranking;
use crate::engine::config::ReviewConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::io::BufRead;
use tracing::{debug, info, instrument, warn};

/// Counts describing what happened to the input batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewStats {
    /// Entries turned into records.
    pub read: usize,
    /// Entries that could not be parsed.
    pub skipped: usize,
    /// Records removed by the property filter.
    pub filtered_out: usize,
    /// Ranked records without a score.
    pub unknown_scores: usize,
    /// Whether the ligand cap stopped reading early.
    pub truncated: bool,
}

#[derive(Debug, Clone)]
pub struct ReviewResult {
    pub ranking: Ranking,
    pub stats: ReviewStats,
}

/// Turns a parsed entry into a scored ligand record.
pub fn build_record(entry: SdfEntry, extractor: &ScoreExtractor) -> LigandRecord {
    let score = extractor.extract(&entry.properties, entry.comment.as_deref());
    let descriptors = descriptors::compute(&entry.atoms, &entry.bonds, &entry.properties);
    let name = entry.name();

    LigandRecord::new(entry.index, name, entry.block)
        .with_score(score)
        .with_descriptors(descriptors)
        .with_properties(entry.properties)
        .with_comment(entry.comment)
}

#[instrument(skip_all, name = "review_workflow")]
pub fn run(
    reader: &mut impl BufRead,
    config: &ReviewConfig,
    reporter: &ProgressReporter,
) -> Result<ReviewResult, EngineError> {
    let mut stats = ReviewStats::default();

    // === Stage 1: Parse ===
    reporter.report(Progress::StageStart { name: "Parse" });
    let batch = SdfFile::read_with_limit(reader, Some(config.max_ligands))?;
    for skipped in &batch.skipped {
        warn!("Skipping entry {}: {}", skipped.index + 1, skipped.reason);
    }
    if batch.truncated {
        warn!(
            "Stopped after {} entries; raise the ligand cap to load more.",
            config.max_ligands
        );
        reporter.report(Progress::Message(format!(
            "Loaded the first {} entries only",
            config.max_ligands
        )));
    }
    stats.skipped = batch.skipped.len();
    stats.truncated = batch.truncated;
    info!(
        "Parsed {} entries ({} skipped).",
        batch.entries.len(),
        stats.skipped
    );
    reporter.report(Progress::StageFinish);

    // === Stage 2: Score ===
    reporter.report(Progress::StageStart { name: "Score" });
    reporter.report(Progress::RecordsStart {
        total: batch.entries.len() as u64,
    });
    let extractor = ScoreExtractor::new(config.score_keys.clone());
    let mut records = Vec::with_capacity(batch.entries.len());
    for entry in batch.entries {
        let record = build_record(entry, &extractor);
        match &record.score {
            Some(score) => debug!("'{}' scored {} ({})", record.name, score.value, score.source),
            None => debug!("'{}' has no score", record.name),
        }
        records.push(record);
        reporter.report(Progress::RecordDone);
    }
    reporter.report(Progress::RecordsFinish);
    stats.read = records.len();
    reporter.report(Progress::StageFinish);

    // === Stage 3: Filter ===
    reporter.report(Progress::StageStart { name: "Filter" });
    let before = records.len();
    records.retain(|record| match config.filter.check(record) {
        Ok(()) => true,
        Err(rejection) => {
            debug!("Filtered out '{}': {}", record.name, rejection);
            false
        }
    });
    stats.filtered_out = before - records.len();
    if stats.filtered_out > 0 {
        info!("Property filter removed {} record(s).", stats.filtered_out);
    }
    reporter.report(Progress::StageFinish);

    // === Stage 4: Rank ===
    reporter.report(Progress::StageStart { name: "Rank" });
    let ranking = Ranking::new(records, config.direction);
    stats.unknown_scores = ranking.unknown_count();
    reporter.report(Progress::StageFinish);

    info!(
        "Review complete: {} ranked, {} without score.",
        ranking.len(),
        stats.unknown_scores
    );
    Ok(ReviewResult { ranking, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ligand::ScoreSource;
    use crate::core::scoring::ranking::SortDirection;
    use crate::engine::config::ReviewConfigBuilder;
    use crate::engine::filter::LigandFilter;

    fn entry(title: &str, comment: &str, data: &[(&str, &str)]) -> String {
        let mut text = format!(
            "{}\n  prog\n{}\n  2  1  0  0  0  0  0  0  0  0999 V2000\n\
             \x20   0.0000    0.0000    0.0000 C   0  0\n\
             \x20   1.5000    0.0000    0.0000 O   0  0\n  1  2  1  0\nM  END\n",
            title, comment
        );
        for (key, value) in data {
            text.push_str(&format!("> <{}>\n{}\n\n", key, value));
        }
        text.push_str("$$$$\n");
        text
    }

    fn batch() -> String {
        [
            entry("A", "", &[("docking_score", "-7.2")]),
            entry("B", "", &[("affinity", "-9.1"), ("XLogP", "6.2")]),
            entry("C", "", &[("note", "none")]),
            entry("D", "energy -7.2 kcal/mol", &[]),
        ]
        .concat()
    }

    #[test]
    fn ranks_batch_with_unknown_scores_last() {
        let result = run(
            &mut batch().as_bytes(),
            &ReviewConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        let names: Vec<&str> = result.ranking.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "D", "C"]);
        assert_eq!(
            result.stats,
            ReviewStats {
                read: 4,
                skipped: 0,
                filtered_out: 0,
                unknown_scores: 1,
                truncated: false,
            }
        );
        let d = result.ranking.get(2).unwrap();
        assert_eq!(d.score.as_ref().map(|s| &s.source), Some(&ScoreSource::Comment));
    }

    #[test]
    fn records_carry_descriptors_and_properties() {
        let result = run(
            &mut batch().as_bytes(),
            &ReviewConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap();
        let b = result.ranking.best().unwrap();
        assert_eq!(b.name, "B");
        assert_eq!(b.descriptors.logp, Some(6.2));
        let mw = b.descriptors.molecular_weight.unwrap();
        // C-O with its four implicit hydrogens
        assert!((mw - (12.011 + 15.999 + 4.0 * 1.008)).abs() < 1e-9);
        assert_eq!(b.properties.len(), 2);
    }

    #[test]
    fn filter_and_direction_are_applied() {
        let config = ReviewConfigBuilder::new()
            .direction(SortDirection::Descending)
            .filter(LigandFilter::drug_like())
            .build()
            .unwrap();
        let result = run(&mut batch().as_bytes(), &config, &ProgressReporter::new()).unwrap();

        let names: Vec<&str> = result.ranking.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "D", "C"]);
        assert_eq!(result.stats.filtered_out, 1);
    }

    #[test]
    fn ligand_cap_truncates_the_batch() {
        let config = ReviewConfigBuilder::new().max_ligands(2).build().unwrap();
        let result = run(&mut batch().as_bytes(), &config, &ProgressReporter::new()).unwrap();
        assert_eq!(result.ranking.len(), 2);
        assert!(result.stats.truncated);
    }

    #[test]
    fn custom_priority_changes_the_winning_key() {
        let text = entry("X", "", &[("docking_score", "-5.0"), ("affinity", "-8.5")]);
        let config = ReviewConfigBuilder::new()
            .score_keys(["affinity", "docking_score"])
            .build()
            .unwrap();
        let result = run(&mut text.as_bytes(), &config, &ProgressReporter::new()).unwrap();
        assert_eq!(result.ranking.get(0).and_then(|r| r.score_value()), Some(-8.5));
    }
}
