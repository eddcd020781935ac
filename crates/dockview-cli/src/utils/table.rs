use dockview::core::models::ligand::LigandRecord;
use dockview::core::scoring::ranking::Ranking;
use std::fmt::Write;

const NAME_WIDTH: usize = 24;

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", precision, v))
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let kept: String = name.chars().take(width - 1).collect();
        format!("{}…", kept)
    }
}

/// The first `top` records of a ranking as an aligned text table.
pub fn ranking_table(ranking: &Ranking, top: usize) -> String {
    let with_rescore = ranking.iter().any(|r| r.rescore().is_some());
    let mut out = String::new();

    let _ = write!(
        out,
        "{:>4}  {:<name$}  {:>8}  {:<22}  {:>8}  {:>6}",
        "Rank",
        "Name",
        "Score",
        "Source",
        "MW",
        "LogP",
        name = NAME_WIDTH
    );
    if with_rescore {
        let _ = write!(out, "  {:>10}", "Rescore");
    }
    out.push('\n');

    for (position, record) in ranking.iter().take(top).enumerate() {
        let source = record
            .score
            .as_ref()
            .map_or_else(|| "-".to_string(), |s| s.source.to_string());
        let _ = write!(
            out,
            "{:>4}  {:<name$}  {:>8}  {:<22}  {:>8}  {:>6}",
            position + 1,
            truncate(&record.name, NAME_WIDTH),
            fmt_opt(record.score_value(), 2),
            truncate(&source, 22),
            fmt_opt(record.descriptors.molecular_weight, 1),
            fmt_opt(record.descriptors.logp, 2),
            name = NAME_WIDTH
        );
        if with_rescore {
            let _ = write!(out, "  {:>10}", fmt_opt(record.rescore().map(|r| r.value), 2));
        }
        out.push('\n');
    }

    if ranking.len() > top {
        let _ = writeln!(out, "  ... {} more", ranking.len() - top);
    }
    out
}

/// Score, descriptors and every property of one record.
pub fn record_details(record: &LigandRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name:        {}", record.name);
    let _ = writeln!(out, "Index:       {}", record.index + 1);
    match &record.score {
        Some(score) => {
            let _ = writeln!(out, "Score:       {} ({})", score.value, score.source);
        }
        None => {
            let _ = writeln!(out, "Score:       unknown");
        }
    }
    let _ = writeln!(
        out,
        "MW:          {}",
        fmt_opt(record.descriptors.molecular_weight, 2)
    );
    let _ = writeln!(out, "LogP:        {}", fmt_opt(record.descriptors.logp, 2));
    if let Some(comment) = &record.comment {
        let _ = writeln!(out, "Comment:     {}", comment);
    }

    if record.properties.is_empty() {
        let _ = writeln!(out, "Properties:  none");
        return out;
    }
    let key_width = record
        .properties
        .iter()
        .map(|(k, _)| k.chars().count())
        .max()
        .unwrap_or(0);
    let _ = writeln!(out, "Properties:");
    for (key, value) in record.properties.iter() {
        let text = value.to_string().replace('\n', " | ");
        let _ = writeln!(out, "  {:<width$}  {}", key, text, width = key_width);
    }
    out
}
