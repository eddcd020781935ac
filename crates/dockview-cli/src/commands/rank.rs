use crate::cli::RankArgs;
use crate::config::PartialConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use crate::utils::table;
use dockview::{
    core::io::{export::CsvExport, sdf::SdfFile, traits::RankingWriter},
    engine::{
        progress::ProgressReporter,
        rescoring::{TableRescorer, apply_rescorer},
    },
    workflows,
};
use std::fs::File;
use std::io::BufReader;
use tracing::{info, warn};

pub fn run(args: RankArgs, show_progress: bool) -> Result<()> {
    let partial_config = PartialConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    info!("Reading ligand poses from {:?}", &args.input);
    let mut reader = BufReader::new(File::open(&args.input)?);

    let progress_handler = if show_progress {
        CliProgressHandler::new()
    } else {
        CliProgressHandler::hidden()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let mut result = workflows::review::run(&mut reader, &config, &reporter).map_err(|e| {
        CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        }
    })?;
    drop(reporter);

    if let Some(path) = &args.rescores {
        info!("Attaching {} results from {:?}", args.rescore_tool, path);
        let rescorer = TableRescorer::load(args.rescore_tool.as_str(), path)
            .map_err(|e| CliError::FileParsing {
                path: path.clone(),
                source: e.into(),
            })?;
        let summary = apply_rescorer(&mut result.ranking, &rescorer);
        println!(
            "Rescoring ({}): {} attached, {} without result.",
            args.rescore_tool, summary.rescored, summary.failed
        );
    }

    let stats = result.stats;
    println!(
        "Read {} ligand(s): {} skipped, {} filtered out, {} ranked ({} without score).",
        stats.read + stats.skipped,
        stats.skipped,
        stats.filtered_out,
        result.ranking.len(),
        stats.unknown_scores
    );
    if stats.truncated {
        println!(
            "Note: only the first {} entries were loaded (see --max-ligands).",
            config.max_ligands
        );
    }

    if result.ranking.is_empty() {
        warn!("No ligands left to rank.");
        println!("Warning: no ligands left to rank.");
    } else {
        print!("\n{}", table::ranking_table(&result.ranking, args.top));
        if let Some(best) = result.ranking.best() {
            println!(
                "\n✓ Best ligand: {} ({:.2}, {} ranking)",
                best.name,
                best.score_value().unwrap_or_default(),
                config.direction
            );
        }
    }

    if let Some(path) = &args.output {
        CsvExport::write_to_path(&result.ranking, path).map_err(|e| CliError::FileParsing {
            path: path.clone(),
            source: e.into(),
        })?;
        println!("Ranking written to: {}", path.display());
    }

    if let Some(path) = &args.sdf_out {
        SdfFile::write_to_path(&result.ranking, path).map_err(|e| CliError::FileParsing {
            path: path.clone(),
            source: e.into(),
        })?;
        println!("Ranked poses written to: {}", path.display());
    }

    Ok(())
}
