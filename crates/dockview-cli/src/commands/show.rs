use crate::cli::ShowArgs;
use crate::config::PartialConfig;
use crate::error::{CliError, Result};
use crate::utils::table;
use dockview::core::io::sdf::SdfFile;
use dockview::core::io::traits::StructureReader;
use dockview::core::scoring::extractor::ScoreExtractor;
use dockview::core::scoring::priority::ScoreKeyPriority;
use dockview::workflows::review::build_record;
use tracing::info;

pub fn run(args: ShowArgs) -> Result<()> {
    let partial_config = PartialConfig::load(args.config.as_deref())?;
    let priority = match partial_config.score_keys(&args.score_keys) {
        Some(keys) => ScoreKeyPriority::new(keys).map_err(|e| CliError::Config(e.to_string()))?,
        None => ScoreKeyPriority::default(),
    };

    info!("Reading ligand poses from {:?}", &args.input);
    let batch = SdfFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;

    let entry = batch
        .entries
        .into_iter()
        .find(|e| e.name() == args.name)
        .ok_or_else(|| {
            CliError::Argument(format!(
                "No ligand named '{}' in {}",
                args.name,
                args.input.display()
            ))
        })?;

    let record = build_record(entry, &ScoreExtractor::new(priority));
    print!("{}", table::record_details(&record));
    if args.block {
        println!("\n{}", record.structure_block);
    }
    Ok(())
}
