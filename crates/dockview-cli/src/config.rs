use crate::cli::{RankArgs, SiteArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use dockview::core::scoring::ranking::SortDirection;
use dockview::engine::config::{self as core_config, BindingSiteConfig, ResidueSelection};
use dockview::engine::filter::LigandFilter;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialScoringConfig {
    score_properties: Option<Vec<String>>,
    direction: Option<SortDirection>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialFilterConfig {
    max_mw: Option<f64>,
    max_logp: Option<f64>,
    min_score: Option<f64>,
    max_score: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialDisplayConfig {
    max_ligands: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialBindingSiteConfig {
    residues: Option<Vec<isize>>,
    residue_range: Option<[isize; 2]>,
    buffer: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialConfig {
    scoring: Option<PartialScoringConfig>,
    filters: Option<PartialFilterConfig>,
    display: Option<PartialDisplayConfig>,
    binding_site: Option<PartialBindingSiteConfig>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file when one is given, otherwise starts from an empty layer.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Score keys from the command line, else from the file. `None` means the
    /// built-in list.
    pub fn score_keys(&self, cli_keys: &[String]) -> Option<Vec<String>> {
        if !cli_keys.is_empty() {
            return Some(cli_keys.to_vec());
        }
        self.scoring
            .as_ref()
            .and_then(|s| s.score_properties.clone())
    }

    pub fn merge_with_cli(mut self, args: &RankArgs) -> Result<core_config::ReviewConfig> {
        self.apply_set_values(&args.set_values)?;
        let score_keys = self.score_keys(&args.score_keys);

        let scoring = self.scoring.take().unwrap_or_default();
        let filters = self.filters.take().unwrap_or_default();
        let display = self.display.take().unwrap_or_default();

        let direction = if args.descending {
            SortDirection::Descending
        } else {
            scoring.direction.unwrap_or_default()
        };

        let drug_like = if args.drug_like {
            LigandFilter::drug_like()
        } else {
            LigandFilter::default()
        };
        let filter = LigandFilter {
            max_molecular_weight: filters.max_mw.or(drug_like.max_molecular_weight),
            max_logp: filters.max_logp.or(drug_like.max_logp),
            min_score: filters.min_score.or(drug_like.min_score),
            max_score: filters.max_score.or(drug_like.max_score),
        };

        let mut builder = core_config::ReviewConfigBuilder::new()
            .direction(direction)
            .filter(filter)
            .max_ligands(
                args.max_ligands
                    .or(display.max_ligands)
                    .unwrap_or(core_config::DEFAULT_MAX_LIGANDS),
            );

        if let Some(keys) = score_keys {
            builder = builder.score_keys(keys);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    /// Builds the binding-site settings. The residue selection comes from the
    /// command line, then the profile's key residues, then the file.
    pub fn merge_binding_site(
        mut self,
        args: &SiteArgs,
        profile_residues: Option<&[isize]>,
    ) -> Result<BindingSiteConfig> {
        let file = self.binding_site.take().unwrap_or_default();

        let residues = if let Some(text) = &args.residues {
            parser::parse_residue_selection(text)
                .map_err(|e| CliError::Argument(e.to_string()))?
        } else if let Some(key_residues) = profile_residues.filter(|r| !r.is_empty()) {
            ResidueSelection::List(key_residues.to_vec())
        } else {
            match (file.residues, file.residue_range) {
                (Some(_), Some(_)) => {
                    return Err(CliError::Config(
                        "`binding-site` accepts either `residues` or `residue-range`, not both."
                            .to_string(),
                    ));
                }
                (Some(list), None) => ResidueSelection::List(list),
                (None, Some([start, end])) => ResidueSelection::Range { start, end },
                (None, None) => ResidueSelection::default(),
            }
        };

        let buffer = args
            .buffer
            .or(file.buffer)
            .unwrap_or(core_config::DEFAULT_SITE_BUFFER);

        BindingSiteConfig::new(residues, buffer).map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;
            let value_str = value_str.trim();

            match key.trim() {
                "scoring.score-properties" => {
                    let keys = value_str
                        .split(',')
                        .map(|k| k.trim().to_string())
                        .collect();
                    self.scoring
                        .get_or_insert_with(Default::default)
                        .score_properties = Some(keys);
                }
                "scoring.direction" => {
                    self.scoring.get_or_insert_with(Default::default).direction =
                        Some(parse_value(key, value_str)?);
                }
                "filters.max-mw" => {
                    self.filters.get_or_insert_with(Default::default).max_mw =
                        Some(parse_value(key, value_str)?);
                }
                "filters.max-logp" => {
                    self.filters.get_or_insert_with(Default::default).max_logp =
                        Some(parse_value(key, value_str)?);
                }
                "filters.min-score" => {
                    self.filters.get_or_insert_with(Default::default).min_score =
                        Some(parse_value(key, value_str)?);
                }
                "filters.max-score" => {
                    self.filters.get_or_insert_with(Default::default).max_score =
                        Some(parse_value(key, value_str)?);
                }
                "display.max-ligands" => {
                    self.display.get_or_insert_with(Default::default).max_ligands =
                        Some(parse_value(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid value for {}: {}", key.trim(), value))
    })
}
