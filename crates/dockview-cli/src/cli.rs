use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "DockView Developers",
    version,
    about = "DockView CLI - Review docking pose batches: extract scores, filter, rank and export ligands, and estimate binding sites.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank the ligands of an SDF batch by docking score.
    Rank(RankArgs),
    /// Show the details and property table of one ligand.
    Show(ShowArgs),
    /// Estimate a docking box from receptor residues or a protein profile.
    Site(SiteArgs),
}

/// Arguments for the `rank` subcommand.
#[derive(Args, Debug)]
pub struct RankArgs {
    // --- Core Arguments ---
    /// Path to the input ligand pose file (SDF).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the ranking as CSV to this path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the ranked poses, best first, as SDF to this path.
    #[arg(long, value_name = "PATH")]
    pub sdf_out: Option<PathBuf>,

    // --- Scoring Overrides ---
    /// Property name recognised as a score, in priority order.
    /// Repeat to give several; replaces the configured list.
    #[arg(short = 'k', long = "score-key", value_name = "NAME")]
    pub score_keys: Vec<String>,

    /// Rank highest scores first instead of lowest.
    #[arg(long)]
    pub descending: bool,

    // --- Filter and Display Overrides ---
    /// Apply drug-like bounds (MW <= 800, logP <= 5, -15 <= score <= 0) on top of
    /// any configured filter values.
    #[arg(long)]
    pub drug_like: bool,

    /// Maximum number of entries to load from the input file.
    #[arg(short = 'm', long, value_name = "INT")]
    pub max_ligands: Option<usize>,

    /// Number of ranked ligands to print.
    #[arg(short = 'n', long, value_name = "INT", default_value_t = 20)]
    pub top: usize,

    // --- Rescoring ---
    /// CSV table (`name,score`) of rescoring results to attach to the ranking.
    #[arg(long, value_name = "PATH")]
    pub rescores: Option<PathBuf>,

    /// Tool name recorded with the attached rescoring results.
    #[arg(long, value_name = "NAME", default_value = "vina")]
    pub rescore_tool: String,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S display.max-ligands=500
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Path to the input ligand pose file (SDF).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Name of the ligand to show (the title line, or `Ligand_<n>`).
    #[arg(short, long, required = true)]
    pub name: String,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Property name recognised as a score, in priority order.
    #[arg(short = 'k', long = "score-key", value_name = "NAME")]
    pub score_keys: Vec<String>,

    /// Also print the structure block.
    #[arg(long)]
    pub block: bool,
}

/// Arguments for the `site` subcommand.
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .multiple(true)
        .args(["protein", "profile"])
))]
pub struct SiteArgs {
    /// Path to the receptor structure (PDB).
    #[arg(short, long, value_name = "PATH")]
    pub protein: Option<PathBuf>,

    /// Residues defining the site: a range such as `200-249` or a list such as `219,262,275`.
    #[arg(short, long, value_name = "SELECTION")]
    pub residues: Option<String>,

    /// Buffer in Angstroms added to the coordinate range on every axis.
    #[arg(short, long, value_name = "FLOAT")]
    pub buffer: Option<f64>,

    /// Identifier of a protein profile (e.g. a PDB code).
    #[arg(long, value_name = "ID", requires = "profiles")]
    pub profile: Option<String>,

    /// Path to the protein profile registry (TOML).
    #[arg(long, value_name = "PATH")]
    pub profiles: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
