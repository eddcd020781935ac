use thiserror::Error;

use super::config::ConfigError;
use super::rescoring::RescoreError;
use crate::core::io::export::ExportError;
use crate::core::io::pdb::PdbError;
use crate::core::io::sdf::SdfError;
use crate::core::profiles::ProfileLoadError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Failed to read ligand poses: {source}")]
    Sdf {
        #[from]
        source: SdfError,
    },

    #[error("Failed to read receptor: {source}")]
    Pdb {
        #[from]
        source: PdbError,
    },

    #[error("Export failed: {source}")]
    Export {
        #[from]
        source: ExportError,
    },

    #[error("Rescoring failed: {source}")]
    Rescore {
        #[from]
        source: RescoreError,
    },

    #[error("Protein profile error: {source}")]
    Profile {
        #[from]
        source: ProfileLoadError,
    },

    #[error("Unknown protein profile '{0}'")]
    UnknownProfile(String),
}
