use super::filter::LigandFilter;
use crate::core::scoring::priority::{PriorityError, ScoreKeyPriority};
use crate::core::scoring::ranking::SortDirection;
use thiserror::Error;

pub const DEFAULT_MAX_LIGANDS: usize = 1000;
pub const DEFAULT_SITE_RESIDUES: (isize, isize) = (200, 249);
pub const DEFAULT_SITE_BUFFER: f64 = 10.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid score property list: {0}")]
    Priority(#[from] PriorityError),
    #[error("Ligand cap must be at least 1")]
    ZeroLigandCap,
    #[error("Inverted bounds for {field}: minimum {min} is greater than maximum {max}")]
    InvertedBounds {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("Bound for {field} must be finite, got {value}")]
    NonFiniteBound { field: &'static str, value: f64 },
    #[error("Empty residue range {start}..={end}")]
    EmptyResidueRange { start: isize, end: isize },
    #[error("Binding-site buffer must be finite and non-negative, got {0}")]
    InvalidBuffer(f64),
}

/// Residues whose atoms define a binding site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResidueSelection {
    /// Inclusive range of residue numbers.
    Range { start: isize, end: isize },
    List(Vec<isize>),
}

impl ResidueSelection {
    pub fn contains(&self, residue_number: isize) -> bool {
        match self {
            ResidueSelection::Range { start, end } => (*start..=*end).contains(&residue_number),
            ResidueSelection::List(residues) => residues.contains(&residue_number),
        }
    }
}

impl Default for ResidueSelection {
    fn default() -> Self {
        ResidueSelection::Range {
            start: DEFAULT_SITE_RESIDUES.0,
            end: DEFAULT_SITE_RESIDUES.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BindingSiteConfig {
    pub residues: ResidueSelection,
    /// Added to the coordinate range on every axis, in Å.
    pub buffer: f64,
}

impl BindingSiteConfig {
    pub fn new(residues: ResidueSelection, buffer: f64) -> Result<Self, ConfigError> {
        if let ResidueSelection::Range { start, end } = residues {
            if start > end {
                return Err(ConfigError::EmptyResidueRange { start, end });
            }
        }
        if !buffer.is_finite() || buffer < 0.0 {
            return Err(ConfigError::InvalidBuffer(buffer));
        }
        Ok(Self { residues, buffer })
    }
}

impl Default for BindingSiteConfig {
    fn default() -> Self {
        Self {
            residues: ResidueSelection::default(),
            buffer: DEFAULT_SITE_BUFFER,
        }
    }
}

/// Settings for one review run over a pose batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewConfig {
    pub score_keys: ScoreKeyPriority,
    pub direction: SortDirection,
    pub filter: LigandFilter,
    /// Maximum number of entries loaded from the batch.
    pub max_ligands: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            score_keys: ScoreKeyPriority::default(),
            direction: SortDirection::default(),
            filter: LigandFilter::default(),
            max_ligands: DEFAULT_MAX_LIGANDS,
        }
    }
}

#[derive(Default)]
pub struct ReviewConfigBuilder {
    score_keys: Option<Vec<String>>,
    direction: Option<SortDirection>,
    filter: Option<LigandFilter>,
    max_ligands: Option<usize>,
}

impl ReviewConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.score_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }
    pub fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = Some(direction);
        self
    }
    pub fn filter(mut self, filter: LigandFilter) -> Self {
        self.filter = Some(filter);
        self
    }
    pub fn max_ligands(mut self, max: usize) -> Self {
        self.max_ligands = Some(max);
        self
    }

    pub fn build(self) -> Result<ReviewConfig, ConfigError> {
        let score_keys = match self.score_keys {
            Some(keys) => ScoreKeyPriority::new(keys)?,
            None => ScoreKeyPriority::default(),
        };

        let max_ligands = self.max_ligands.unwrap_or(DEFAULT_MAX_LIGANDS);
        if max_ligands == 0 {
            return Err(ConfigError::ZeroLigandCap);
        }

        let filter = self.filter.unwrap_or_default();
        filter.validate()?;

        Ok(ReviewConfig {
            score_keys,
            direction: self.direction.unwrap_or_default(),
            filter,
            max_ligands,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::priority::DEFAULT_SCORE_PROPERTIES;

    #[test]
    fn builder_defaults_match_documented_values() {
        let config = ReviewConfigBuilder::new().build().unwrap();
        assert_eq!(config.score_keys.keys(), DEFAULT_SCORE_PROPERTIES);
        assert_eq!(config.direction, SortDirection::Ascending);
        assert_eq!(config.filter, LigandFilter::default());
        assert_eq!(config.max_ligands, 1000);
        assert_eq!(config, ReviewConfig::default());
    }

    #[test]
    fn builder_rejects_empty_priority_list() {
        let result = ReviewConfigBuilder::new()
            .score_keys(Vec::<String>::new())
            .build();
        assert_eq!(result, Err(ConfigError::Priority(PriorityError::Empty)));
    }

    #[test]
    fn builder_rejects_zero_cap() {
        let result = ReviewConfigBuilder::new().max_ligands(0).build();
        assert_eq!(result, Err(ConfigError::ZeroLigandCap));
    }

    #[test]
    fn builder_rejects_inverted_score_bounds() {
        let filter = LigandFilter {
            min_score: Some(-2.0),
            max_score: Some(-10.0),
            ..LigandFilter::default()
        };
        let result = ReviewConfigBuilder::new().filter(filter).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvertedBounds { field: "score", .. })
        ));
    }

    #[test]
    fn residue_selection_membership() {
        let range = ResidueSelection::default();
        assert!(range.contains(200));
        assert!(range.contains(249));
        assert!(!range.contains(250));

        let list = ResidueSelection::List(vec![219, 262]);
        assert!(list.contains(262));
        assert!(!list.contains(220));
    }

    #[test]
    fn binding_site_config_validation() {
        assert!(BindingSiteConfig::new(ResidueSelection::Range { start: 5, end: 1 }, 10.0).is_err());
        assert!(BindingSiteConfig::new(ResidueSelection::default(), -1.0).is_err());
        assert!(BindingSiteConfig::new(ResidueSelection::List(vec![1]), 0.0).is_ok());
    }
}
