use super::config::ConfigError;
use crate::core::models::ligand::LigandRecord;
use std::fmt;

/// Property bounds a ligand must satisfy to stay in the review.
///
/// A bound only rejects a record whose value is known and outside it. Missing
/// scores or descriptors never cause a rejection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LigandFilter {
    pub max_molecular_weight: Option<f64>,
    pub max_logp: Option<f64>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
}

/// The first bound a record violated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    MolecularWeight { value: f64, max: f64 },
    LogP { value: f64, max: f64 },
    ScoreBelow { value: f64, min: f64 },
    ScoreAbove { value: f64, max: f64 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MolecularWeight { value, max } => {
                write!(f, "molecular weight {:.2} exceeds {}", value, max)
            }
            Rejection::LogP { value, max } => write!(f, "logP {:.2} exceeds {}", value, max),
            Rejection::ScoreBelow { value, min } => write!(f, "score {} below {}", value, min),
            Rejection::ScoreAbove { value, max } => write!(f, "score {} above {}", value, max),
        }
    }
}

impl LigandFilter {
    /// Bounds typical of a drug-like screening library: MW at most 800, logP at
    /// most 5, score within [-15, 0].
    ///
    /// logP is not estimated from structure. The logP bound only applies to
    /// records that carry a logP-like property (see
    /// [`LOGP_PROPERTIES`](crate::core::descriptors::LOGP_PROPERTIES)); records
    /// without one pass it.
    pub fn drug_like() -> Self {
        Self {
            max_molecular_weight: Some(800.0),
            max_logp: Some(5.0),
            min_score: Some(-15.0),
            max_score: Some(0.0),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = [
            ("max-mw", self.max_molecular_weight),
            ("max-logp", self.max_logp),
            ("min-score", self.min_score),
            ("max-score", self.max_score),
        ];
        for (field, bound) in bounds {
            if let Some(value) = bound.filter(|v| !v.is_finite()) {
                return Err(ConfigError::NonFiniteBound { field, value });
            }
        }
        if let (Some(min), Some(max)) = (self.min_score, self.max_score) {
            if min > max {
                return Err(ConfigError::InvertedBounds {
                    field: "score",
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    pub fn check(&self, record: &LigandRecord) -> Result<(), Rejection> {
        if let (Some(value), Some(max)) = (
            record.descriptors.molecular_weight,
            self.max_molecular_weight,
        ) {
            if value > max {
                return Err(Rejection::MolecularWeight { value, max });
            }
        }
        if let (Some(value), Some(max)) = (record.descriptors.logp, self.max_logp) {
            if value > max {
                return Err(Rejection::LogP { value, max });
            }
        }
        if let Some(value) = record.score_value() {
            if let Some(min) = self.min_score.filter(|min| value < *min) {
                return Err(Rejection::ScoreBelow { value, min });
            }
            if let Some(max) = self.max_score.filter(|max| value > *max) {
                return Err(Rejection::ScoreAbove { value, max });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn accepts(&self, record: &LigandRecord) -> bool {
        self.check(record).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ligand::{Descriptors, ExtractedScore, ScoreSource};

    fn record(score: Option<f64>, mw: Option<f64>, logp: Option<f64>) -> LigandRecord {
        LigandRecord::new(0, "lig", "")
            .with_score(score.map(|value| ExtractedScore {
                value,
                source: ScoreSource::Comment,
            }))
            .with_descriptors(Descriptors {
                molecular_weight: mw,
                logp,
            })
    }

    #[test]
    fn default_filter_accepts_everything() {
        let filter = LigandFilter::default();
        assert!(filter.is_unbounded());
        assert!(filter.accepts(&record(Some(100.0), Some(5000.0), Some(12.0))));
    }

    #[test]
    fn drug_like_rejects_known_violations() {
        let filter = LigandFilter::drug_like();
        assert_eq!(
            filter.check(&record(Some(-7.0), Some(912.4), None)),
            Err(Rejection::MolecularWeight {
                value: 912.4,
                max: 800.0
            })
        );
        assert!(!filter.accepts(&record(Some(-7.0), None, Some(6.1))));
        assert!(!filter.accepts(&record(Some(-16.0), None, None)));
        assert!(!filter.accepts(&record(Some(0.5), None, None)));
        assert!(filter.accepts(&record(Some(0.0), Some(800.0), Some(5.0))));
    }

    #[test]
    fn unknown_values_pass_every_bound() {
        let filter = LigandFilter::drug_like();
        assert!(filter.accepts(&record(None, None, None)));
    }

    #[test]
    fn logp_bound_only_applies_to_records_with_a_logp_property() {
        let filter = LigandFilter::drug_like();
        assert!(filter.accepts(&record(Some(-9.0), Some(640.0), None)));
        assert_eq!(
            filter.check(&record(Some(-9.0), Some(640.0), Some(5.5))),
            Err(Rejection::LogP {
                value: 5.5,
                max: 5.0
            })
        );
    }

    #[test]
    fn validate_rejects_non_finite_bounds() {
        let filter = LigandFilter {
            max_logp: Some(f64::NAN),
            ..LigandFilter::default()
        };
        assert!(matches!(
            filter.validate(),
            Err(ConfigError::NonFiniteBound { field: "max-logp", .. })
        ));
        assert!(LigandFilter::drug_like().validate().is_ok());
    }
}
