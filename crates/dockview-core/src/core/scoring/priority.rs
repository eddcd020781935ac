use thiserror::Error;

/// Property names recognised as docking scores when nothing else is configured,
/// in precedence order.
pub const DEFAULT_SCORE_PROPERTIES: &[&str] = &[
    "docking_score",
    "score",
    "vina_score",
    "affinity",
    "binding_energy",
    "glide_score",
    "chemscore",
];

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PriorityError {
    #[error("Score property list must contain at least one name")]
    Empty,
    #[error("Score property name at position {position} is blank")]
    BlankKey { position: usize },
}

/// An ordered list of property names that may carry a docking score.
///
/// The first name present in a record wins, so the order decides precedence
/// among synonyms. Names are trimmed and de-duplicated (first occurrence kept);
/// matching against record properties is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreKeyPriority {
    keys: Vec<String>,
}

impl ScoreKeyPriority {
    pub fn new<I, S>(keys: I) -> Result<Self, PriorityError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ordered: Vec<String> = Vec::new();
        for (position, key) in keys.into_iter().enumerate() {
            let key = key.as_ref().trim();
            if key.is_empty() {
                return Err(PriorityError::BlankKey { position });
            }
            if !ordered.iter().any(|k| k == key) {
                ordered.push(key.to_string());
            }
        }
        if ordered.is_empty() {
            return Err(PriorityError::Empty);
        }
        Ok(Self { keys: ordered })
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Precedence of `key` (0 is highest), or `None` if it is not recognised.
    pub fn rank_of(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }
}

impl Default for ScoreKeyPriority {
    fn default() -> Self {
        Self {
            keys: DEFAULT_SCORE_PROPERTIES
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_priority_starts_with_docking_score() {
        let priority = ScoreKeyPriority::default();
        assert_eq!(priority.keys().len(), DEFAULT_SCORE_PROPERTIES.len());
        assert_eq!(priority.rank_of("docking_score"), Some(0));
        assert_eq!(priority.rank_of("chemscore"), Some(6));
        assert_eq!(priority.rank_of("logp"), None);
    }

    #[test]
    fn duplicates_keep_first_position() {
        let priority = ScoreKeyPriority::new(["score", "affinity", " score "]).unwrap();
        assert_eq!(priority.keys(), &["score".to_string(), "affinity".to_string()]);
    }

    #[test]
    fn empty_list_is_rejected() {
        let result = ScoreKeyPriority::new(Vec::<String>::new());
        assert_eq!(result, Err(PriorityError::Empty));
    }

    #[test]
    fn blank_key_reports_its_position() {
        let result = ScoreKeyPriority::new(["score", "  "]);
        assert_eq!(result, Err(PriorityError::BlankKey { position: 1 }));
    }
}
