use super::priority::ScoreKeyPriority;
use crate::core::models::ligand::{ExtractedScore, PropertyMap, ScoreSource};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// A signed decimal, optionally in scientific notation.
static NUMERIC_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?")
        .expect("Numeric token pattern must compile")
});

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A token counts only when it is not glued to a word character or a dot on
/// either side. A single trailing dot is allowed so that a number ending a
/// sentence still matches.
fn is_standalone(line: &str, start: usize, end: usize) -> bool {
    let before_ok = line[..start]
        .chars()
        .next_back()
        .is_none_or(|c| !is_word_char(c) && c != '.');
    let mut after = line[end..].chars();
    let after_ok = match after.next() {
        None => true,
        Some('.') => after.next().is_none_or(|c| !is_word_char(c)),
        Some(c) => !is_word_char(c),
    };
    before_ok && after_ok
}

/// Determines one score per structure entry.
///
/// Recognised property keys are consulted in priority order; the first one whose
/// value parses as a finite number wins. Values that do not parse are treated as
/// absent. When no property matches, the comment text is scanned for the first
/// numeric token. If neither yields a number the score is unknown (`None`).
#[derive(Debug, Clone, Default)]
pub struct ScoreExtractor {
    priority: ScoreKeyPriority,
}

impl ScoreExtractor {
    pub fn new(priority: ScoreKeyPriority) -> Self {
        Self { priority }
    }

    pub fn extract(&self, properties: &PropertyMap, comment: Option<&str>) -> Option<ExtractedScore> {
        self.from_properties(properties).or_else(|| {
            let value = comment.and_then(first_numeric_token)?;
            Some(ExtractedScore {
                value,
                source: ScoreSource::Comment,
            })
        })
    }

    fn from_properties(&self, properties: &PropertyMap) -> Option<ExtractedScore> {
        for key in self.priority.iter() {
            let Some(raw) = properties.get(key) else {
                continue;
            };
            match raw.as_f64() {
                Some(value) => {
                    return Some(ExtractedScore {
                        value,
                        source: ScoreSource::Property(key.to_string()),
                    });
                }
                None => trace!("Property '{}' is not numeric ({}), trying next key.", key, raw),
            }
        }
        None
    }
}

/// Returns the first finite numeric token in `text`, scanning line by line.
pub fn first_numeric_token(text: &str) -> Option<f64> {
    text.lines()
        .flat_map(|line| {
            NUMERIC_TOKEN
                .find_iter(line)
                .filter(move |m| is_standalone(line, m.start(), m.end()))
        })
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .find(|value| value.is_finite())
}
