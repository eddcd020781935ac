use std::fmt;

/// A property value as it was typed in the source file.
///
/// Structure-data files carry every value as text, but the reader promotes plain
/// decimal values to [`PropertyValue::Number`] so that downstream consumers can
/// tell numeric annotations apart from free-form text.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// A finite numeric value.
    Number(f64),
    /// Any other value, kept verbatim.
    Text(String),
}

impl PropertyValue {
    /// Types a raw data-item value the way the structure reader sees it.
    ///
    /// A single trimmed token that parses as a finite `f64` becomes a number;
    /// everything else (including `nan`, `inf` and multi-line values) stays text.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if !trimmed.contains('\n') {
            if let Ok(value) = trimmed.parse::<f64>() {
                if value.is_finite() {
                    return PropertyValue::Number(value);
                }
            }
        }
        PropertyValue::Text(raw.to_string())
    }

    /// Interprets the value as a finite floating-point number.
    ///
    /// Returns `None` for text that does not parse, and for non-finite values,
    /// which can never be ranked meaningfully.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            PropertyValue::Number(n) => *n,
            PropertyValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

/// An insertion-ordered property mapping with unique keys.
///
/// Order is kept so that property tables and exports list annotations in the
/// order they appear in the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMap {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a property unless the key is already present.
    ///
    /// Returns `false` when the key existed; the first value is kept.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.entries.push((key, value.into()));
        true
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PropertyMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Where an extracted score came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreSource {
    /// A recognised property key.
    Property(String),
    /// A numeric token found in the entry's comment text.
    Comment,
}

impl fmt::Display for ScoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreSource::Property(key) => write!(f, "property:{}", key),
            ScoreSource::Comment => write!(f, "comment"),
        }
    }
}

/// A docking score together with its provenance. The value is always finite.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedScore {
    pub value: f64,
    pub source: ScoreSource,
}

/// Derived physicochemical properties of a ligand.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Descriptors {
    /// Molecular weight over explicit atoms, in g/mol.
    pub molecular_weight: Option<f64>,
    /// Lipophilicity estimate (logP).
    pub logp: Option<f64>,
}

/// The result of recomputing a pose's score with an external tool.
#[derive(Debug, Clone, PartialEq)]
pub struct Rescore {
    pub tool: String,
    pub value: f64,
}

/// One ligand pose from a structure-file batch.
///
/// Everything except [`LigandRecord::rescore`] is fixed when the batch is parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct LigandRecord {
    /// Zero-based position of the entry in the source file.
    pub index: usize,
    pub name: String,
    /// The entry's text exactly as read, passed through to viewers and writers.
    pub structure_block: String,
    pub properties: PropertyMap,
    pub comment: Option<String>,
    pub score: Option<ExtractedScore>,
    pub descriptors: Descriptors,
    rescore: Option<Rescore>,
}

impl LigandRecord {
    pub fn new(index: usize, name: impl Into<String>, structure_block: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            structure_block: structure_block.into(),
            properties: PropertyMap::new(),
            comment: None,
            score: None,
            descriptors: Descriptors::default(),
            rescore: None,
        }
    }

    pub fn with_properties(mut self, properties: PropertyMap) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_score(mut self, score: Option<ExtractedScore>) -> Self {
        self.score = score;
        self
    }

    pub fn with_descriptors(mut self, descriptors: Descriptors) -> Self {
        self.descriptors = descriptors;
        self
    }

    /// The numeric score, or `None` when the score is unknown.
    #[inline]
    pub fn score_value(&self) -> Option<f64> {
        self.score.as_ref().map(|s| s.value)
    }

    pub fn rescore(&self) -> Option<&Rescore> {
        self.rescore.as_ref()
    }

    /// Records the outcome of one external tool invocation on this pose.
    ///
    /// Each invocation sets the field once; a later invocation replaces the
    /// previous result. Returns the replaced value, if any.
    pub fn set_rescore(&mut self, tool: impl Into<String>, value: f64) -> Option<Rescore> {
        self.rescore.replace(Rescore {
            tool: tool.into(),
            value,
        })
    }
}
