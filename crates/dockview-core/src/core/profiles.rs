use crate::core::models::protein::BindingSite;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
struct BindingSiteEntry {
    center: [f64; 3],
    size: [f64; 3],
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct ProfileEntry {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    key_residues: Vec<isize>,
    binding_site: BindingSiteEntry,
}

/// A known receptor with its curated docking box.
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinProfile {
    pub id: String,
    pub name: String,
    pub description: String,
    pub key_residues: Vec<isize>,
    pub binding_site: BindingSite,
}

impl ProteinProfile {
    fn from_entry(id: String, entry: ProfileEntry) -> Self {
        Self {
            id,
            name: entry.name,
            description: entry.description,
            key_residues: entry.key_residues,
            binding_site: BindingSite::new(entry.binding_site.center, entry.binding_site.size),
        }
    }
}

/// Receptor profiles keyed by identifier (usually a PDB code).
///
/// Identifiers are matched case-insensitively; they are stored lowercase.
#[derive(Debug, Clone, Default)]
pub struct ProteinProfileRegistry {
    registry: BTreeMap<String, ProteinProfile>,
}

impl ProteinProfileRegistry {
    pub fn load(path: &Path) -> Result<Self, ProfileLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ProfileLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            ProfileLoadError::Toml { source, .. } => ProfileLoadError::Toml {
                path: path.to_string_lossy().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ProfileLoadError> {
        let entries: BTreeMap<String, ProfileEntry> =
            toml::from_str(content).map_err(|e| ProfileLoadError::Toml {
                path: "<inline>".to_string(),
                source: e,
            })?;
        let registry = entries
            .into_iter()
            .map(|(id, entry)| {
                let id = id.to_ascii_lowercase();
                (id.clone(), ProteinProfile::from_entry(id, entry))
            })
            .collect();
        Ok(Self { registry })
    }

    pub fn get(&self, id: &str) -> Option<&ProteinProfile> {
        self.registry.get(&id.to_ascii_lowercase())
    }

    /// Profiles in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &ProteinProfile> {
        self.registry.values()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum ProfileLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PROFILES: &str = r#"
[5N9R]
name = "USP7 Ubiquitin-specific peptidase 7"
description = "Deubiquitinating enzyme, drug target"
key-residues = [219, 262, 275, 276, 277, 278]

[5N9R.binding-site]
center = [18.5, 5.2, -7.8]
size = [25.0, 25.0, 25.0]

[placeholder]
name = "Unnamed receptor"
binding-site = { center = [0.0, 0.0, 0.0], size = [20.0, 20.0, 20.0] }
"#;

    #[test]
    fn load_reads_profiles_and_lowercases_ids() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", PROFILES).unwrap();

        let registry = ProteinProfileRegistry::load(file.path()).unwrap();
        assert_eq!(registry.len(), 2);

        let usp7 = registry.get("5n9r").unwrap();
        assert_eq!(usp7.id, "5n9r");
        assert_eq!(usp7.key_residues, vec![219, 262, 275, 276, 277, 278]);
        assert_eq!(
            usp7.binding_site,
            BindingSite::new([18.5, 5.2, -7.8], [25.0, 25.0, 25.0])
        );
        assert!(registry.get("5N9R").is_some());
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let registry = ProteinProfileRegistry::from_toml_str(PROFILES).unwrap();
        let placeholder = registry.get("placeholder").unwrap();
        assert!(placeholder.description.is_empty());
        assert!(placeholder.key_residues.is_empty());
        assert_eq!(placeholder.binding_site, BindingSite::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let text = r#"
[x]
name = "x"
colour = "blue"
binding-site = { center = [0.0, 0.0, 0.0], size = [1.0, 1.0, 1.0] }
"#;
        assert!(matches!(
            ProteinProfileRegistry::from_toml_str(text),
            Err(ProfileLoadError::Toml { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = ProteinProfileRegistry::load(Path::new("/nonexistent/profiles.toml"));
        assert!(matches!(result, Err(ProfileLoadError::Io { .. })));
    }
}
