use super::config::BindingSiteConfig;
use crate::core::models::protein::{BindingSite, ProteinStructure};
use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};

/// A docking box derived from receptor coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteEstimate {
    pub site: BindingSite,
    /// Number of selected atoms; zero means the default box was returned.
    pub atoms_used: usize,
}

impl SiteEstimate {
    pub fn is_fallback(&self) -> bool {
        self.atoms_used == 0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Estimates the docking box around the selected residues.
///
/// Only `ATOM` records take part. The center is the mean of their coordinates
/// and each side is the coordinate range on that axis plus the buffer; both are
/// rounded to two decimals.
pub fn estimate(protein: &ProteinStructure, config: &BindingSiteConfig) -> SiteEstimate {
    let selected: Vec<Point3<f64>> = protein
        .polymer_atoms()
        .filter(|atom| config.residues.contains(atom.residue_number))
        .map(|atom| atom.position)
        .collect();

    if selected.is_empty() {
        warn!("No receptor atoms in the selected residues; using the default docking box.");
        return SiteEstimate {
            site: BindingSite::default(),
            atoms_used: 0,
        };
    }

    let sum = selected
        .iter()
        .fold(Vector3::<f64>::zeros(), |acc, p| acc + p.coords);
    let center = sum / selected.len() as f64;

    let mut min = Vector3::repeat(f64::MAX);
    let mut max = Vector3::repeat(f64::MIN);
    for p in &selected {
        min = min.inf(&p.coords);
        max = max.sup(&p.coords);
    }
    let size = (max - min).add_scalar(config.buffer);

    debug!(
        "Binding site from {} atoms: center {:?}, size {:?}",
        selected.len(),
        center,
        size
    );

    SiteEstimate {
        site: BindingSite {
            center: Point3::from(center.map(round2)),
            size: size.map(round2),
        },
        atoms_used: selected.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::pdb::PdbFile;
    use crate::core::io::traits::StructureReader;
    use crate::engine::config::ResidueSelection;

    const RECEPTOR: &str = "\
ATOM      1  N   ALA A 200      10.000  20.000  30.000  1.00  0.00           N
ATOM      2  CA  ALA A 200      12.000  22.000  34.000  1.00  0.00           C
ATOM      3  CA  SER A 201      11.333  21.000  32.000  1.00  0.00           C
ATOM      4  CA  GLY A 251      50.000  50.000  50.000  1.00  0.00           C
HETATM    5  O   HOH A 220      99.000  99.000  99.000  1.00  0.00           O
";

    #[test]
    fn default_selection_uses_only_polymer_atoms_in_range() {
        let protein = PdbFile::read_from_str(RECEPTOR).unwrap();
        let estimate = estimate(&protein, &BindingSiteConfig::default());

        assert_eq!(estimate.atoms_used, 3);
        assert_eq!(estimate.site.center, Point3::new(11.11, 21.0, 32.0));
        assert_eq!(estimate.site.size, Vector3::new(12.0, 12.0, 14.0));
    }

    #[test]
    fn explicit_residue_list_and_buffer() {
        let protein = PdbFile::read_from_str(RECEPTOR).unwrap();
        let config = BindingSiteConfig::new(ResidueSelection::List(vec![251]), 4.5).unwrap();
        let estimate = estimate(&protein, &config);

        assert_eq!(estimate.atoms_used, 1);
        assert_eq!(estimate.site.center, Point3::new(50.0, 50.0, 50.0));
        assert_eq!(estimate.site.size, Vector3::new(4.5, 4.5, 4.5));
    }

    #[test]
    fn empty_selection_falls_back_to_default_box() {
        let protein = PdbFile::read_from_str(RECEPTOR).unwrap();
        let config = BindingSiteConfig::new(ResidueSelection::List(vec![1, 2, 3]), 10.0).unwrap();
        let estimate = estimate(&protein, &config);

        assert!(estimate.is_fallback());
        assert_eq!(estimate.site, BindingSite::default());
    }
}
