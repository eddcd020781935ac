use nalgebra::{Point3, Vector3};

/// A single atom record from a protein structure file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinAtom {
    pub serial: usize,
    pub name: String,
    pub residue_name: String,
    pub chain_id: char,
    pub residue_number: isize,
    pub position: Point3<f64>,
    /// `true` for `HETATM` records.
    pub hetero: bool,
}

/// A receptor structure, kept as a flat list of atoms plus the raw text.
///
/// The raw text is what a viewer needs; the atoms are only used for summaries
/// and binding-site estimation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProteinStructure {
    pub atoms: Vec<ProteinAtom>,
    pub raw: String,
}

impl ProteinStructure {
    /// Number of `ATOM` records (standard residues), excluding `HETATM`.
    pub fn polymer_atom_count(&self) -> usize {
        self.atoms.iter().filter(|a| !a.hetero).count()
    }

    pub fn polymer_atoms(&self) -> impl Iterator<Item = &ProteinAtom> {
        self.atoms.iter().filter(|a| !a.hetero)
    }
}

/// An axis-aligned docking search box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BindingSite {
    pub center: Point3<f64>,
    pub size: Vector3<f64>,
}

impl BindingSite {
    pub fn new(center: [f64; 3], size: [f64; 3]) -> Self {
        Self {
            center: Point3::new(center[0], center[1], center[2]),
            size: Vector3::new(size[0], size[1], size[2]),
        }
    }
}

impl Default for BindingSite {
    fn default() -> Self {
        Self::new([0.0, 0.0, 0.0], [20.0, 20.0, 20.0])
    }
}
