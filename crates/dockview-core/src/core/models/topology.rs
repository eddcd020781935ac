use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Maps an MDL bond type code. Query types (5-8) count as single bonds.
    pub fn from_mdl_code(code: u8) -> Option<Self> {
        match code {
            1 | 5..=8 => Some(Self::Single),
            2 => Some(Self::Double),
            3 => Some(Self::Triple),
            4 => Some(Self::Aromatic),
            _ => None,
        }
    }

    /// Contribution of one bond of this order to an atom's valence.
    pub fn valence(self) -> f64 {
        match self {
            Self::Single => 1.0,
            Self::Double => 2.0,
            Self::Triple => 3.0,
            Self::Aromatic => 1.5,
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Single => "Single",
                Self::Double => "Double",
                Self::Triple => "Triple",
                Self::Aromatic => "Aromatic",
            }
        )
    }
}

/// An atom of a ligand connection table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MolAtom {
    pub element: String,
    /// Formal charge in units of e.
    pub charge: i32,
}

impl MolAtom {
    pub fn new(element: impl Into<String>, charge: i32) -> Self {
        Self {
            element: element.into(),
            charge,
        }
    }
}

/// A bond between two atoms, by zero-based atom position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: usize,
    pub atom2: usize,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize, order: BondOrder) -> Self {
        Self {
            atom1,
            atom2,
            order,
        }
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.atom1 == atom || self.atom2 == atom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mdl_codes_map_to_orders() {
        assert_eq!(BondOrder::from_mdl_code(1), Some(BondOrder::Single));
        assert_eq!(BondOrder::from_mdl_code(2), Some(BondOrder::Double));
        assert_eq!(BondOrder::from_mdl_code(4), Some(BondOrder::Aromatic));
        assert_eq!(BondOrder::from_mdl_code(8), Some(BondOrder::Single));
        assert_eq!(BondOrder::from_mdl_code(0), None);
        assert_eq!(BondOrder::from_mdl_code(9), None);
    }

    #[test]
    fn bond_contains_both_ends() {
        let bond = Bond::new(0, 3, BondOrder::Double);
        assert!(bond.contains(0));
        assert!(bond.contains(3));
        assert!(!bond.contains(1));
        assert_eq!(bond.order.to_string(), "Double");
    }
}
