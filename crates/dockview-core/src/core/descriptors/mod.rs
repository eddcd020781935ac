//! Derived ligand descriptors.
//!
//! Molecular weight covers the whole molecule: atoms of the organic subset are
//! completed with the hydrogens their default valence leaves implicit, as docking
//! output usually keeps polar hydrogens only. Lipophilicity is never computed
//! here, only picked up from a property written by an upstream tool.

pub mod elements;

use crate::core::models::ligand::{Descriptors, PropertyMap};
use crate::core::models::topology::{Bond, MolAtom};

/// Property names (compared case-insensitively) that carry a logP estimate.
pub const LOGP_PROPERTIES: &[&str] = &["logp", "clogp", "xlogp", "alogp", "slogp", "mollogp"];

const HYDROGEN: &str = "H";

/// Sum of bond valences at `atom`, rounded so that two aromatic bonds count as three.
fn explicit_valence(atom: usize, bonds: &[Bond]) -> u32 {
    let total: f64 = bonds
        .iter()
        .filter(|bond| bond.contains(atom))
        .map(|bond| bond.order.valence())
        .sum();
    total.round() as u32
}

/// Valence of `base` shifted by a formal charge. Cations of N, O and heavier
/// elements gain a bond (NH4+), carbon loses one either way, boron gains one
/// as an anion (BH4-).
fn charged_valence(symbol: &str, base: u32, charge: i32) -> Option<u32> {
    let base = i64::from(base);
    let charge = i64::from(charge);
    let shifted = match elements::normalise_symbol(symbol).as_str() {
        "C" => base - charge.abs(),
        "B" => base - charge,
        _ => base + charge,
    };
    u32::try_from(shifted).ok()
}

/// Implicit hydrogen count per atom. Atoms outside the organic subset, and
/// atoms already at or above every allowed valence, get none.
pub fn implicit_hydrogens(atoms: &[MolAtom], bonds: &[Bond]) -> Vec<u32> {
    atoms
        .iter()
        .enumerate()
        .map(|(index, atom)| {
            let Some(valences) = elements::default_valences(&atom.element) else {
                return 0;
            };
            let explicit = explicit_valence(index, bonds);
            valences
                .iter()
                .filter_map(|&v| charged_valence(&atom.element, v, atom.charge))
                .find(|&target| target >= explicit)
                .map_or(0, |target| target - explicit)
        })
        .collect()
}

/// Sum of atomic masses including implicit hydrogens, or `None` if the molecule
/// is empty or contains a symbol without a standard weight.
pub fn molecular_weight(atoms: &[MolAtom], bonds: &[Bond]) -> Option<f64> {
    if atoms.is_empty() {
        return None;
    }
    let explicit: f64 = atoms
        .iter()
        .map(|atom| elements::atomic_mass(&atom.element))
        .sum::<Option<f64>>()?;
    let hydrogens: u32 = implicit_hydrogens(atoms, bonds).iter().sum();
    let hydrogen_mass = elements::atomic_mass(HYDROGEN)?;
    Some(explicit + f64::from(hydrogens) * hydrogen_mass)
}

/// The first finite logP-like property, in [`LOGP_PROPERTIES`] order.
pub fn logp_from_properties(properties: &PropertyMap) -> Option<f64> {
    LOGP_PROPERTIES.iter().find_map(|wanted| {
        properties
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(wanted))
            .and_then(|(_, value)| value.as_f64())
    })
}

pub fn compute(atoms: &[MolAtom], bonds: &[Bond], properties: &PropertyMap) -> Descriptors {
    Descriptors {
        molecular_weight: molecular_weight(atoms, bonds),
        logp: logp_from_properties(properties),
    }
}
