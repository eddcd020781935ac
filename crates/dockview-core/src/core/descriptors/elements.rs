use phf::{Map, phf_map};

/// Standard atomic weights (g/mol) keyed by normalised element symbol.
#[rustfmt::skip]
pub static ATOMIC_MASSES: Map<&'static str, f64> = phf_map! {
    // --- Hydrogen and isotopes ---
    "H" => 1.008, "D" => 2.014, "T" => 3.016,

    // --- Organic subset ---
    "B" => 10.812, "C" => 12.011, "N" => 14.007, "O" => 15.999,
    "F" => 18.998, "P" => 30.974, "S" => 32.067,
    "Cl" => 35.453, "Br" => 79.904, "I" => 126.904,

    // --- Main group ---
    "He" => 4.003, "Li" => 6.941, "Be" => 9.012, "Ne" => 20.180,
    "Na" => 22.990, "Mg" => 24.305, "Al" => 26.982, "Si" => 28.086,
    "Ar" => 39.948, "K" => 39.098, "Ca" => 40.078, "Ga" => 69.723,
    "Ge" => 72.610, "As" => 74.922, "Se" => 78.960, "Kr" => 83.800,
    "Rb" => 85.468, "Sr" => 87.620, "In" => 114.818, "Sn" => 118.710,
    "Sb" => 121.760, "Te" => 127.600, "Xe" => 131.290, "Cs" => 132.905,
    "Ba" => 137.328, "Tl" => 204.383, "Pb" => 207.200, "Bi" => 208.980,

    // --- Transition metals commonly found in ligands and cofactors ---
    "Ti" => 47.867, "V" => 50.942, "Cr" => 51.996, "Mn" => 54.938,
    "Fe" => 55.845, "Co" => 58.933, "Ni" => 58.693, "Cu" => 63.546,
    "Zn" => 65.390, "Mo" => 95.940, "Ru" => 101.070, "Rh" => 102.906,
    "Pd" => 106.420, "Ag" => 107.868, "Cd" => 112.411, "Gd" => 157.250,
    "Pt" => 195.078, "Au" => 196.967, "Hg" => 200.590,
};

/// Allowed neutral valences of the organic subset, lowest first. Atoms of these
/// elements are completed with implicit hydrogens.
#[rustfmt::skip]
pub static DEFAULT_VALENCES: Map<&'static str, &'static [u32]> = phf_map! {
    "B" => &[3], "C" => &[4], "N" => &[3], "O" => &[2],
    "P" => &[3, 5], "S" => &[2, 4, 6],
    "F" => &[1], "Cl" => &[1], "Br" => &[1], "I" => &[1],
};

/// Normalises a symbol to its canonical capitalisation (`CL` -> `Cl`).
pub fn normalise_symbol(symbol: &str) -> String {
    let mut chars = symbol.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn atomic_mass(symbol: &str) -> Option<f64> {
    ATOMIC_MASSES.get(normalise_symbol(symbol).as_str()).copied()
}

pub fn default_valences(symbol: &str) -> Option<&'static [u32]> {
    DEFAULT_VALENCES.get(normalise_symbol(symbol).as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_case_normalised() {
        assert_eq!(normalise_symbol("CL"), "Cl");
        assert_eq!(normalise_symbol(" br "), "Br");
        assert_eq!(normalise_symbol("c"), "C");
        assert_eq!(normalise_symbol(""), "");
    }

    #[test]
    fn unknown_and_query_symbols_have_no_mass() {
        assert_eq!(atomic_mass("Q"), None);
        assert_eq!(atomic_mass("R#"), None);
        assert_eq!(atomic_mass("*"), None);
    }

    #[test]
    fn common_elements_resolve() {
        assert_eq!(atomic_mass("C"), Some(12.011));
        assert_eq!(atomic_mass("cl"), Some(35.453));
    }

    #[test]
    fn only_the_organic_subset_has_default_valences() {
        assert_eq!(default_valences("s"), Some(&[2, 4, 6][..]));
        assert_eq!(default_valences("BR"), Some(&[1][..]));
        assert_eq!(default_valences("Fe"), None);
        assert_eq!(default_valences("H"), None);
    }
}
