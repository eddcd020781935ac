use super::traits::StructureReader;
use crate::core::models::protein::{ProteinAtom, ProteinStructure};
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

/// Reader for PDB receptor files.
///
/// Only the coordinate records of the first model are interpreted. Atom lines
/// that do not parse are skipped; the raw text is always kept in full.
pub struct PdbFile;

impl StructureReader for PdbFile {
    type Output = ProteinStructure;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut structure = ProteinStructure::default();
        let mut raw_lines: Vec<String> = Vec::new();
        let mut first_model_done = false;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let record_type = slice_and_trim(&line, 0, 6);

            match record_type {
                "ATOM" | "HETATM" if !first_model_done => match parse_atom(&line) {
                    Some(atom) => structure.atoms.push(atom),
                    None => debug!("Skipping malformed atom record on line {}.", line_num + 1),
                },
                "ENDMDL" => first_model_done = true,
                _ => {}
            }
            raw_lines.push(line);
        }

        if structure.atoms.is_empty() {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }
        structure.raw = raw_lines.join("\n");
        Ok(structure)
    }
}

fn parse_atom(line: &str) -> Option<ProteinAtom> {
    let hetero = line.starts_with("HETATM");
    let serial = slice_and_trim(line, 6, 11).parse().ok()?;
    let name = slice_and_trim(line, 12, 16).to_string();
    let residue_name = slice_and_trim(line, 17, 20).to_string();
    let chain_id = slice_and_trim(line, 21, 22).chars().next().unwrap_or(' ');
    let residue_number = slice_and_trim(line, 22, 26).parse().ok()?;
    let x = slice_and_trim(line, 30, 38).parse().ok()?;
    let y = slice_and_trim(line, 38, 46).parse().ok()?;
    let z = slice_and_trim(line, 46, 54).parse().ok()?;

    Some(ProteinAtom {
        serial,
        name,
        residue_name,
        chain_id,
        residue_number,
        position: Point3::new(x, y, z),
        hetero,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINI_PDB: &str = "\
HEADER    HYDROLASE
ATOM      1  N   ALA A 200      10.000  20.000  30.000  1.00  0.00           N
ATOM      2  CA  ALA A 200      12.000  22.000  34.000  1.00  0.00           C
ATOM      3  CA  GLY A 251      50.000  50.000  50.000  1.00  0.00           C
HETATM    4  O   HOH A 301       1.000   1.000   1.000  1.00  0.00           O
ATOM      5  CA  BAD A  XX       1.000   1.000   1.000  1.00  0.00           C
END
";

    #[test]
    fn reads_atoms_and_keeps_raw_text() {
        let protein = PdbFile::read_from_str(MINI_PDB).unwrap();
        assert_eq!(protein.atoms.len(), 4);
        assert_eq!(protein.polymer_atom_count(), 3);
        assert!(protein.raw.starts_with("HEADER"));
        assert!(protein.raw.ends_with("END"));

        let ca = &protein.atoms[1];
        assert_eq!(ca.name, "CA");
        assert_eq!(ca.residue_name, "ALA");
        assert_eq!(ca.chain_id, 'A');
        assert_eq!(ca.residue_number, 200);
        assert_eq!(ca.position, Point3::new(12.0, 22.0, 34.0));
        assert!(protein.atoms[3].hetero);
    }

    #[test]
    fn only_first_model_is_interpreted() {
        let text = "\
MODEL        1
ATOM      1  CA  ALA A   1       0.000   0.000   0.000  1.00  0.00           C
ENDMDL
MODEL        2
ATOM      1  CA  ALA A   1       9.000   9.000   9.000  1.00  0.00           C
ENDMDL
";
        let protein = PdbFile::read_from_str(text).unwrap();
        assert_eq!(protein.atoms.len(), 1);
        assert_eq!(protein.atoms[0].position, Point3::origin());
    }

    #[test]
    fn file_without_atoms_is_an_error() {
        let result = PdbFile::read_from_str("HEADER    EMPTY\nEND\n");
        assert!(matches!(result, Err(PdbError::MissingRecord(_))));
    }
}
