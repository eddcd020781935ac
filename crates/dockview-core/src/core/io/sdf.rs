use super::traits::{RankingWriter, StructureReader};
use crate::core::models::ligand::{LigandRecord, PropertyMap, PropertyValue};
use crate::core::models::topology::{Bond, BondOrder, MolAtom};
use crate::core::scoring::ranking::Ranking;
use std::io::{self, BufRead, Write};
use thiserror::Error;

const RECORD_DELIMITER: &str = "$$$$";
const MOL_END: &str = "M  END";
const V3000_ATOM_BEGIN: &str = "M  V30 BEGIN ATOM";
const V3000_ATOM_END: &str = "M  V30 END ATOM";
const V3000_BOND_BEGIN: &str = "M  V30 BEGIN BOND";
const V3000_BOND_END: &str = "M  V30 END BOND";
const CHARGE_PREFIX: &str = "M  CHG";
/// Atom and bond counts are three-character fields in a V2000 counts line.
const V2000_MAX_COUNT: usize = 999;

/// One structure entry of an SDF batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SdfEntry {
    /// Zero-based position of the entry in the file.
    pub index: usize,
    pub title: String,
    /// The molfile comment line (line 3), if not blank.
    pub comment: Option<String>,
    /// Atoms of the connection table, in file order.
    pub atoms: Vec<MolAtom>,
    pub bonds: Vec<Bond>,
    pub properties: PropertyMap,
    /// The entry text exactly as read, without the `$$$$` delimiter.
    pub block: String,
}

impl SdfEntry {
    /// The title, or `Ligand_<n>` (1-based) when the title line is blank.
    pub fn name(&self) -> String {
        if self.title.is_empty() {
            format!("Ligand_{}", self.index + 1)
        } else {
            self.title.clone()
        }
    }

    pub fn elements(&self) -> Vec<&str> {
        self.atoms.iter().map(|a| a.element.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub index: usize,
    pub reason: SdfParseErrorKind,
}

/// The outcome of reading an SDF file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SdfBatch {
    pub entries: Vec<SdfEntry>,
    pub skipped: Vec<SkippedEntry>,
    /// Set when a load limit stopped reading before the end of the file.
    pub truncated: bool,
}

#[derive(Debug, Error)]
pub enum SdfError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SdfParseErrorKind {
    #[error("Entry has only {lines} line(s); a molfile needs a header and a counts line")]
    TooShort { lines: usize },
    #[error("Invalid counts line: '{value}'")]
    InvalidCounts { value: String },
    #[error("Atom block declares {expected} atoms but only {found} lines are present")]
    MissingAtomLines { expected: usize, found: usize },
    #[error("Invalid atom line {line} of the entry: '{value}'")]
    InvalidAtomLine { line: usize, value: String },
    #[error("Bond block declares {expected} bonds but only {found} lines are present")]
    MissingBondLines { expected: usize, found: usize },
    #[error("Invalid bond line {line} of the entry: '{value}'")]
    InvalidBondLine { line: usize, value: String },
}

pub struct SdfFile;

impl SdfFile {
    /// Reads at most `limit` entries (skipped entries included in the count).
    pub fn read_with_limit(
        reader: &mut impl BufRead,
        limit: Option<usize>,
    ) -> Result<SdfBatch, SdfError> {
        let mut batch = SdfBatch::default();
        let mut current: Vec<String> = Vec::new();
        let mut index = 0usize;

        for line_res in reader.lines() {
            let line = line_res?;

            if limit.is_some_and(|max| index >= max) {
                if !line.trim().is_empty() {
                    batch.truncated = true;
                    break;
                }
                continue;
            }

            if line.trim() == RECORD_DELIMITER {
                Self::finish_entry(&mut batch, std::mem::take(&mut current), &mut index);
            } else {
                current.push(line);
            }
        }
        if !batch.truncated {
            Self::finish_entry(&mut batch, current, &mut index);
        }

        Ok(batch)
    }

    /// Writes records in the given order, each followed by a `$$$$` delimiter.
    ///
    /// Blocks are written as read, except that a blank title line receives the
    /// record name. Positional names (`Ligand_<n>`) would otherwise change when
    /// the reordered file is read back.
    pub fn write_records<'a>(
        records: impl IntoIterator<Item = &'a LigandRecord>,
        writer: &mut impl Write,
    ) -> Result<(), SdfError> {
        for record in records {
            let block = &record.structure_block;
            match block.split_once('\n') {
                Some((title, rest)) if title.trim().is_empty() => {
                    writeln!(writer, "{}\n{}", record.name, rest)?
                }
                _ => writeln!(writer, "{}", block)?,
            }
            writeln!(writer, "{}", RECORD_DELIMITER)?;
        }
        Ok(())
    }

    fn finish_entry(batch: &mut SdfBatch, lines: Vec<String>, index: &mut usize) {
        if lines.iter().all(|l| l.trim().is_empty()) {
            return;
        }
        match parse_entry(*index, lines) {
            Ok(entry) => batch.entries.push(entry),
            Err(reason) => batch.skipped.push(SkippedEntry {
                index: *index,
                reason,
            }),
        }
        *index += 1;
    }
}

impl StructureReader for SdfFile {
    type Output = SdfBatch;
    type Error = SdfError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        Self::read_with_limit(reader, None)
    }
}

impl RankingWriter for SdfFile {
    type Error = SdfError;

    fn write_to(ranking: &Ranking, writer: &mut impl Write) -> Result<(), Self::Error> {
        Self::write_records(ranking.iter(), writer)
    }
}

fn parse_entry(index: usize, lines: Vec<String>) -> Result<SdfEntry, SdfParseErrorKind> {
    if lines.len() <= 4 {
        return Err(SdfParseErrorKind::TooShort { lines: lines.len() });
    }

    let title = lines[0].trim().to_string();
    let comment = Some(lines[2].trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    let table = if lines[3].contains("V3000") {
        parse_v3000_table(&lines)?
    } else {
        parse_v2000_table(&lines)?
    };

    let data_start = lines
        .iter()
        .position(|l| l.starts_with(MOL_END))
        .map_or(table.body_end, |p| p + 1);
    let properties = parse_data_items(&lines[data_start.min(lines.len())..]);

    Ok(SdfEntry {
        index,
        title,
        comment,
        atoms: table.atoms,
        bonds: table.bonds,
        properties,
        block: lines.join("\n"),
    })
}

struct ConnectionTable {
    atoms: Vec<MolAtom>,
    bonds: Vec<Bond>,
    /// Line index just past the connection table.
    body_end: usize,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

/// Atom and bond counts of a V2000 counts line.
fn parse_counts(line: &str) -> Option<(usize, usize)> {
    let fixed = (
        slice_and_trim(line, 0, 3).parse::<usize>(),
        slice_and_trim(line, 3, 6).parse::<usize>(),
    );
    let (natoms, nbonds) = match fixed {
        (Ok(natoms), Ok(nbonds)) => (natoms, nbonds),
        _ => {
            let mut tokens = line.split_whitespace();
            let natoms = tokens.next()?.parse().ok()?;
            let nbonds = tokens.next().and_then(|t| t.parse().ok()).unwrap_or(0);
            (natoms, nbonds)
        }
    };
    (natoms <= V2000_MAX_COUNT && nbonds <= V2000_MAX_COUNT).then_some((natoms, nbonds))
}

/// Formal charge for the V2000 atom-block charge code.
fn charge_from_code(code: u8) -> i32 {
    match code {
        1 => 3,
        2 => 2,
        3 => 1,
        5 => -1,
        6 => -2,
        7 => -3,
        _ => 0,
    }
}

fn parse_v2000_table(lines: &[String]) -> Result<ConnectionTable, SdfParseErrorKind> {
    let counts = &lines[3];
    let (natoms, nbonds) =
        parse_counts(counts).ok_or_else(|| SdfParseErrorKind::InvalidCounts {
            value: counts.clone(),
        })?;

    let first = 4;
    let last = first + natoms;
    if lines.len() < last {
        return Err(SdfParseErrorKind::MissingAtomLines {
            expected: natoms,
            found: lines.len() - first,
        });
    }

    let mut atoms = Vec::with_capacity(natoms);
    for (offset, line) in lines[first..last].iter().enumerate() {
        let invalid = || SdfParseErrorKind::InvalidAtomLine {
            line: first + offset + 1,
            value: line.clone(),
        };
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 4 {
            return Err(invalid());
        }
        for coord in &cols[..3] {
            coord.parse::<f64>().map_err(|_| invalid())?;
        }
        let charge = cols
            .get(5)
            .and_then(|c| c.parse::<u8>().ok())
            .map_or(0, charge_from_code);
        atoms.push(MolAtom::new(cols[3], charge));
    }

    let bonds_end = last + nbonds;
    if lines.len() < bonds_end {
        return Err(SdfParseErrorKind::MissingBondLines {
            expected: nbonds,
            found: lines.len() - last,
        });
    }
    let mut bonds = Vec::with_capacity(nbonds);
    for (offset, line) in lines[last..bonds_end].iter().enumerate() {
        let bond =
            parse_v2000_bond(line, natoms).ok_or_else(|| SdfParseErrorKind::InvalidBondLine {
                line: last + offset + 1,
                value: line.clone(),
            })?;
        bonds.push(bond);
    }

    apply_charge_lines(&lines[bonds_end..], &mut atoms);

    Ok(ConnectionTable {
        atoms,
        bonds,
        body_end: bonds_end,
    })
}

/// `111222ttt...`: two 1-based atom numbers and a bond type code.
fn parse_v2000_bond(line: &str, natoms: usize) -> Option<Bond> {
    let fixed = (
        slice_and_trim(line, 0, 3).parse::<usize>(),
        slice_and_trim(line, 3, 6).parse::<usize>(),
        slice_and_trim(line, 6, 9).parse::<u8>(),
    );
    let (a, b, code) = match fixed {
        (Ok(a), Ok(b), Ok(code)) => (a, b, code),
        _ => {
            let mut tokens = line.split_whitespace();
            (
                tokens.next()?.parse().ok()?,
                tokens.next()?.parse().ok()?,
                tokens.next()?.parse().ok()?,
            )
        }
    };
    make_bond(a, b, code, natoms)
}

fn make_bond(a: usize, b: usize, code: u8, natoms: usize) -> Option<Bond> {
    let in_range = |n: usize| (1..=natoms).contains(&n);
    if !in_range(a) || !in_range(b) || a == b {
        return None;
    }
    Some(Bond::new(a - 1, b - 1, BondOrder::from_mdl_code(code)?))
}

/// `M  CHG` lines replace every charge given in the atom block.
fn apply_charge_lines(lines: &[String], atoms: &mut [MolAtom]) {
    let mut reset = false;
    for line in lines.iter().take_while(|l| !l.starts_with(MOL_END)) {
        let Some(rest) = line.strip_prefix(CHARGE_PREFIX) else {
            continue;
        };
        if !reset {
            atoms.iter_mut().for_each(|atom| atom.charge = 0);
            reset = true;
        }
        let values: Vec<i64> = rest
            .split_whitespace()
            .skip(1)
            .filter_map(|t| t.parse().ok())
            .collect();
        for pair in values.chunks_exact(2) {
            let position = usize::try_from(pair[0]).ok().and_then(|n| n.checked_sub(1));
            let (Some(position), Ok(charge)) = (position, i32::try_from(pair[1])) else {
                continue;
            };
            if let Some(atom) = atoms.get_mut(position) {
                atom.charge = charge;
            }
        }
    }
}

fn parse_v3000_table(lines: &[String]) -> Result<ConnectionTable, SdfParseErrorKind> {
    let begin = lines
        .iter()
        .position(|l| l.trim_end() == V3000_ATOM_BEGIN)
        .ok_or_else(|| SdfParseErrorKind::InvalidCounts {
            value: lines[3].clone(),
        })?;

    let mut atoms = Vec::new();
    let mut atoms_end = None;
    for (offset, line) in lines[begin + 1..].iter().enumerate() {
        if line.trim_end() == V3000_ATOM_END {
            atoms_end = Some(begin + 1 + offset + 1);
            break;
        }
        // M  V30 <index> <symbol> <x> <y> <z> <aamap> [CHG=<n> ...]
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 7 || cols[4..7].iter().any(|c| c.parse::<f64>().is_err()) {
            return Err(SdfParseErrorKind::InvalidAtomLine {
                line: begin + offset + 2,
                value: line.clone(),
            });
        }
        let charge = cols
            .iter()
            .skip(7)
            .find_map(|c| c.strip_prefix("CHG=")?.parse().ok())
            .unwrap_or(0);
        atoms.push(MolAtom::new(cols[3], charge));
    }
    let Some(atoms_end) = atoms_end else {
        return Err(SdfParseErrorKind::MissingAtomLines {
            expected: atoms.len() + 1,
            found: atoms.len(),
        });
    };

    let mut bonds = Vec::new();
    let mut body_end = atoms_end;
    if lines.get(atoms_end).is_some_and(|l| l.trim_end() == V3000_BOND_BEGIN) {
        for (offset, line) in lines[atoms_end + 1..].iter().enumerate() {
            let number = atoms_end + offset + 2;
            if line.trim_end() == V3000_BOND_END {
                body_end = number;
                break;
            }
            // M  V30 <index> <type> <atom1> <atom2> ...
            let cols: Vec<&str> = line.split_whitespace().collect();
            let bond = (cols.len() >= 6)
                .then(|| {
                    make_bond(
                        cols[4].parse().ok()?,
                        cols[5].parse().ok()?,
                        cols[3].parse().ok()?,
                        atoms.len(),
                    )
                })
                .flatten()
                .ok_or_else(|| SdfParseErrorKind::InvalidBondLine {
                    line: number,
                    value: line.clone(),
                })?;
            bonds.push(bond);
        }
    }

    Ok(ConnectionTable {
        atoms,
        bonds,
        body_end,
    })
}

/// Parses `> <name>` data items. A value runs until the next blank line.
fn parse_data_items(lines: &[String]) -> PropertyMap {
    let mut properties = PropertyMap::new();
    let mut i = 0;
    while i < lines.len() {
        let header = &lines[i];
        i += 1;
        if !header.starts_with('>') {
            continue;
        }
        let Some(name) = data_item_name(header) else {
            continue;
        };

        let mut value_lines: Vec<&str> = Vec::new();
        while i < lines.len() && !lines[i].trim().is_empty() {
            value_lines.push(&lines[i]);
            i += 1;
        }
        properties.insert(name, PropertyValue::from_raw(&value_lines.join("\n")));
    }
    properties
}

fn data_item_name(header: &str) -> Option<&str> {
    let open = header.find('<')?;
    let close = header[open + 1..].find('>')? + open + 1;
    let name = header[open + 1..close].trim();
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_POSES: &str = "\
pose-a
     RDKit          3D
vina rescored
  3  2  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    1.5000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    2.2000    1.2000    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0
  2  3  1  0
M  END
>  <docking_score>  (1)
-7.2

> <source>
library A
batch 3

$$$$

     RDKit          3D
binding energy: -6.3 kcal/mol
  1  0  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 N   0  0  0  0  0  0  0  0  0  0  0  0
M  END
$$$$
";

    #[test]
    fn reads_entries_with_properties_and_comments() {
        let batch = SdfFile::read_from_str(TWO_POSES).unwrap();
        assert_eq!(batch.entries.len(), 2);
        assert!(batch.skipped.is_empty());
        assert!(!batch.truncated);

        let first = &batch.entries[0];
        assert_eq!(first.index, 0);
        assert_eq!(first.name(), "pose-a");
        assert_eq!(first.comment.as_deref(), Some("vina rescored"));
        assert_eq!(first.elements(), vec!["C", "C", "O"]);
        assert_eq!(first.bonds.len(), 2);
        assert_eq!(first.bonds[1], Bond::new(1, 2, BondOrder::Single));
        assert_eq!(
            first.properties.get("docking_score"),
            Some(&PropertyValue::Number(-7.2))
        );
        assert_eq!(
            first.properties.get("source"),
            Some(&PropertyValue::Text("library A\nbatch 3".into()))
        );
    }

    #[test]
    fn blank_title_gets_positional_name() {
        let batch = SdfFile::read_from_str(TWO_POSES).unwrap();
        let second = &batch.entries[1];
        assert_eq!(second.name(), "Ligand_2");
        assert_eq!(
            second.comment.as_deref(),
            Some("binding energy: -6.3 kcal/mol")
        );
        assert!(second.properties.is_empty());
    }

    #[test]
    fn block_is_passed_through_verbatim() {
        let batch = SdfFile::read_from_str(TWO_POSES).unwrap();
        let block = &batch.entries[0].block;
        assert!(block.starts_with("pose-a\n     RDKit          3D\n"));
        assert!(block.ends_with("library A\nbatch 3\n"));
        assert!(!block.contains(RECORD_DELIMITER));
    }

    #[test]
    fn short_and_malformed_entries_are_skipped_with_reason() {
        let text = "only\ntwo lines\n$$$$\ntitle\nprog\n\n  x  0\nC\n$$$$\n";
        let batch = SdfFile::read_from_str(text).unwrap();
        assert!(batch.entries.is_empty());
        assert_eq!(batch.skipped.len(), 2);
        assert_eq!(
            batch.skipped[0].reason,
            SdfParseErrorKind::TooShort { lines: 2 }
        );
        assert!(matches!(
            batch.skipped[1].reason,
            SdfParseErrorKind::InvalidCounts { .. }
        ));
        assert_eq!(batch.skipped[1].index, 1);
    }

    #[test]
    fn declared_atoms_beyond_entry_are_reported() {
        let text = "t\np\nc\n  5  0  0  0  0  0  0  0  0  0999 V2000\n    0.0 0.0 0.0 C\n$$$$\n";
        let batch = SdfFile::read_from_str(text).unwrap();
        assert_eq!(
            batch.skipped[0].reason,
            SdfParseErrorKind::MissingAtomLines {
                expected: 5,
                found: 1
            }
        );
    }

    #[test]
    fn limit_stops_reading_and_flags_truncation() {
        let batch = SdfFile::read_with_limit(&mut TWO_POSES.as_bytes(), Some(1)).unwrap();
        assert_eq!(batch.entries.len(), 1);
        assert!(batch.truncated);

        let batch = SdfFile::read_with_limit(&mut TWO_POSES.as_bytes(), Some(2)).unwrap();
        assert_eq!(batch.entries.len(), 2);
        assert!(!batch.truncated);
    }

    #[test]
    fn last_entry_without_delimiter_is_read() {
        let text = TWO_POSES.trim_end().trim_end_matches(RECORD_DELIMITER);
        let batch = SdfFile::read_from_str(text).unwrap();
        assert_eq!(batch.entries.len(), 2);
    }

    #[test]
    fn v3000_atom_block_is_read() {
        let text = "\
v3
  tool
note
  0  0  0     0  0            999 V3000
M  V30 BEGIN CTAB
M  V30 COUNTS 2 1 0 0 0
M  V30 BEGIN ATOM
M  V30 1 C 0.0 0.0 0.0 0
M  V30 2 Cl 1.7 0.0 0.0 0
M  V30 END ATOM
M  V30 END CTAB
M  END
> <score>
-5.0

$$$$
";
        let batch = SdfFile::read_from_str(text).unwrap();
        let entry = &batch.entries[0];
        assert_eq!(entry.elements(), vec!["C", "Cl"]);
        assert_eq!(entry.properties.get("score"), Some(&PropertyValue::Number(-5.0)));
    }

    #[test]
    fn written_records_keep_their_names_when_read_back() {
        let batch = SdfFile::read_from_str(TWO_POSES).unwrap();
        let records: Vec<LigandRecord> = batch
            .entries
            .iter()
            .rev()
            .map(|e| LigandRecord::new(e.index, e.name(), e.block.clone()))
            .collect();

        let mut out = Vec::new();
        SdfFile::write_records(&records, &mut out).unwrap();
        let reread = SdfFile::read_from_str(&String::from_utf8(out).unwrap()).unwrap();

        let names: Vec<String> = reread.entries.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Ligand_2", "pose-a"]);
        assert_eq!(reread.entries[1].block, batch.entries[0].block);
        assert_eq!(
            reread.entries[0].block.split_once('\n').map(|(_, rest)| rest),
            batch.entries[1].block.split_once('\n').map(|(_, rest)| rest)
        );
    }

    #[test]
    fn oversized_counts_are_rejected_without_allocating() {
        let text = "t\np\nc\n   18446744073709551615  0\n    0.0 0.0 0.0 C\n$$$$\n";
        let batch = SdfFile::read_from_str(text).unwrap();
        assert!(batch.entries.is_empty());
        assert!(matches!(
            batch.skipped[0].reason,
            SdfParseErrorKind::InvalidCounts { .. }
        ));

        let text = "t\np\nc\n   99999  0\n    0.0 0.0 0.0 C\n$$$$\n";
        let batch = SdfFile::read_from_str(text).unwrap();
        assert!(matches!(
            batch.skipped[0].reason,
            SdfParseErrorKind::InvalidCounts { .. }
        ));
    }

    #[test]
    fn charges_come_from_atom_block_or_charge_lines() {
        let text = "\
acetate
  prog

  4  3  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    1.5000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    2.2000    1.2000    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0
    2.2000   -1.2000    0.0000 O   0  5  0  0  0  0  0  0  0  0  0  0
  1  2  1  0
  2  3  2  0
  2  4  1  0
M  END
$$$$
";
        let batch = SdfFile::read_from_str(text).unwrap();
        let entry = &batch.entries[0];
        assert_eq!(entry.atoms[3].charge, -1);
        assert_eq!(entry.bonds[1].order, BondOrder::Double);

        let with_chg = text.replace("M  END", "M  CHG  1   3  -1\nM  END");
        let batch = SdfFile::read_from_str(&with_chg).unwrap();
        let charges: Vec<i32> = batch.entries[0].atoms.iter().map(|a| a.charge).collect();
        assert_eq!(charges, vec![0, 0, -1, 0]);
    }

    #[test]
    fn broken_bond_block_skips_the_entry() {
        let missing = "t\np\nc\n  2  1  0  0  0  0  0  0  0  0999 V2000\n    0.0 0.0 0.0 C\n    1.5 0.0 0.0 C\n$$$$\n";
        let batch = SdfFile::read_from_str(missing).unwrap();
        assert_eq!(
            batch.skipped[0].reason,
            SdfParseErrorKind::MissingBondLines {
                expected: 1,
                found: 0
            }
        );

        let out_of_range = missing.replace("C\n$$$$", "C\n  1  7  1  0\n$$$$");
        let batch = SdfFile::read_from_str(&out_of_range).unwrap();
        assert!(matches!(
            batch.skipped[0].reason,
            SdfParseErrorKind::InvalidBondLine { line: 7, .. }
        ));
    }
}
