use dockview::engine::config::ResidueSelection;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Residue selection cannot be empty.")]
    EmptySelection,

    #[error("Invalid residue number '{0}' in selection.")]
    InvalidResidueNumber(String),

    #[error("Invalid residue range '{0}'. Expected 'start-end' (e.g., '200-249').")]
    InvalidRange(String),
}

/// Parses `200-249` (inclusive range) or `219,262,275` (explicit list).
///
/// A single number selects one residue. Negative residue numbers are only
/// accepted in list form.
pub fn parse_residue_selection(text: &str) -> Result<ResidueSelection, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::EmptySelection);
    }

    if !text.contains(',') {
        if let Some((start, end)) = text.split_once('-').filter(|(start, _)| !start.is_empty()) {
            let parse = |s: &str| {
                s.trim()
                    .parse::<isize>()
                    .map_err(|_| ParseError::InvalidRange(text.to_string()))
            };
            return Ok(ResidueSelection::Range {
                start: parse(start)?,
                end: parse(end)?,
            });
        }
    }

    let residues = text
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<isize>()
                .map_err(|_| ParseError::InvalidResidueNumber(s.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if residues.is_empty() {
        return Err(ParseError::EmptySelection);
    }
    Ok(ResidueSelection::List(residues))
}
