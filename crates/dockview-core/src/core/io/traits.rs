use crate::core::scoring::ranking::Ranking;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading structure files.
///
/// Implementors handle format-specific parsing; the path and string helpers are
/// shared.
pub trait StructureReader {
    /// What a successful read produces.
    type Output;

    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads a structure file from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader fails or the content cannot be used at all.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error>;

    /// Reads a structure file from a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Output, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Reads a structure file already held in memory.
    fn read_from_str(text: &str) -> Result<Self::Output, Self::Error> {
        Self::read_from(&mut text.as_bytes())
    }
}

/// Defines the interface for writing a ranking to an output format.
pub trait RankingWriter {
    /// The error type for write operations.
    type Error: Error + From<io::Error>;

    /// Writes the ranking, in rank order, to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(ranking: &Ranking, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Writes the ranking to a file path, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(ranking: &Ranking, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(ranking, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
