//! # Delimited Tables
//!
//! Every pipeline stage exchanges a plain delimited table. [`Table`] keeps
//! the header and every field as text so that columns a stage does not
//! understand pass through untouched.
//!
//! Output files are written through [`write_atomic`]: content goes to a
//! temporary file next to the destination and is renamed into place only
//! once complete. Stages that produce several files collect them in
//! [`StagedOutputs`] and persist them together, so a failed run leaves none
//! of its files behind.

mod error;

#[cfg(test)]
mod tests;

pub use error::TableError;

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Field delimiter of a table file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// Tab-separated
    #[default]
    Tab,
    /// Comma-separated
    Comma,
    /// Single-space-separated
    Space,
}

impl Delimiter {
    /// Delimiter byte for the CSV reader/writer
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Comma => b',',
            Delimiter::Space => b' ',
        }
    }
}

impl FromStr for Delimiter {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tab" => Ok(Delimiter::Tab),
            "comma" => Ok(Delimiter::Comma),
            "space" => Ok(Delimiter::Space),
            other => Err(TableError::UnsupportedDelimiter(other.to_string())),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Delimiter::Tab => "tab",
            Delimiter::Comma => "comma",
            Delimiter::Space => "space",
        };
        f.write_str(name)
    }
}

/// In-memory delimited table with a header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names, whitespace-trimmed
    pub headers: Vec<String>,
    /// Data rows; each has exactly `headers.len()` fields
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given header
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Read a table from a file
    pub fn read_path<P: AsRef<Path>>(path: P, delimiter: Delimiter) -> Result<Self, TableError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), delimiter)
    }

    /// Read a table from any reader
    pub fn from_reader<R: Read>(reader: R, delimiter: Delimiter) -> Result<Self, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter.as_byte())
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            // Blank trailing lines come through as a single empty field
            if record.len() == 1 && record[0].trim().is_empty() && headers.len() > 1 {
                continue;
            }
            if record.len() != headers.len() {
                return Err(TableError::RowWidth {
                    row: i + 1,
                    expected: headers.len(),
                    found: record.len(),
                });
            }
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Index of a named column
    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        let name = name.trim();
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Append a column, filling existing rows with `fill`
    pub fn push_column(&mut self, name: &str, fill: &str) -> usize {
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(fill.to_string());
        }
        self.headers.len() - 1
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table to any writer
    pub fn write_to<W: Write>(&self, writer: W, delimiter: Delimiter) -> Result<(), TableError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(delimiter.as_byte())
            .from_writer(writer);
        csv_writer.write_record(&self.headers)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the table to a file, replacing it atomically
    pub fn write_path<P: AsRef<Path>>(
        &self,
        path: P,
        delimiter: Delimiter,
    ) -> Result<(), TableError> {
        write_atomic(path, |out| self.write_to(out, delimiter))
    }
}

/// Write a file through a temporary sibling and rename it into place on success
pub fn write_atomic<P, F, E>(path: P, write: F) -> Result<(), E>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> Result<(), E>,
    E: From<io::Error>,
{
    let path = path.as_ref();
    let temp = write_temp(path, write)?;
    temp.persist(path).map_err(|e| E::from(e.error))?;
    Ok(())
}

fn write_temp<F, E>(path: &Path, write: F) -> Result<tempfile::NamedTempFile, E>
where
    F: FnOnce(&mut dyn Write) -> Result<(), E>,
    E: From<io::Error>,
{
    if path.is_dir() {
        return Err(E::from(io::Error::other(format!(
            "output path is a directory: {}",
            path.display()
        ))));
    }
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut buffered = BufWriter::new(temp.as_file_mut());
        write(&mut buffered)?;
        buffered.flush()?;
    }
    Ok(temp)
}

/// Output files written to temporaries and persisted as one unit
///
/// Nothing reaches its destination until [`StagedOutputs::commit`]. Dropping
/// the set without committing deletes every temporary.
#[derive(Debug, Default)]
pub struct StagedOutputs {
    staged: Vec<(tempfile::NamedTempFile, PathBuf)>,
}

impl StagedOutputs {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one file's content to a temporary next to `path`
    pub fn stage<P, F, E>(&mut self, path: P, write: F) -> Result<(), E>
    where
        P: AsRef<Path>,
        F: FnOnce(&mut dyn Write) -> Result<(), E>,
        E: From<io::Error>,
    {
        let path = path.as_ref();
        let temp = write_temp(path, write)?;
        self.staged.push((temp, path.to_path_buf()));
        Ok(())
    }

    /// Number of staged files
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    /// True if nothing has been staged
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Move every staged file into place
    ///
    /// If any rename fails, the files already moved by this call are removed
    /// again and the error is returned.
    pub fn commit(self) -> io::Result<Vec<PathBuf>> {
        let mut persisted: Vec<PathBuf> = Vec::with_capacity(self.staged.len());
        for (temp, path) in self.staged {
            if let Err(e) = temp.persist(&path) {
                remove_outputs(&persisted);
                return Err(e.error);
            }
            persisted.push(path);
        }
        Ok(persisted)
    }
}

/// Remove files written by a run that failed later on
pub fn remove_outputs(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            warn!("Could not remove {}: {}", path.display(), e);
        }
    }
}
