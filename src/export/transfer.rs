use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{ExportError, TransferFormatter};
use crate::plate::WellPosition;
use crate::table::{remove_outputs, write_atomic, Table};

/// Input columns that describe one liquid transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferColumns {
    /// Source plate name
    pub source_plate: String,
    /// Source well (e.g. `A01`)
    pub source_well: String,
    /// Destination plate name
    pub destination_plate: String,
    /// Destination well
    pub destination_well: String,
}

/// A well name together with the numeric position it was converted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedWell {
    /// Well as written in the input
    pub well: String,
    /// Parsed position
    pub position: WellPosition,
}

impl ConvertedWell {
    fn parse(well: &str, row: usize, column: &str) -> Result<Self, ExportError> {
        let position = well.parse().map_err(|source| ExportError::InvalidWell {
            row,
            column: column.to_string(),
            source,
        })?;
        Ok(Self {
            well: well.to_string(),
            position,
        })
    }
}

impl fmt::Display for ConvertedWell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Converting Well '{}': Row '{}' -> {}, Column '{}'",
            self.well,
            self.position.row_letters(),
            self.position.row,
            self.position.column
        )
    }
}

/// One source-to-destination transfer
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    /// Source plate name
    pub source_plate: String,
    /// Source well
    pub source: ConvertedWell,
    /// Destination plate name
    pub destination_plate: String,
    /// Destination well
    pub destination: ConvertedWell,
    /// Volume in nanolitres
    pub volume: f64,
}

/// Build one transfer per table row with a fixed volume
pub fn collect_transfers(
    table: &Table,
    columns: &TransferColumns,
    volume: f64,
) -> Result<Vec<Transfer>, ExportError> {
    if !volume.is_finite() || volume <= 0.0 {
        return Err(ExportError::InvalidVolume(volume));
    }

    let src_plate = table.column_index(&columns.source_plate)?;
    let src_well = table.column_index(&columns.source_well)?;
    let dst_plate = table.column_index(&columns.destination_plate)?;
    let dst_well = table.column_index(&columns.destination_well)?;

    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let n = i + 1;
            Ok(Transfer {
                source_plate: row[src_plate].clone(),
                source: ConvertedWell::parse(row[src_well].trim(), n, &columns.source_well)?,
                destination_plate: row[dst_plate].clone(),
                destination: ConvertedWell::parse(
                    row[dst_well].trim(),
                    n,
                    &columns.destination_well,
                )?,
                volume,
            })
        })
        .collect()
}

/// Every well conversion: all source wells, then all destination wells
pub fn conversions(transfers: &[Transfer]) -> impl Iterator<Item = &ConvertedWell> {
    transfers
        .iter()
        .map(|t| &t.source)
        .chain(transfers.iter().map(|t| &t.destination))
}

/// Append one line per well conversion to a log file
pub fn append_conversion_log<P: AsRef<Path>>(
    transfers: &[Transfer],
    path: P,
) -> Result<(), ExportError> {
    let mut lines = String::new();
    for conversion in conversions(transfers) {
        lines.push_str(&conversion.to_string());
        lines.push('\n');
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;
    file.write_all(lines.as_bytes())?;
    Ok(())
}

/// Add the formatter's extension unless the path already ends with it
pub fn with_extension<P: AsRef<Path>>(path: P, extension: &str) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_some_and(|e| e == extension) {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Write transfers through `formatter`; returns the final output path
pub fn write_transfer_file<P: AsRef<Path>>(
    formatter: &dyn TransferFormatter,
    transfers: &[Transfer],
    path: P,
) -> Result<PathBuf, ExportError> {
    for conversion in conversions(transfers) {
        debug!("{}", conversion);
    }

    let path = with_extension(path, formatter.extension());
    write_atomic(&path, |out| formatter.write_transfers(transfers, out))?;
    info!("Wrote {} transfers to {}", transfers.len(), path.display());
    Ok(path)
}

/// Write the transfer file and, when `log` is given, append the conversion log
///
/// If the log cannot be written, the transfer file written by this call is
/// removed again.
pub fn write_transfer_outputs<P: AsRef<Path>>(
    formatter: &dyn TransferFormatter,
    transfers: &[Transfer],
    path: P,
    log: Option<&Path>,
) -> Result<PathBuf, ExportError> {
    let output = write_transfer_file(formatter, transfers, path)?;
    if let Some(log) = log {
        if let Err(e) = append_conversion_log(transfers, log) {
            remove_outputs(std::slice::from_ref(&output));
            return Err(e);
        }
        info!("Appended well conversions to {}", log.display());
    }
    Ok(output)
}
