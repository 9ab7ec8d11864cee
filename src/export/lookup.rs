use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{ExportError, LookupFormatter};
use crate::plate::WellPosition;
use crate::table::{StagedOutputs, Table};

/// Input columns used to build lookup files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupColumns {
    /// Destination plate
    pub plate: String,
    /// Destination well
    pub well: String,
    /// Compound name written to the lookup
    pub sample: String,
    /// Molecular formula
    pub formula: String,
}

/// One compound in a lookup file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupEntry {
    /// Compound name
    pub name: String,
    /// Molecular formula, possibly empty
    pub formula: String,
}

/// All compounds measured together in one plate well
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupGroup {
    /// Plate as written in the input
    pub plate: String,
    /// Well as written in the input
    pub well: String,
    /// Compounds in input order
    pub entries: Vec<LookupEntry>,
}

fn compare_plates(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

fn compare_wells(a: &str, b: &str) -> Ordering {
    match (a.parse::<WellPosition>(), b.parse::<WellPosition>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

fn checked_field(row: usize, column: &str, value: &str) -> Result<String, ExportError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ExportError::EmptyField {
            row,
            column: column.to_string(),
        });
    }
    if value.contains(['/', '\\']) || value == ".." {
        return Err(ExportError::UnsafeFileName {
            row,
            column: column.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value.to_string())
}

/// Group table rows by (plate, well)
///
/// Plates are ordered numerically when they parse as numbers, wells by
/// row and then column. Rows keep their input order within a group.
pub fn group_by_well(
    table: &Table,
    columns: &LookupColumns,
) -> Result<Vec<LookupGroup>, ExportError> {
    let plate_idx = table.column_index(&columns.plate)?;
    let well_idx = table.column_index(&columns.well)?;
    let sample_idx = table.column_index(&columns.sample)?;
    let formula_idx = table.column_index(&columns.formula)?;

    let mut groups: Vec<LookupGroup> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for (i, row) in table.rows.iter().enumerate() {
        let n = i + 1;
        let plate = checked_field(n, &columns.plate, &row[plate_idx])?;
        let well = checked_field(n, &columns.well, &row[well_idx])?;
        let entry = LookupEntry {
            name: row[sample_idx].trim().to_string(),
            formula: row[formula_idx].trim().to_string(),
        };
        if entry.formula.is_empty() {
            warn!(
                "Row {} (sample '{}'): no formula; PCDL needs a formula or mass to import it",
                n, entry.name
            );
        }

        let slot = *index.entry((plate.clone(), well.clone())).or_insert_with(|| {
            groups.push(LookupGroup {
                plate,
                well,
                entries: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].entries.push(entry);
    }

    groups.sort_by(|a, b| {
        compare_plates(&a.plate, &b.plate).then_with(|| compare_wells(&a.well, &b.well))
    });
    Ok(groups)
}

/// Write one lookup file per group into `dir`, creating it if needed
///
/// Files are persisted only once every group has been written. A directory
/// created by a failed call is removed again.
pub fn write_lookup_files<P: AsRef<Path>>(
    formatter: &dyn LookupFormatter,
    groups: &[LookupGroup],
    dir: P,
) -> Result<Vec<PathBuf>, ExportError> {
    let dir = dir.as_ref();
    let created = !dir.exists();
    fs::create_dir_all(dir)?;

    let result = stage_groups(formatter, groups, dir)
        .and_then(|outputs| outputs.commit().map_err(ExportError::from));
    match result {
        Ok(written) => {
            for path in &written {
                info!("Saved {}", path.display());
            }
            Ok(written)
        }
        Err(e) => {
            if created {
                let _ = fs::remove_dir(dir);
            }
            Err(e)
        }
    }
}

fn stage_groups(
    formatter: &dyn LookupFormatter,
    groups: &[LookupGroup],
    dir: &Path,
) -> Result<StagedOutputs, ExportError> {
    let mut outputs = StagedOutputs::new();
    for (ordinal, group) in groups.iter().enumerate() {
        let path = dir.join(formatter.file_name(group, ordinal));
        outputs.stage(&path, |out| formatter.write_group(group, out))?;
    }
    Ok(outputs)
}
