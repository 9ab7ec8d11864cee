//! # Mass Annotation
//!
//! Adds `ExactMass` and `MolecularFormula` columns to a compound table,
//! computing both from a structure column through a [`MassCalculator`].

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::chem::{ChemError, MassCalculator};
use crate::table::{Table, TableError};

/// Column written with the monoisotopic mass
pub const EXACT_MASS_COLUMN: &str = "ExactMass";

/// Column written with the Hill-notation formula
pub const MOLECULAR_FORMULA_COLUMN: &str = "MolecularFormula";

/// Suffix appended to the output stem
pub const OUTPUT_SUFFIX: &str = "_exactmass_and_formula.txt";

/// Errors that can occur during annotation
#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    /// Reading or writing the table failed
    #[error("Table error: {0}")]
    TableError(#[from] TableError),

    /// A structure could not be interpreted and the policy is to halt
    #[error("Row {row} (sample '{sample}'): {source}")]
    Structure {
        /// 1-based data row number
        row: usize,
        /// Sample identifier of the row
        sample: String,
        /// Underlying chemistry error
        #[source]
        source: ChemError,
    },
}

/// What to do with a row whose structure cannot be interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Keep the row with empty mass and formula fields
    #[default]
    Blank,
    /// Drop the row
    Skip,
    /// Abort the whole run
    Halt,
}

/// Column names and failure handling for annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotateOptions {
    /// Column holding the sample identifier
    pub sample_column: String,
    /// Column holding the structure (SMILES or formula)
    pub structure_column: String,
    /// Failure policy for uninterpretable structures
    pub on_error: FailurePolicy,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            sample_column: "sample".to_string(),
            structure_column: "MOLSMILES".to_string(),
            on_error: FailurePolicy::Blank,
        }
    }
}

/// Row counts from an annotation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationStats {
    /// Rows read
    pub rows: usize,
    /// Rows with a computed mass and formula
    pub annotated: usize,
    /// Rows whose structure failed and were kept blank
    pub failed: usize,
    /// Rows whose structure failed and were dropped
    pub skipped: usize,
}

impl fmt::Display for AnnotationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Annotated {} of {} rows ({} blank, {} skipped)",
            self.annotated, self.rows, self.failed, self.skipped
        )
    }
}

/// Output path for a given stem: `<stem>_exactmass_and_formula.txt`
pub fn output_path<P: AsRef<Path>>(stem: P) -> PathBuf {
    let mut name = stem.as_ref().as_os_str().to_owned();
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}

/// Annotate every row of `table` in place
pub fn annotate_table(
    table: &mut Table,
    calculator: &dyn MassCalculator,
    options: &AnnotateOptions,
) -> Result<AnnotationStats, AnnotateError> {
    let sample_idx = table.column_index(&options.sample_column)?;
    let structure_idx = table.column_index(&options.structure_column)?;

    let mass_idx = match table.column_index(EXACT_MASS_COLUMN) {
        Ok(idx) => idx,
        Err(_) => table.push_column(EXACT_MASS_COLUMN, ""),
    };
    let formula_idx = match table.column_index(MOLECULAR_FORMULA_COLUMN) {
        Ok(idx) => idx,
        Err(_) => table.push_column(MOLECULAR_FORMULA_COLUMN, ""),
    };

    let mut stats = AnnotationStats {
        rows: table.len(),
        ..Default::default()
    };

    let rows = std::mem::take(&mut table.rows);
    let mut kept = Vec::with_capacity(rows.len());

    for (i, mut row) in rows.into_iter().enumerate() {
        let row_number = i + 1;
        match calculator.calculate(&row[structure_idx]) {
            Ok(annotation) => {
                debug!(
                    "Row {}: {} -> {} ({})",
                    row_number, row[sample_idx], annotation.formula, annotation.exact_mass
                );
                row[mass_idx] = annotation.exact_mass.to_string();
                row[formula_idx] = annotation.formula;
                stats.annotated += 1;
                kept.push(row);
            }
            Err(source) => match options.on_error {
                FailurePolicy::Halt => {
                    return Err(AnnotateError::Structure {
                        row: row_number,
                        sample: row[sample_idx].clone(),
                        source,
                    });
                }
                FailurePolicy::Blank => {
                    warn!(
                        "Row {} (sample '{}'): {}; leaving mass and formula empty",
                        row_number, row[sample_idx], source
                    );
                    row[mass_idx].clear();
                    row[formula_idx].clear();
                    stats.failed += 1;
                    kept.push(row);
                }
                FailurePolicy::Skip => {
                    warn!(
                        "Row {} (sample '{}'): {}; dropping row",
                        row_number, row[sample_idx], source
                    );
                    stats.skipped += 1;
                }
            },
        }
    }

    table.rows = kept;
    info!("{}", stats);
    Ok(stats)
}
