use super::PoolingError;
use crate::table::Table;

/// One compound to be pooled
///
/// `fields` holds the complete source row so that every input column is
/// carried through to the pooled table.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundRecord {
    /// Zero-based position in the input table
    pub input_index: usize,
    /// Sample identifier
    pub sample_id: String,
    /// Monoisotopic mass
    pub exact_mass: f64,
    /// All source fields, in header order
    pub fields: Vec<String>,
}

impl CompoundRecord {
    /// Create a record without extra source fields
    pub fn new(input_index: usize, sample_id: impl Into<String>, exact_mass: f64) -> Self {
        let sample_id = sample_id.into();
        Self {
            input_index,
            fields: vec![sample_id.clone(), exact_mass.to_string()],
            sample_id,
            exact_mass,
        }
    }

    /// Build records from an annotated table
    ///
    /// Every row must carry a finite mass; the first row without one is
    /// reported rather than dropped.
    pub fn from_table(
        table: &Table,
        sample_column: &str,
        mass_column: &str,
    ) -> Result<Vec<Self>, PoolingError> {
        let sample_idx = table.column_index(sample_column)?;
        let mass_idx = table.column_index(mass_column)?;

        table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let raw = row[mass_idx].trim();
                let exact_mass = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|m| m.is_finite())
                    .ok_or_else(|| PoolingError::MissingMass {
                        row: i + 1,
                        sample: row[sample_idx].clone(),
                        value: raw.to_string(),
                    })?;
                Ok(Self {
                    input_index: i,
                    sample_id: row[sample_idx].clone(),
                    exact_mass,
                    fields: row.clone(),
                })
            })
            .collect()
    }
}
