use log::{debug, info};

use super::collisions::scan_wells;
use super::{CollisionReport, CompoundRecord, PoolingConfig, PoolingError, PoolingLayout};
use crate::plate::{PlateFormat, WellId};
use crate::table::Table;

/// Column appended with the pool plate number
pub const POOL_PLATE_COLUMN: &str = "PoolPlate";

/// Column appended with the pool well name
pub const POOL_WELL_COLUMN: &str = "PoolWell";

/// Compounds assigned to one well, in ascending mass order
#[derive(Debug, Clone, PartialEq)]
pub struct WellAssignment {
    /// Destination well
    pub well: WellId,
    /// Compounds pooled into the well
    pub compounds: Vec<CompoundRecord>,
}

impl WellAssignment {
    /// Masses of the pooled compounds
    pub fn masses(&self) -> impl Iterator<Item = f64> + '_ {
        self.compounds.iter().map(|c| c.exact_mass)
    }
}

/// Result of pooling: every input compound in exactly one well
#[derive(Debug, Clone, PartialEq)]
pub struct PoolingPlan {
    layout: PoolingLayout,
    plate_format: PlateFormat,
    wells: Vec<WellAssignment>,
}

impl PoolingPlan {
    /// Resolved well count and capacity
    pub fn layout(&self) -> &PoolingLayout {
        &self.layout
    }

    /// Plate format used to name the wells
    pub fn plate_format(&self) -> PlateFormat {
        self.plate_format
    }

    /// Well assignments in plate, row, column order
    pub fn wells(&self) -> &[WellAssignment] {
        &self.wells
    }

    /// Total number of pooled compounds
    pub fn compound_count(&self) -> usize {
        self.wells.iter().map(|w| w.compounds.len()).sum()
    }

    /// Well holding the given sample, if any
    pub fn well_of(&self, sample_id: &str) -> Option<WellId> {
        self.wells
            .iter()
            .find(|w| w.compounds.iter().any(|c| c.sample_id == sample_id))
            .map(|w| w.well)
    }

    /// Scan every well for mass clashes
    pub fn collision_report(&self, resolution: f64) -> CollisionReport {
        scan_wells(&self.wells, resolution)
    }

    /// Pooled table: source columns plus `PoolPlate` and `PoolWell`,
    /// ordered by plate, row and column
    pub fn to_table(&self, headers: &[String]) -> Table {
        let mut out_headers = headers.to_vec();
        out_headers.push(POOL_PLATE_COLUMN.to_string());
        out_headers.push(POOL_WELL_COLUMN.to_string());

        let mut table = Table::new(out_headers);
        for assignment in &self.wells {
            for compound in &assignment.compounds {
                let mut row = compound.fields.clone();
                row.push(assignment.well.plate.to_string());
                row.push(assignment.well.position.to_string());
                table.rows.push(row);
            }
        }
        table
    }
}

/// Sorts compounds by exact mass and deals them across wells
#[derive(Debug, Clone)]
pub struct PoolingEngine {
    config: PoolingConfig,
}

impl PoolingEngine {
    /// Create an engine with the given configuration
    pub fn new(config: PoolingConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &PoolingConfig {
        &self.config
    }

    /// Assign every record to a well
    ///
    /// The sort is stable, so compounds of equal mass keep their input
    /// order and the result is fully deterministic.
    pub fn pool(&self, mut records: Vec<CompoundRecord>) -> Result<PoolingPlan, PoolingError> {
        let layout = self.config.validate(records.len())?;

        if let Some(bad) = records.iter().find(|r| !r.exact_mass.is_finite()) {
            return Err(PoolingError::MissingMass {
                row: bad.input_index + 1,
                sample: bad.sample_id.clone(),
                value: bad.exact_mass.to_string(),
            });
        }

        info!(
            "Pooling {} compounds into {} wells ({} per well, {} policy, {}-well plates)",
            layout.compound_count,
            layout.total_wells,
            layout.compounds_per_well,
            self.config.policy,
            self.config.plate_format
        );

        records.sort_by(|a, b| a.exact_mass.total_cmp(&b.exact_mass));

        let mut wells: Vec<WellAssignment> = (0..layout.total_wells)
            .map(|k| WellAssignment {
                well: self.config.plate_format.well_for_index(k),
                compounds: Vec::with_capacity(layout.compounds_per_well),
            })
            .collect();

        for (i, record) in records.into_iter().enumerate() {
            let k = self.config.policy.well_index(i, layout.total_wells);
            wells[k].compounds.push(record);
        }

        for assignment in &wells {
            debug!(
                "Well {}: {} compounds",
                assignment.well,
                assignment.compounds.len()
            );
        }

        Ok(PoolingPlan {
            layout,
            plate_format: self.config.plate_format,
            wells,
        })
    }
}
