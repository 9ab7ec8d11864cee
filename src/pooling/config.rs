use serde::{Deserialize, Serialize};
use std::fmt;

use super::PoolingError;
use crate::plate::PlateFormat;

/// Default mass-resolution threshold in Daltons
pub const DEFAULT_RESOLUTION: f64 = 0.1;

/// How the pool size is requested; the other quantity is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WellTarget {
    /// Fixed number of wells; compounds per well = ceil(N / W)
    TotalWells(usize),
    /// Fixed compounds per well; wells = ceil(N / C)
    CompoundsPerWell(usize),
}

/// Order in which mass-sorted compounds are dealt onto wells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentPolicy {
    /// Compound `i` goes to well `i mod W`
    #[default]
    RoundRobin,
    /// Alternate direction on every pass over the wells (0..W, then W..0)
    Serpentine,
}

impl AssignmentPolicy {
    /// Well index for the `i`-th compound in mass order
    pub fn well_index(self, i: usize, total_wells: usize) -> usize {
        let offset = i % total_wells;
        match self {
            AssignmentPolicy::RoundRobin => offset,
            AssignmentPolicy::Serpentine => {
                if (i / total_wells) % 2 == 0 {
                    offset
                } else {
                    total_wells - 1 - offset
                }
            }
        }
    }
}

impl fmt::Display for AssignmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentPolicy::RoundRobin => f.write_str("round-robin"),
            AssignmentPolicy::Serpentine => f.write_str("serpentine"),
        }
    }
}

/// Pooling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolingConfig {
    /// Requested well count or pool size
    pub target: WellTarget,
    /// Hard upper bound on compounds per well, if any
    pub max_compounds_per_well: Option<usize>,
    /// Two masses closer than this clash
    pub resolution: f64,
    /// Plate geometry used to name wells
    pub plate_format: PlateFormat,
    /// Dealing order
    pub policy: AssignmentPolicy,
}

impl PoolingConfig {
    /// Configuration for a fixed number of wells with default settings
    pub fn with_total_wells(total_wells: usize) -> Self {
        Self {
            target: WellTarget::TotalWells(total_wells),
            max_compounds_per_well: None,
            resolution: DEFAULT_RESOLUTION,
            plate_format: PlateFormat::default(),
            policy: AssignmentPolicy::default(),
        }
    }

    /// Configuration for a fixed pool size with default settings
    pub fn with_compounds_per_well(compounds_per_well: usize) -> Self {
        Self {
            target: WellTarget::CompoundsPerWell(compounds_per_well),
            ..Self::with_total_wells(1)
        }
    }

    /// Set the clash threshold
    pub fn resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the plate format
    pub fn plate_format(mut self, plate_format: PlateFormat) -> Self {
        self.plate_format = plate_format;
        self
    }

    /// Set the assignment policy
    pub fn policy(mut self, policy: AssignmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set a hard cap on compounds per well
    pub fn max_compounds_per_well(mut self, cap: usize) -> Self {
        self.max_compounds_per_well = Some(cap);
        self
    }

    /// Check the configuration against the number of compounds and resolve the layout
    pub fn validate(&self, compound_count: usize) -> Result<PoolingLayout, PoolingError> {
        if compound_count == 0 {
            return Err(PoolingError::Config("input contains no compounds".into()));
        }
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(PoolingError::Config(format!(
                "mass resolution must be a positive number, got {}",
                self.resolution
            )));
        }

        let total_wells = match self.target {
            WellTarget::TotalWells(0) => {
                return Err(PoolingError::Config("total wells must be at least 1".into()));
            }
            WellTarget::CompoundsPerWell(0) => {
                return Err(PoolingError::Config(
                    "compounds per well must be at least 1".into(),
                ));
            }
            WellTarget::TotalWells(w) if w > compound_count => {
                return Err(PoolingError::Config(format!(
                    "{} wells requested for {} compounds would leave empty wells",
                    w, compound_count
                )));
            }
            WellTarget::TotalWells(w) => w,
            WellTarget::CompoundsPerWell(c) => compound_count.div_ceil(c),
        };
        let compounds_per_well = compound_count.div_ceil(total_wells);

        if let Some(cap) = self.max_compounds_per_well {
            if cap == 0 {
                return Err(PoolingError::Config(
                    "maximum compounds per well must be at least 1".into(),
                ));
            }
            if compounds_per_well > cap {
                return Err(PoolingError::Config(format!(
                    "{} compounds over {} wells needs {} per well, above the maximum of {}",
                    compound_count, total_wells, compounds_per_well, cap
                )));
            }
        }

        Ok(PoolingLayout {
            compound_count,
            total_wells,
            compounds_per_well,
        })
    }
}

/// Resolved well count and capacity for one pooling run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolingLayout {
    /// Number of compounds pooled
    pub compound_count: usize,
    /// Number of wells used
    pub total_wells: usize,
    /// Largest number of compounds in any well
    pub compounds_per_well: usize,
}

impl PoolingLayout {
    /// Number of plates spanned by the wells
    pub fn plate_count(&self, plate_format: PlateFormat) -> usize {
        self.total_wells.div_ceil(plate_format.wells() as usize)
    }
}
