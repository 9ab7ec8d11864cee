//! TOML configuration file support.
//!
//! Settings that are the same for every run of a screening campaign can live
//! in a config file instead of being repeated on the command line:
//!
//! ```toml
//! # masspool.toml
//! [annotate]
//! smiles_column = "SMILES"
//! on_error = "skip"
//!
//! [pool]
//! total_wells = 384
//! threshold = 0.005
//! plate_format = 384
//! policy = "serpentine"
//!
//! [transfer]
//! src_plate = "SourcePlate"
//! src_well = "SourceWell"
//! dest_plate = "PoolPlate"
//! dest_well = "PoolWell"
//! transfer_volume = 2.5
//!
//! [lookup]
//! dest_plate = "PoolPlate"
//! dest_well = "PoolWell"
//! sample_col = "sample"
//! formula_col = "MolecularFormula"
//! ```
//!
//! Flags given on the command line always win over file values.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use masspool::annotate::FailurePolicy;
use masspool::chem::StructureKind;
use masspool::plate::PlateFormat;
use masspool::pooling::AssignmentPolicy;
use masspool::table::Delimiter;

/// Root configuration structure for masspool.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Settings for `annotate`.
    #[serde(default)]
    pub annotate: AnnotateConfig,

    /// Settings for `pool`.
    #[serde(default)]
    pub pool: PoolConfig,

    /// Settings for `transfer`.
    #[serde(default)]
    pub transfer: TransferConfig,

    /// Settings for `lookup`.
    #[serde(default)]
    pub lookup: LookupConfig,
}

/// Configuration for the annotate command.
#[derive(Debug, Default, Deserialize)]
pub struct AnnotateConfig {
    pub sample_column: Option<String>,
    pub smiles_column: Option<String>,
    pub structure_kind: Option<StructureKind>,
    pub on_error: Option<FailurePolicy>,
    pub delimiter: Option<Delimiter>,
}

/// Configuration for the pool command.
#[derive(Debug, Default, Deserialize)]
pub struct PoolConfig {
    /// Compounds per well; mutually exclusive with `total_wells`.
    pub compounds_per_well: Option<usize>,

    /// Number of wells; mutually exclusive with `compounds_per_well`.
    pub total_wells: Option<usize>,

    /// Hard cap on compounds per well.
    pub max_per_well: Option<usize>,

    /// Mass-resolution threshold in Da.
    pub threshold: Option<f64>,

    /// Output file prefix.
    pub output_prefix: Option<String>,

    pub delimiter: Option<Delimiter>,
    pub sample_column: Option<String>,
    pub exact_mass_column: Option<String>,
    pub plate_format: Option<PlateFormat>,
    pub policy: Option<AssignmentPolicy>,

    /// Append a timestamp to output file names (default true).
    pub timestamp: Option<bool>,
}

/// Configuration for the transfer command.
#[derive(Debug, Default, Deserialize)]
pub struct TransferConfig {
    pub src_plate: Option<String>,
    pub src_well: Option<String>,
    pub dest_plate: Option<String>,
    pub dest_well: Option<String>,

    /// Transfer volume in nL.
    pub transfer_volume: Option<f64>,

    pub delimiter: Option<Delimiter>,
    pub log_file: Option<PathBuf>,
}

/// Configuration for the lookup command.
#[derive(Debug, Default, Deserialize)]
pub struct LookupConfig {
    pub dest_plate: Option<String>,
    pub dest_well: Option<String>,
    pub sample_col: Option<String>,
    pub formula_col: Option<String>,
    pub delimiter: Option<Delimiter>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load the file if one was given, otherwise use an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// A value that has no default: take it from the command line or the config file.
pub fn required<T>(cli: Option<T>, file: Option<T>, flag: &str, key: &str) -> Result<T> {
    match cli.or(file) {
        Some(value) => Ok(value),
        None => bail!("Missing {} (or `{}` in the config file)", flag, key),
    }
}
