use log::info;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::report::{DistributionSummary, WellDiagnostics};
use super::{
    AssignmentPolicy, CollisionReport, PoolingConfig, PoolingError, PoolingLayout, PoolingPlan,
};
use crate::plate::PlateFormat;
use crate::table::{Delimiter, StagedOutputs};

/// Timestamp format used in output file names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Files written by a pooling run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Pooled compound table
    pub compounds: PathBuf,
    /// `Plate,Well,Collisions`
    pub collisions_summary: PathBuf,
    /// Every pairwise comparison
    pub comparisons: PathBuf,
    /// Per-well mass statistics
    pub well_stats: PathBuf,
    /// JSON run summary
    pub report: PathBuf,
}

impl OutputPaths {
    /// Build file names from a prefix, plate format and optional timestamp
    pub fn new(prefix: &str, plate_format: PlateFormat, timestamp: Option<&str>) -> Self {
        let suffix = timestamp.map(|t| format!("_{}", t)).unwrap_or_default();
        let fmt = plate_format.wells();
        Self {
            compounds: PathBuf::from(format!("{prefix}_plate{fmt}_compounds{suffix}.csv")),
            collisions_summary: PathBuf::from(format!(
                "{prefix}_plate{fmt}_collisions_summary{suffix}.csv"
            )),
            comparisons: PathBuf::from(format!(
                "{prefix}_exact_mass_comparisons_plate{fmt}{suffix}.csv"
            )),
            well_stats: PathBuf::from(format!("{prefix}_plate{fmt}_well_stats{suffix}.csv")),
            report: PathBuf::from(format!("{prefix}_plate{fmt}_report{suffix}.json")),
        }
    }

    /// All paths, in write order
    pub fn all(&self) -> [&Path; 5] {
        [
            self.compounds.as_path(),
            self.collisions_summary.as_path(),
            self.comparisons.as_path(),
            self.well_stats.as_path(),
            self.report.as_path(),
        ]
    }
}

/// Serializable summary of one pooling run
#[derive(Debug, Clone, Serialize)]
pub struct PoolingSummary<'a> {
    /// Crate version that produced the run
    pub version: &'static str,
    /// Resolved layout
    pub layout: &'a PoolingLayout,
    /// Plate format in wells
    pub plate_format: PlateFormat,
    /// Number of plates used
    pub plates: usize,
    /// Dealing order
    pub policy: AssignmentPolicy,
    /// Clash threshold
    pub resolution: f64,
    /// Total clashes
    pub total_clashes: usize,
    /// Distribution shape
    pub distribution: &'a DistributionSummary,
    /// Per-well diagnostics
    pub wells: &'a [WellDiagnostics],
}

impl<'a> PoolingSummary<'a> {
    /// Collect the summary for a finished run
    pub fn new(
        config: &PoolingConfig,
        plan: &'a PoolingPlan,
        report: &'a CollisionReport,
    ) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            layout: plan.layout(),
            plate_format: plan.plate_format(),
            plates: plan.layout().plate_count(plan.plate_format()),
            policy: config.policy,
            resolution: report.resolution,
            total_clashes: report.total_clashes,
            distribution: &report.distribution,
            wells: &report.wells,
        }
    }
}

fn csv_writer(out: &mut dyn Write) -> csv::Writer<&mut dyn Write> {
    csv::WriterBuilder::new()
        .delimiter(Delimiter::Comma.as_byte())
        .from_writer(out)
}

/// Write the pooled table and all diagnostic sidecars
///
/// Either all five files are written or none of them is.
pub fn write_outputs(
    config: &PoolingConfig,
    plan: &PoolingPlan,
    report: &CollisionReport,
    headers: &[String],
    paths: &OutputPaths,
) -> Result<(), PoolingError> {
    let mut outputs = StagedOutputs::new();

    let pooled = plan.to_table(headers);
    outputs.stage(&paths.compounds, |out| -> Result<(), PoolingError> {
        Ok(pooled.write_to(out, Delimiter::Comma)?)
    })?;

    outputs.stage(&paths.collisions_summary, |out| -> Result<(), PoolingError> {
        let mut w = csv_writer(out);
        w.write_record(["Plate", "Well", "Collisions"])?;
        for d in &report.wells {
            w.write_record([
                d.well.plate.to_string(),
                d.well.position.to_string(),
                d.clashes.to_string(),
            ])?;
        }
        w.flush()?;
        Ok(())
    })?;

    outputs.stage(&paths.comparisons, |out| -> Result<(), PoolingError> {
        let mut w = csv_writer(out);
        w.write_record(["Plate", "Well", "ID_1", "Mass_1", "ID_2", "Mass_2", "Comparison"])?;
        for c in &report.comparisons {
            w.write_record([
                c.well.plate.to_string(),
                c.well.position.to_string(),
                c.id_1.clone(),
                c.mass_1.to_string(),
                c.id_2.clone(),
                c.mass_2.to_string(),
                if c.clash { "Yes" } else { "No" }.to_string(),
            ])?;
        }
        w.flush()?;
        Ok(())
    })?;

    outputs.stage(&paths.well_stats, |out| -> Result<(), PoolingError> {
        let mut w = csv_writer(out);
        w.write_record([
            "Plate",
            "Well",
            "Compounds",
            "Collisions",
            "MeanMass",
            "MassVariance",
            "MinMass",
            "MaxMass",
        ])?;
        for d in &report.wells {
            w.write_record([
                d.well.plate.to_string(),
                d.well.position.to_string(),
                d.compounds.to_string(),
                d.clashes.to_string(),
                format!("{:.6}", d.mean_mass),
                format!("{:.6}", d.mass_variance),
                d.min_mass.to_string(),
                d.max_mass.to_string(),
            ])?;
        }
        w.flush()?;
        Ok(())
    })?;

    let summary = PoolingSummary::new(config, plan, report);
    outputs.stage(&paths.report, |out| -> Result<(), PoolingError> {
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        out.write_all(b"\n")?;
        Ok(())
    })?;

    for path in outputs.commit()? {
        info!("Wrote {}", path.display());
    }
    Ok(())
}
