use serde::Serialize;
use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use super::collisions::MassComparison;
use crate::plate::WellId;

/// How many clashing wells are listed in the text report
const MAX_LISTED_WELLS: usize = 20;

/// Per-well clash count and mass statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellDiagnostics {
    /// Well described
    pub well: WellId,
    /// Number of compounds in the well
    pub compounds: usize,
    /// Number of clashing pairs
    pub clashes: usize,
    /// Mean mass
    pub mean_mass: f64,
    /// Population variance of the masses
    pub mass_variance: f64,
    /// Lightest compound
    pub min_mass: f64,
    /// Heaviest compound
    pub max_mass: f64,
}

/// How closely the per-well mass distributions follow the overall one
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    /// Mean mass over all compounds
    pub global_mean: f64,
    /// Variance of all compound masses
    pub global_variance: f64,
    /// Mean of the per-well means
    pub mean_of_well_means: f64,
    /// Variance of the per-well means; small means every well samples the whole range
    pub variance_of_well_means: f64,
    /// Number of wells with at least one clash
    pub wells_with_clashes: usize,
}

/// Clash diagnostics for a pooling plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollisionReport {
    /// Threshold used for the scan
    pub resolution: f64,
    /// Sum of clashes over all wells
    pub total_clashes: usize,
    /// Diagnostics per well, in plan order
    pub wells: Vec<WellDiagnostics>,
    /// Every pairwise comparison, clash or not
    #[serde(skip)]
    pub comparisons: Vec<MassComparison>,
    /// Distribution shape summary
    pub distribution: DistributionSummary,
}

impl CollisionReport {
    /// Comparisons flagged as clashes
    pub fn clashes(&self) -> impl Iterator<Item = &MassComparison> {
        self.comparisons.iter().filter(|c| c.clash)
    }

    /// Diagnostics for one well
    pub fn diagnostics_for(&self, well: &WellId) -> Option<&WellDiagnostics> {
        self.wells.iter().find(|d| &d.well == well)
    }

    /// True if no well contains a clash
    pub fn is_clean(&self) -> bool {
        self.total_clashes == 0
    }

    fn clashing_wells(&self) -> impl Iterator<Item = &WellDiagnostics> {
        self.wells.iter().filter(|d| d.clashes > 0)
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();

            output.push_str(&format!("{}\n", style("Pooling Collision Report").bold().cyan()));
            output.push_str(&format!("{}\n", style("========================").cyan()));
            output.push_str(&format!(
                "{}: {} Da\n",
                style("Resolution").bold(),
                self.resolution
            ));
            output.push_str(&format!("{}: {}\n", style("Wells").bold(), self.wells.len()));
            output.push_str(&format!(
                "{}: mean {:.4}, variance of well means {:.4} (global variance {:.4})\n\n",
                style("Distribution").bold(),
                self.distribution.global_mean,
                self.distribution.variance_of_well_means,
                self.distribution.global_variance
            ));

            for d in self.clashing_wells().take(MAX_LISTED_WELLS) {
                output.push_str(&format!(
                    "[{}] {} - {} clashes among {} compounds\n",
                    style("✗").red(),
                    style(d.well).yellow(),
                    d.clashes,
                    d.compounds
                ));
            }
            let hidden = self.distribution.wells_with_clashes.saturating_sub(MAX_LISTED_WELLS);
            if hidden > 0 {
                output.push_str(&format!("... and {} more wells with clashes\n", hidden));
            }

            output.push('\n');
            if self.is_clean() {
                output.push_str(&format!("{}\n", style("No mass clashes").green().bold()));
            } else {
                output.push_str(&format!(
                    "{}: {} clashes in {} wells\n",
                    style("Summary").bold(),
                    style(self.total_clashes).red(),
                    style(self.distribution.wells_with_clashes).red()
                ));
            }

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for CollisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pooling Collision Report")?;
        writeln!(f, "========================")?;
        writeln!(f, "Resolution: {} Da", self.resolution)?;
        writeln!(f, "Wells: {}", self.wells.len())?;
        writeln!(
            f,
            "Distribution: mean {:.4}, variance of well means {:.4} (global variance {:.4})",
            self.distribution.global_mean,
            self.distribution.variance_of_well_means,
            self.distribution.global_variance
        )?;
        writeln!(f)?;

        for d in self.clashing_wells().take(MAX_LISTED_WELLS) {
            writeln!(
                f,
                "[✗] {} - {} clashes among {} compounds",
                d.well, d.clashes, d.compounds
            )?;
        }
        let hidden = self.distribution.wells_with_clashes.saturating_sub(MAX_LISTED_WELLS);
        if hidden > 0 {
            writeln!(f, "... and {} more wells with clashes", hidden)?;
        }

        writeln!(f)?;
        if self.is_clean() {
            writeln!(f, "No mass clashes")?;
        } else {
            writeln!(
                f,
                "Summary: {} clashes in {} wells",
                self.total_clashes, self.distribution.wells_with_clashes
            )?;
        }
        Ok(())
    }
}
