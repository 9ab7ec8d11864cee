use log::debug;
use serde::Serialize;

use super::report::{CollisionReport, DistributionSummary, WellDiagnostics};
use super::WellAssignment;
use crate::plate::WellId;

/// One pairwise mass comparison inside a well
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MassComparison {
    /// Well the pair shares
    pub well: WellId,
    /// First sample identifier
    pub id_1: String,
    /// First mass
    pub mass_1: f64,
    /// Second sample identifier
    pub id_2: String,
    /// Second mass
    pub mass_2: f64,
    /// True if the masses are closer than the resolution
    pub clash: bool,
}

/// Two masses clash when they differ by strictly less than the resolution
pub fn is_clash(mass_1: f64, mass_2: f64, resolution: f64) -> bool {
    (mass_1 - mass_2).abs() < resolution
}

fn mean_and_variance(masses: &[f64]) -> (f64, f64) {
    if masses.is_empty() {
        return (0.0, 0.0);
    }
    let n = masses.len() as f64;
    let mean = masses.iter().sum::<f64>() / n;
    let variance = masses.iter().map(|m| (m - mean).powi(2)).sum::<f64>() / n;
    (mean, variance)
}

fn scan_well(
    assignment: &WellAssignment,
    resolution: f64,
    comparisons: &mut Vec<MassComparison>,
) -> WellDiagnostics {
    let compounds = &assignment.compounds;
    let mut clashes = 0;

    for (i, a) in compounds.iter().enumerate() {
        for b in &compounds[i + 1..] {
            let clash = is_clash(a.exact_mass, b.exact_mass, resolution);
            if clash {
                clashes += 1;
                debug!(
                    "Clash in {}: {} ({}) vs {} ({})",
                    assignment.well, a.sample_id, a.exact_mass, b.sample_id, b.exact_mass
                );
            }
            comparisons.push(MassComparison {
                well: assignment.well,
                id_1: a.sample_id.clone(),
                mass_1: a.exact_mass,
                id_2: b.sample_id.clone(),
                mass_2: b.exact_mass,
                clash,
            });
        }
    }

    let masses: Vec<f64> = assignment.masses().collect();
    let (mean_mass, mass_variance) = mean_and_variance(&masses);
    WellDiagnostics {
        well: assignment.well,
        compounds: compounds.len(),
        clashes,
        mean_mass,
        mass_variance,
        min_mass: masses.iter().copied().fold(f64::INFINITY, f64::min),
        max_mass: masses.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Compare every pair of compounds within each well
pub(crate) fn scan_wells(wells: &[WellAssignment], resolution: f64) -> CollisionReport {
    let mut comparisons = Vec::new();
    let diagnostics: Vec<WellDiagnostics> = wells
        .iter()
        .map(|w| scan_well(w, resolution, &mut comparisons))
        .collect();

    let all_masses: Vec<f64> = wells.iter().flat_map(|w| w.masses()).collect();
    let (global_mean, global_variance) = mean_and_variance(&all_masses);
    let well_means: Vec<f64> = diagnostics
        .iter()
        .filter(|d| d.compounds > 0)
        .map(|d| d.mean_mass)
        .collect();
    let (mean_of_well_means, variance_of_well_means) = mean_and_variance(&well_means);

    let total_clashes = diagnostics.iter().map(|d| d.clashes).sum();
    let wells_with_clashes = diagnostics.iter().filter(|d| d.clashes > 0).count();

    CollisionReport {
        resolution,
        total_clashes,
        wells: diagnostics,
        comparisons,
        distribution: DistributionSummary {
            global_mean,
            global_variance,
            mean_of_well_means,
            variance_of_well_means,
            wells_with_clashes,
        },
    }
}
