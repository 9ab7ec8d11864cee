//! # Exact Mass and Molecular Formula
//!
//! Structure interpretation sits behind the [`MassCalculator`] trait so that
//! annotation and pooling never see parser or element-table types. Two
//! calculators are provided:
//!
//! - [`SmilesCalculator`]: reads SMILES (organic subset, aromatic atoms,
//!   bracket atoms with isotopes and charges, rings, branches, salts)
//! - [`FormulaCalculator`]: reads a molecular formula such as `C8H10N4O2`
//!
//! ```rust
//! use masspool::chem::{MassCalculator, SmilesCalculator};
//!
//! let caffeine = SmilesCalculator.calculate("CN1C=NC2=C1C(=O)N(C(=O)N2C)C")?;
//! assert_eq!(caffeine.formula, "C8H10N4O2");
//! assert!((caffeine.exact_mass - 194.080_376).abs() < 1e-5);
//! # Ok::<(), masspool::chem::ChemError>(())
//! ```

mod elements;
mod error;
mod formula;
mod smiles;

#[cfg(test)]
mod tests;

pub use elements::{isotope_mass, lookup as lookup_element, Element, ELECTRON_MASS};
pub use error::ChemError;
pub use formula::MolecularFormula;
pub use smiles::parse_smiles;

use serde::{Deserialize, Serialize};

/// Exact mass and formula derived from one structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassAnnotation {
    /// Monoisotopic mass in Daltons
    pub exact_mass: f64,
    /// Molecular formula in Hill notation
    pub formula: String,
}

impl From<&MolecularFormula> for MassAnnotation {
    fn from(formula: &MolecularFormula) -> Self {
        Self {
            exact_mass: formula.monoisotopic_mass(),
            formula: formula.hill_notation(),
        }
    }
}

/// Computes exact mass and molecular formula from a structure representation
pub trait MassCalculator {
    /// Interpret `structure` and return its mass annotation
    fn calculate(&self, structure: &str) -> Result<MassAnnotation, ChemError>;
}

/// Calculator for SMILES strings
#[derive(Debug, Clone, Copy, Default)]
pub struct SmilesCalculator;

impl MassCalculator for SmilesCalculator {
    fn calculate(&self, structure: &str) -> Result<MassAnnotation, ChemError> {
        let formula = parse_smiles(structure)?;
        Ok(MassAnnotation::from(&formula))
    }
}

/// Calculator for molecular formula strings
#[derive(Debug, Clone, Copy, Default)]
pub struct FormulaCalculator;

impl MassCalculator for FormulaCalculator {
    fn calculate(&self, structure: &str) -> Result<MassAnnotation, ChemError> {
        let formula: MolecularFormula = structure.parse()?;
        Ok(MassAnnotation::from(&formula))
    }
}

/// Kind of structure representation held in the input column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    /// SMILES string
    #[default]
    Smiles,
    /// Molecular formula
    Formula,
}

impl StructureKind {
    /// Calculator matching this structure kind
    pub fn calculator(self) -> Box<dyn MassCalculator> {
        match self {
            StructureKind::Smiles => Box::new(SmilesCalculator),
            StructureKind::Formula => Box::new(FormulaCalculator),
        }
    }
}
