//! # masspool - Mass-Striped Compound Pooling
//!
//! `masspool` prepares compound libraries for pooled mass-spectrometry
//! screening: compounds are combined into plate wells so that every
//! compound in a well can be identified by its exact mass alone.
//!
//! ## Workflow
//!
//! 1. **Annotate** ([`annotate`], [`chem`]): compute monoisotopic mass and
//!    molecular formula from SMILES or formulas.
//! 2. **Pool** ([`pooling`], [`plate`]): sort by mass, stripe across wells,
//!    and report every pair of compounds in a well that the instrument
//!    cannot resolve.
//! 3. **Transfer** ([`export`]): Echo picklist moving each compound from its
//!    library well into its pool well.
//! 4. **Lookup** ([`export`]): one PCDL compound list per pool well.
//!
//! Every stage reads and writes plain delimited tables ([`table`]), so any
//! stage can be run on its own or fed from other tools.
//!
//! ## Quick Start
//!
//! ```rust
//! use masspool::prelude::*;
//!
//! let library = [("caffeine", "CN1C=NC2=C1C(=O)N(C(=O)N2C)C"),
//!                ("ethanol", "CCO"),
//!                ("benzene", "c1ccccc1"),
//!                ("acetic acid", "CC(=O)O")];
//!
//! let records = library
//!     .iter()
//!     .enumerate()
//!     .map(|(i, (name, smiles))| {
//!         let mass = SmilesCalculator.calculate(smiles)?.exact_mass;
//!         Ok(CompoundRecord::new(i, *name, mass))
//!     })
//!     .collect::<Result<Vec<_>, ChemError>>()?;
//!
//! let config = PoolingConfig::with_total_wells(2).resolution(0.005);
//! let plan = PoolingEngine::new(config).pool(records)?;
//! let report = plan.collision_report(0.005);
//!
//! assert_eq!(plan.compound_count(), 4);
//! assert!(report.is_clean());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod annotate;
pub mod chem;
pub mod export;
pub mod plate;
pub mod pooling;
pub mod table;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::annotate::{
        annotate_table, AnnotateError, AnnotateOptions, AnnotationStats, FailurePolicy,
    };
    pub use crate::chem::{
        ChemError, FormulaCalculator, MassAnnotation, MassCalculator, MolecularFormula,
        SmilesCalculator, StructureKind,
    };
    pub use crate::export::{
        EchoFormatter, ExportError, LookupFormatter, PcdlFormatter, TransferFormatter,
    };
    pub use crate::plate::{PlateFormat, WellId, WellPosition};
    pub use crate::pooling::{
        AssignmentPolicy, CollisionReport, CompoundRecord, PoolingConfig, PoolingEngine,
        PoolingError, PoolingPlan,
    };
    pub use crate::table::{Delimiter, Table, TableError};
}
