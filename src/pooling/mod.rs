//! # Mass-Striped Pooling
//!
//! Assigns compounds to plate wells so that compounds sharing a well can be
//! told apart by mass in a single analytical run.
//!
//! ## Algorithm
//!
//! 1. **Sort**: compounds are stably sorted by exact mass (ties keep input order).
//! 2. **Stripe**: the sorted list is dealt across `W` wells, by default
//!    round-robin (`i mod W`). Adjacent masses therefore land in different
//!    wells, and every well samples the full mass range.
//! 3. **Scan**: every pair within a well is compared; a pair whose masses
//!    differ by less than the resolution is a clash.
//!
//! ## Usage
//!
//! ```rust
//! use masspool::pooling::{CompoundRecord, PoolingConfig, PoolingEngine};
//!
//! let records = vec![
//!     CompoundRecord::new(0, "S1", 100.0),
//!     CompoundRecord::new(1, "S2", 100.02),
//!     CompoundRecord::new(2, "S3", 150.0),
//!     CompoundRecord::new(3, "S4", 150.01),
//! ];
//!
//! let config = PoolingConfig::with_total_wells(2).resolution(0.05);
//! let plan = PoolingEngine::new(config).pool(records)?;
//! let report = plan.collision_report(0.05);
//!
//! assert_eq!(plan.wells().len(), 2);
//! assert!(report.is_clean());
//! # Ok::<(), masspool::pooling::PoolingError>(())
//! ```

mod collisions;
mod config;
mod engine;
mod error;
mod output;
mod record;
mod report;


pub use collisions::{is_clash, MassComparison};
pub use config::{AssignmentPolicy, PoolingConfig, PoolingLayout, WellTarget, DEFAULT_RESOLUTION};
pub use engine::{PoolingEngine, PoolingPlan, WellAssignment, POOL_PLATE_COLUMN, POOL_WELL_COLUMN};
pub use error::PoolingError;
pub use output::{write_outputs, OutputPaths, PoolingSummary, TIMESTAMP_FORMAT};
pub use record::CompoundRecord;
pub use report::{CollisionReport, DistributionSummary, WellDiagnostics};
