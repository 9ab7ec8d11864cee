//! # masspool
//!
//! Command-line front end for the compound pooling workflow.
//!
//! ## Usage
//!
//! ```bash
//! # 1. Exact mass and formula from SMILES
//! masspool annotate library.txt library
//!
//! # 2. Pool into 384 wells, flagging pairs closer than 5 mDa
//! masspool -v pool library_exactmass_and_formula.txt -w 384 -t 0.005 -o lib
//!
//! # 3. Echo picklist
//! masspool transfer lib_plate384_compounds_<timestamp>.csv picklist \
//!     --src-plate SourcePlate --src-well SourceWell \
//!     --dest-plate PoolPlate --dest-well PoolWell --tv 2.5
//!
//! # 4. PCDL lookup files, one per well
//! masspool lookup lib_plate384_compounds_<timestamp>.csv pcdl/ \
//!     --dest-plate PoolPlate --dest-well PoolWell \
//!     --sample-col sample --formula-col MolecularFormula
//! ```

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
