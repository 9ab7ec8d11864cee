use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use masspool::annotate::FailurePolicy;
use masspool::chem::StructureKind;
use masspool::plate::PlateFormat;
use masspool::pooling::AssignmentPolicy;
use masspool::table::Delimiter;

mod annotate;
mod config;
mod lookup;
mod pool;
mod transfer;

/// masspool - exact-mass annotation and mass-striped compound pooling
#[derive(Parser)]
#[command(name = "masspool")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Field delimiter of an input table.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DelimiterArg {
    Tab,
    Comma,
    Space,
}

/// Plate format in wells.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PlateFormatArg {
    #[value(name = "96")]
    Wells96,
    #[value(name = "384")]
    Wells384,
    #[value(name = "1536")]
    Wells1536,
}

/// Order in which mass-sorted compounds are dealt onto wells.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PolicyArg {
    /// Compound i goes to well i mod W
    RoundRobin,
    /// Reverse direction on every pass over the wells
    Serpentine,
}

/// What to do with a structure that cannot be interpreted.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FailurePolicyArg {
    /// Keep the row with empty mass and formula
    Blank,
    /// Drop the row
    Skip,
    /// Stop with an error
    Halt,
}

/// Representation held in the structure column.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StructureKindArg {
    Smiles,
    Formula,
}

impl From<DelimiterArg> for Delimiter {
    fn from(arg: DelimiterArg) -> Self {
        match arg {
            DelimiterArg::Tab => Delimiter::Tab,
            DelimiterArg::Comma => Delimiter::Comma,
            DelimiterArg::Space => Delimiter::Space,
        }
    }
}

impl From<PlateFormatArg> for PlateFormat {
    fn from(arg: PlateFormatArg) -> Self {
        match arg {
            PlateFormatArg::Wells96 => PlateFormat::Wells96,
            PlateFormatArg::Wells384 => PlateFormat::Wells384,
            PlateFormatArg::Wells1536 => PlateFormat::Wells1536,
        }
    }
}

impl From<PolicyArg> for AssignmentPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::RoundRobin => AssignmentPolicy::RoundRobin,
            PolicyArg::Serpentine => AssignmentPolicy::Serpentine,
        }
    }
}

impl From<FailurePolicyArg> for FailurePolicy {
    fn from(arg: FailurePolicyArg) -> Self {
        match arg {
            FailurePolicyArg::Blank => FailurePolicy::Blank,
            FailurePolicyArg::Skip => FailurePolicy::Skip,
            FailurePolicyArg::Halt => FailurePolicy::Halt,
        }
    }
}

impl From<StructureKindArg> for StructureKind {
    fn from(arg: StructureKindArg) -> Self {
        match arg {
            StructureKindArg::Smiles => StructureKind::Smiles,
            StructureKindArg::Formula => StructureKind::Formula,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add ExactMass and MolecularFormula columns computed from structures
    Annotate(AnnotateArgs),

    /// Stripe compounds across plate wells by exact mass
    Pool(PoolArgs),

    /// Write Echo transfer instructions for a pooled table
    Transfer(TransferArgs),

    /// Write one PCDL lookup file per pooled well
    Lookup(LookupArgs),
}

#[derive(Args)]
pub struct AnnotateArgs {
    /// Input table with sample identifiers and structures
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output stem; `_exactmass_and_formula.txt` is appended
    #[arg(value_name = "STEM")]
    pub stem: PathBuf,

    /// Sample identifier column [default: sample]
    #[arg(long)]
    pub sample_column: Option<String>,

    /// Structure column [default: MOLSMILES]
    #[arg(long)]
    pub smiles_column: Option<String>,

    /// Representation in the structure column [default: smiles]
    #[arg(long, value_enum)]
    pub structure_kind: Option<StructureKindArg>,

    /// Handling of structures that cannot be interpreted [default: blank]
    #[arg(long, value_enum)]
    pub on_error: Option<FailurePolicyArg>,

    /// Input delimiter [default: tab]
    #[arg(short = 'd', long, value_enum)]
    pub delimiter: Option<DelimiterArg>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct PoolArgs {
    /// Annotated compound table
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Compounds per well (the number of wells is derived)
    #[arg(short = 'c', long, conflicts_with = "total_wells")]
    pub compounds_per_well: Option<usize>,

    /// Total number of wells (compounds per well is derived)
    #[arg(short = 'w', long)]
    pub total_wells: Option<usize>,

    /// Refuse layouts that put more than N compounds in a well
    #[arg(long, value_name = "N")]
    pub max_per_well: Option<usize>,

    /// Mass-resolution threshold in Da [default: 0.1]
    #[arg(short = 't', long)]
    pub threshold: Option<f64>,

    /// Output file prefix [default: output]
    #[arg(short = 'o', long, value_name = "PREFIX")]
    pub output_prefix: Option<String>,

    /// Input delimiter [default: tab]
    #[arg(short = 'd', long, value_enum)]
    pub delimiter: Option<DelimiterArg>,

    /// Sample identifier column [default: sample]
    #[arg(long)]
    pub sample_column: Option<String>,

    /// Exact mass column [default: ExactMass]
    #[arg(long)]
    pub exact_mass_column: Option<String>,

    /// Plate format in wells [default: 384]
    #[arg(long, value_enum)]
    pub plate_format: Option<PlateFormatArg>,

    /// Well assignment order [default: round-robin]
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Do not append a timestamp to output file names
    #[arg(long)]
    pub no_timestamp: bool,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct TransferArgs {
    /// Pooled compound table
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output picklist; `.csv` is appended when missing
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Source plate column
    #[arg(long)]
    pub src_plate: Option<String>,

    /// Source well column
    #[arg(long)]
    pub src_well: Option<String>,

    /// Destination plate column
    #[arg(long)]
    pub dest_plate: Option<String>,

    /// Destination well column
    #[arg(long)]
    pub dest_well: Option<String>,

    /// Transfer volume in nL, applied to every row
    #[arg(long = "tv", value_name = "VOLUME")]
    pub transfer_volume: Option<f64>,

    /// Input delimiter [default: comma]
    #[arg(short = 'd', long, value_enum)]
    pub delimiter: Option<DelimiterArg>,

    /// Append every well conversion to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct LookupArgs {
    /// Pooled compound table
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory for the per-well files; created when missing
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Destination plate column
    #[arg(long)]
    pub dest_plate: Option<String>,

    /// Destination well column
    #[arg(long)]
    pub dest_well: Option<String>,

    /// Sample identifier column
    #[arg(long)]
    pub sample_col: Option<String>,

    /// Molecular formula column
    #[arg(long)]
    pub formula_col: Option<String>,

    /// Input delimiter [default: comma]
    #[arg(short = 'd', long, value_enum)]
    pub delimiter: Option<DelimiterArg>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Annotate(args) => annotate::run(args),
        Commands::Pool(args) => pool::run(args),
        Commands::Transfer(args) => transfer::run(args),
        Commands::Lookup(args) => lookup::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pool_arguments() {
        let cli = Cli::try_parse_from([
            "masspool", "-vv", "pool", "in.txt", "-w", "12", "--plate-format", "96", "--policy",
            "serpentine", "--no-timestamp",
        ])
        .unwrap();
        assert_eq!(cli.verbosity(), 2);
        match cli.command {
            Commands::Pool(args) => {
                assert_eq!(args.total_wells, Some(12));
                assert_eq!(args.compounds_per_well, None);
                assert!(matches!(args.plate_format, Some(PlateFormatArg::Wells96)));
                assert!(matches!(args.policy, Some(PolicyArg::Serpentine)));
                assert!(args.no_timestamp);
            }
            _ => panic!("expected pool command"),
        }
    }

    #[test]
    fn test_wells_and_pool_size_conflict() {
        let result = Cli::try_parse_from(["masspool", "pool", "in.txt", "-w", "12", "-c", "4"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_transfer_volume_flag() {
        let cli = Cli::try_parse_from([
            "masspool", "transfer", "pooled.csv", "echo", "--src-plate", "SP", "--tv", "2.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Transfer(args) => {
                assert_eq!(args.transfer_volume, Some(2.5));
                assert_eq!(args.src_plate.as_deref(), Some("SP"));
                assert_eq!(args.dest_plate, None);
            }
            _ => panic!("expected transfer command"),
        }
    }
}
