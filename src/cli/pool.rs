use anyhow::{bail, Context, Result};
use log::info;

use masspool::annotate::EXACT_MASS_COLUMN;
use masspool::plate::PlateFormat;
use masspool::pooling::{
    write_outputs, AssignmentPolicy, CompoundRecord, OutputPaths, PoolingConfig, PoolingEngine,
    DEFAULT_RESOLUTION, TIMESTAMP_FORMAT,
};
use masspool::table::{Delimiter, Table};

use super::config::{Config, PoolConfig};
use super::PoolArgs;

fn resolve_target(args: &PoolArgs, file: &PoolConfig) -> Result<PoolingConfig> {
    let config = match (args.compounds_per_well, args.total_wells) {
        (Some(c), _) => PoolingConfig::with_compounds_per_well(c),
        (None, Some(w)) => PoolingConfig::with_total_wells(w),
        (None, None) => match (file.compounds_per_well, file.total_wells) {
            (Some(_), Some(_)) => {
                bail!("Config file sets both `pool.compounds_per_well` and `pool.total_wells`")
            }
            (Some(c), None) => PoolingConfig::with_compounds_per_well(c),
            (None, Some(w)) => PoolingConfig::with_total_wells(w),
            (None, None) => bail!("Specify either -c (compounds per well) or -w (total wells)"),
        },
    };
    Ok(config)
}

/// Pool an annotated compound table into plate wells
pub fn run(args: PoolArgs) -> Result<()> {
    if !args.input.exists() {
        bail!("Input file does not exist: {}", args.input.display());
    }
    let file = Config::load(args.config.as_deref())?.pool;

    let mut config = resolve_target(&args, &file)?
        .resolution(args.threshold.or(file.threshold).unwrap_or(DEFAULT_RESOLUTION))
        .plate_format(
            args.plate_format
                .map(PlateFormat::from)
                .or(file.plate_format)
                .unwrap_or_default(),
        )
        .policy(
            args.policy
                .map(AssignmentPolicy::from)
                .or(file.policy)
                .unwrap_or_default(),
        );
    if let Some(cap) = args.max_per_well.or(file.max_per_well) {
        config = config.max_compounds_per_well(cap);
    }

    let delimiter = args
        .delimiter
        .map(Delimiter::from)
        .or(file.delimiter)
        .unwrap_or(Delimiter::Tab);
    let sample_column = args
        .sample_column
        .or(file.sample_column)
        .unwrap_or_else(|| "sample".to_string());
    let mass_column = args
        .exact_mass_column
        .or(file.exact_mass_column)
        .unwrap_or_else(|| EXACT_MASS_COLUMN.to_string());
    let prefix = args
        .output_prefix
        .or(file.output_prefix)
        .unwrap_or_else(|| "output".to_string());
    let timestamp = (!args.no_timestamp && file.timestamp.unwrap_or(true))
        .then(|| chrono::Local::now().format(TIMESTAMP_FORMAT).to_string());

    info!("masspool pool");
    info!("=============");
    info!("Input: {}", args.input.display());
    info!("Resolution: {} Da", config.resolution);

    let table = Table::read_path(&args.input, delimiter)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let records = CompoundRecord::from_table(&table, &sample_column, &mass_column)
        .context("Invalid compound table")?;

    let engine = PoolingEngine::new(config);
    let plan = engine.pool(records).context("Pooling failed")?;
    let report = plan.collision_report(engine.config().resolution);

    let paths = OutputPaths::new(&prefix, engine.config().plate_format, timestamp.as_deref());
    write_outputs(engine.config(), &plan, &report, &table.headers, &paths)
        .context("Failed to write pooling output")?;

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    let layout = plan.layout();
    println!(
        "Pooled {} compounds into {} wells ({} per well) across {} plate(s)",
        layout.compound_count,
        layout.total_wells,
        layout.compounds_per_well,
        layout.plate_count(plan.plate_format())
    );
    for path in paths.all() {
        println!("  {}", path.display());
    }
    Ok(())
}
