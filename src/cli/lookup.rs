use anyhow::{Context, Result};
use log::info;

use masspool::export::{group_by_well, write_lookup_files, LookupColumns, PcdlFormatter};
use masspool::table::{Delimiter, Table};

use super::config::{required, Config};
use super::LookupArgs;

/// Split a pooled table into one PCDL import file per well
pub fn run(args: LookupArgs) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }
    let file = Config::load(args.config.as_deref())?.lookup;

    let columns = LookupColumns {
        plate: required(args.dest_plate, file.dest_plate, "--dest-plate", "lookup.dest_plate")?,
        well: required(args.dest_well, file.dest_well, "--dest-well", "lookup.dest_well")?,
        sample: required(args.sample_col, file.sample_col, "--sample-col", "lookup.sample_col")?,
        formula: required(
            args.formula_col,
            file.formula_col,
            "--formula-col",
            "lookup.formula_col",
        )?,
    };
    let delimiter = args
        .delimiter
        .map(Delimiter::from)
        .or(file.delimiter)
        .unwrap_or(Delimiter::Comma);

    info!("masspool lookup");
    info!("===============");
    info!("Input:  {}", args.input.display());
    info!("Output: {}", args.output_dir.display());

    let table = Table::read_path(&args.input, delimiter)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let groups = group_by_well(&table, &columns).context("Invalid pooled table")?;
    let written = write_lookup_files(&PcdlFormatter, &groups, &args.output_dir)
        .context("Failed to write lookup files")?;

    println!(
        "Wrote {} lookup files to {}",
        written.len(),
        args.output_dir.display()
    );
    Ok(())
}
