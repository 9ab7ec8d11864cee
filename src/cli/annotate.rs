use anyhow::{Context, Result};
use log::info;

use masspool::annotate::{annotate_table, output_path, AnnotateOptions, FailurePolicy};
use masspool::chem::StructureKind;
use masspool::table::{Delimiter, Table};

use super::config::Config;
use super::AnnotateArgs;

/// Annotate a compound table with exact mass and molecular formula
pub fn run(args: AnnotateArgs) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }
    let file = Config::load(args.config.as_deref())?.annotate;

    let defaults = AnnotateOptions::default();
    let options = AnnotateOptions {
        sample_column: args
            .sample_column
            .or(file.sample_column)
            .unwrap_or(defaults.sample_column),
        structure_column: args
            .smiles_column
            .or(file.smiles_column)
            .unwrap_or(defaults.structure_column),
        on_error: args
            .on_error
            .map(FailurePolicy::from)
            .or(file.on_error)
            .unwrap_or_default(),
    };
    let kind = args
        .structure_kind
        .map(StructureKind::from)
        .or(file.structure_kind)
        .unwrap_or_default();
    let delimiter = args
        .delimiter
        .map(Delimiter::from)
        .or(file.delimiter)
        .unwrap_or(Delimiter::Tab);
    let output = output_path(&args.stem);

    info!("masspool annotate");
    info!("=================");
    info!("Input:  {}", args.input.display());
    info!("Output: {}", output.display());
    info!(
        "Columns: sample '{}', structure '{}' ({:?})",
        options.sample_column, options.structure_column, kind
    );

    let mut table = Table::read_path(&args.input, delimiter)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let calculator = kind.calculator();
    let stats = annotate_table(&mut table, calculator.as_ref(), &options)
        .context("Annotation failed")?;

    table
        .write_path(&output, Delimiter::Tab)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("{}", stats);
    println!("Annotated file saved to {}", output.display());
    Ok(())
}
