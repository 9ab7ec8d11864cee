use anyhow::{Context, Result};
use log::info;

use masspool::export::{collect_transfers, write_transfer_outputs, EchoFormatter, TransferColumns};
use masspool::table::{Delimiter, Table};

use super::config::{required, Config};
use super::TransferArgs;

/// Convert a pooled table into an Echo picklist
pub fn run(args: TransferArgs) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }
    let file = Config::load(args.config.as_deref())?.transfer;

    let columns = TransferColumns {
        source_plate: required(
            args.src_plate,
            file.src_plate,
            "--src-plate",
            "transfer.src_plate",
        )?,
        source_well: required(args.src_well, file.src_well, "--src-well", "transfer.src_well")?,
        destination_plate: required(
            args.dest_plate,
            file.dest_plate,
            "--dest-plate",
            "transfer.dest_plate",
        )?,
        destination_well: required(
            args.dest_well,
            file.dest_well,
            "--dest-well",
            "transfer.dest_well",
        )?,
    };
    let volume = required(
        args.transfer_volume,
        file.transfer_volume,
        "--tv",
        "transfer.transfer_volume",
    )?;
    let delimiter = args
        .delimiter
        .map(Delimiter::from)
        .or(file.delimiter)
        .unwrap_or(Delimiter::Comma);
    let log_file = args.log_file.or(file.log_file);

    info!("masspool transfer");
    info!("=================");
    info!("Input: {}", args.input.display());
    info!("Transfer volume: {} nL", volume);

    let table = Table::read_path(&args.input, delimiter)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let transfers = collect_transfers(&table, &columns, volume).context("Invalid pooled table")?;

    let output = write_transfer_outputs(
        &EchoFormatter,
        &transfers,
        &args.output,
        log_file.as_deref(),
    )
    .context("Failed to write transfer file")?;

    println!("Converted file saved to {}", output.display());
    Ok(())
}
