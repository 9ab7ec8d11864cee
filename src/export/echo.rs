use std::io::Write;

use super::{ExportError, Transfer, TransferFormatter};

/// Picklist header expected by Echo Plate Reformat
pub const ECHO_HEADER: [&str; 7] = [
    "Source Plate Name",
    "Source Column",
    "Source Row",
    "Destination Plate Name",
    "Destination Column",
    "Destination Row",
    "Transfer Volume",
];

/// Labcyte Echo picklist CSV with numeric rows and columns
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoFormatter;

impl TransferFormatter for EchoFormatter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write_transfers(
        &self,
        transfers: &[Transfer],
        out: &mut dyn Write,
    ) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(ECHO_HEADER)?;
        for t in transfers {
            writer.write_record([
                t.source_plate.clone(),
                t.source.position.column.to_string(),
                t.source.position.row.to_string(),
                t.destination_plate.clone(),
                t.destination.position.column.to_string(),
                t.destination.position.row.to_string(),
                t.volume.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}
