//! # Instrument Exports
//!
//! Turns a pooled-plate table into files for the instruments downstream of
//! pooling:
//!
//! - **Transfers**: one liquid-handler instruction per compound, moving it
//!   from its source well into its pool well ([`EchoFormatter`])
//! - **Lookups**: one compound list per pool well, imported by the analysis
//!   software before that well is measured ([`PcdlFormatter`])
//!
//! Both are behind a formatter trait so other robots or databases only
//! need a new formatter.

mod echo;
mod error;
mod lookup;
mod pcdl;
mod transfer;


pub use echo::{EchoFormatter, ECHO_HEADER};
pub use error::ExportError;
pub use lookup::{group_by_well, write_lookup_files, LookupColumns, LookupEntry, LookupGroup};
pub use pcdl::{PcdlFormatter, MAX_FILE_INDEX, PCDL_HEADER_LINES};
pub use transfer::{
    append_conversion_log, collect_transfers, conversions, with_extension, write_transfer_file,
    write_transfer_outputs, ConvertedWell, Transfer, TransferColumns,
};

use std::io::Write;

/// Serializes transfer instructions for a liquid handler
pub trait TransferFormatter {
    /// File extension of the output, without the dot
    fn extension(&self) -> &'static str;

    /// Write all transfers to `out`
    fn write_transfers(
        &self,
        transfers: &[Transfer],
        out: &mut dyn Write,
    ) -> Result<(), ExportError>;
}

/// Serializes one per-well compound lookup file
pub trait LookupFormatter {
    /// File name for the `ordinal`-th group (zero-based, in output order)
    fn file_name(&self, group: &LookupGroup, ordinal: usize) -> String;

    /// Write the group's compounds to `out`
    fn write_group(&self, group: &LookupGroup, out: &mut dyn Write) -> Result<(), ExportError>;
}
