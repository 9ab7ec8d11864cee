use std::io::Write;

use super::{ExportError, LookupFormatter, LookupGroup};

/// Comment lines that open every PCDL compound import file
pub const PCDL_HEADER_LINES: [&str; 4] = [
    "# All user editable compound information in the PCDL Manager compounds tab can be imported",
    "# A minimum of formula or mass plus one identifier must be populated for compound import (recommended is formula and at least one other identifier, see examples)",
    "# Multiple synonyms can be entered into the Synonyms column when separated by ';' (e.g. L-Isoleucine; 2-Amino-3-methylvaleric acid)",
    "# All compounds will be assumed to be of a neutral ion type, unless a 1 is entered in the Cation or Anion column",
];

/// File index wraps back to 1 after this many files (one 1536-well plate)
pub const MAX_FILE_INDEX: usize = 1536;

/// Agilent PCDL compound import CSV
#[derive(Debug, Clone, Copy, Default)]
pub struct PcdlFormatter;

impl PcdlFormatter {
    /// 1-based file index for the `ordinal`-th file
    pub fn file_index(ordinal: usize) -> usize {
        ordinal % MAX_FILE_INDEX + 1
    }
}

impl LookupFormatter for PcdlFormatter {
    fn file_name(&self, group: &LookupGroup, ordinal: usize) -> String {
        format!(
            "plate_{}_well_{}_{:04}.csv",
            group.plate,
            group.well,
            Self::file_index(ordinal)
        )
    }

    fn write_group(&self, group: &LookupGroup, out: &mut dyn Write) -> Result<(), ExportError> {
        for line in PCDL_HEADER_LINES {
            writeln!(out, "{}", line)?;
        }
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(["Name", "Formula"])?;
        for entry in &group.entries {
            writer.write_record([&entry.name, &entry.formula])?;
        }
        writer.flush()?;
        Ok(())
    }
}
