use std::io::Write;

use super::OutputError;
use crate::pipeline::IdentificationReport;

/// Write the full-precision report, provenance included, as pretty JSON
pub fn write_json<W: Write>(report: &IdentificationReport, mut writer: W) -> Result<(), OutputError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
