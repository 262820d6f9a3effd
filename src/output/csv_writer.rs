use std::io::Write;

use super::{CompoundRow, OutputError};

/// Write display rows as CSV with the published headers
pub fn write_csv<W: Write>(rows: &[CompoundRow], writer: W) -> Result<(), OutputError> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    // Written explicitly so an empty table still carries its header
    csv_writer.write_record(CompoundRow::headers())?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
