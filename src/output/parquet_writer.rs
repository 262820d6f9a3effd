//! Parquet rendition of the identified-compound table.
//!
//! Columns carry the published display headers and rounded values; the run
//! provenance goes into the file footer key-value metadata.

use std::io::Write;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;
use parquet::format::KeyValue;

use super::{columns, CompoundRow, OutputError};
use crate::pipeline::IdentificationReport;

/// Format version written to the Parquet footer
pub const RESULT_FORMAT_VERSION: &str = "1.0.0";

/// Metadata key for the result format version
pub const KEY_FORMAT_VERSION: &str = "mztarget:format_version";

/// Metadata key for the JSON-serialized run metadata
pub const KEY_RUN_METADATA: &str = "mztarget:run_metadata";

/// ZSTD level used for result tables
const ZSTD_LEVEL: i32 = 3;

/// Arrow schema of the identified-compound table
pub fn create_result_schema() -> Schema {
    Schema::new(vec![
        Field::new(columns::COMPOUND_ID, DataType::Int64, false),
        Field::new(columns::COMPOUND_NAME, DataType::Utf8, false),
        Field::new(columns::TOTAL_INTENSITY_PPM, DataType::Int64, false),
        Field::new(columns::MZ, DataType::Float64, false),
        Field::new(columns::MZ_ERROR_PPM, DataType::Int64, false),
        Field::new(columns::RETENTION_TIME, DataType::Float64, false),
        Field::new(columns::RETENTION_TIME_ERROR, DataType::Float64, true),
        Field::new(columns::PEAK_COUNT, DataType::Int64, false),
    ])
}

fn rows_to_batch(schema: Arc<Schema>, rows: &[CompoundRow]) -> Result<RecordBatch, OutputError> {
    let arrays: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.compound_id))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.name.as_str()))),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.total_intensity_ppm))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.mz))),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.mz_error_ppm))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.retime))),
        Arc::new(rows.iter().map(|r| r.retime_error).collect::<Float64Array>()),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.peak_count as i64))),
    ];
    Ok(RecordBatch::try_new(schema, arrays)?)
}

fn writer_properties(report: &IdentificationReport) -> Result<WriterProperties, OutputError> {
    let kv_metadata = vec![
        KeyValue {
            key: KEY_FORMAT_VERSION.to_string(),
            value: Some(RESULT_FORMAT_VERSION.to_string()),
        },
        KeyValue {
            key: KEY_RUN_METADATA.to_string(),
            value: Some(serde_json::to_string(&report.metadata)?),
        },
    ];

    Ok(WriterProperties::builder()
        .set_compression(Compression::ZSTD(ZstdLevel::try_new(ZSTD_LEVEL)?))
        .set_key_value_metadata(Some(kv_metadata))
        .build())
}

/// Write the report's display rows as a single-row-group Parquet file
pub fn write_parquet<W: Write + Send>(report: &IdentificationReport, writer: W) -> Result<(), OutputError> {
    let schema = Arc::new(create_result_schema());
    let props = writer_properties(report)?;
    let rows = report.rows();

    let mut arrow_writer = ArrowWriter::try_new(writer, schema.clone(), Some(props))?;
    if !rows.is_empty() {
        arrow_writer.write(&rows_to_batch(schema, &rows)?)?;
    }
    arrow_writer.close()?;
    Ok(())
}
