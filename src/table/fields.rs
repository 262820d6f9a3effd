use csv::StringRecord;

use super::TableError;

/// Cell contents treated as null in nullable columns
const NULL_MARKERS: &[&str] = &["", "null", "none", "na", "nan"];

pub(crate) fn is_null_marker(raw: &str) -> bool {
    let trimmed = raw.trim();
    NULL_MARKERS.iter().any(|m| trimmed.eq_ignore_ascii_case(m))
}

/// Resolve the position of each required column in the header row
pub(crate) fn locate_columns<const N: usize>(
    headers: &StringRecord,
    required: [&str; N],
    table: &str,
) -> Result<[usize; N], TableError> {
    let normalized: Vec<String> = headers
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_lowercase())
        .collect();

    let mut indices = [0usize; N];
    for (slot, column) in indices.iter_mut().zip(required) {
        *slot = normalized
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| TableError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            })?;
    }
    Ok(indices)
}

/// A single cell together with where it came from
pub(crate) struct Cell<'a> {
    table: &'a str,
    row: usize,
    column: &'a str,
    raw: &'a str,
}

impl<'a> Cell<'a> {
    pub(crate) fn new(table: &'a str, row: usize, column: &'a str, record: &'a StringRecord, index: usize) -> Self {
        Self {
            table,
            row,
            column,
            raw: record.get(index).unwrap_or(""),
        }
    }

    pub(crate) fn invalid(&self, reason: impl Into<String>) -> TableError {
        TableError::InvalidValue {
            table: self.table.to_string(),
            row: self.row,
            column: self.column.to_string(),
            value: self.raw.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn text(&self) -> String {
        self.raw.trim().to_string()
    }

    pub(crate) fn is_null(&self) -> bool {
        is_null_marker(self.raw)
    }

    /// Parse a required finite floating point value
    pub(crate) fn finite_f64(&self) -> Result<f64, TableError> {
        let trimmed = self.raw.trim();
        if trimmed.is_empty() {
            return Err(self.invalid("missing value"));
        }
        let value: f64 = trimmed.parse().map_err(|_| self.invalid("not a number"))?;
        if !value.is_finite() {
            return Err(self.invalid("must be finite"));
        }
        Ok(value)
    }

    /// Parse a nullable floating point value; null markers yield `None`
    pub(crate) fn optional_f64(&self) -> Result<Option<f64>, TableError> {
        if self.is_null() {
            return Ok(None);
        }
        self.finite_f64().map(Some)
    }

    /// Parse an integer, accepting float notation with no fractional part
    pub(crate) fn integer(&self) -> Result<i64, TableError> {
        let trimmed = self.raw.trim();
        if trimmed.is_empty() {
            return Err(self.invalid("missing value"));
        }
        if let Ok(value) = trimmed.parse::<i64>() {
            return Ok(value);
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 => {
                Ok(value as i64)
            }
            _ => Err(self.invalid("not an integer")),
        }
    }
}
