use crate::{error::TransformError, transform::pipeline::Transform};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use model::{core::value::Value, records::table::Table};
use tracing::warn;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    // Month first wins for ambiguous slash and dash dates
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parses a calendar date from the common textual layouts. Timestamps keep
/// only their date part. Returns `None` when nothing matches.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

pub fn to_date(value: Value) -> Value {
    match value {
        Value::Date(_) | Value::Null => value,
        Value::String(ref s) => parse_date(s).map(Value::Date).unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// Parses one date column in place. Unparseable cells become null; rows are
/// never dropped. Absent columns are skipped.
pub struct ParseDates {
    column: String,
}

impl ParseDates {
    pub fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
        }
    }
}

impl Transform for ParseDates {
    fn name(&self) -> &'static str {
        "parse_dates"
    }

    fn apply(&self, table: Table) -> Result<Table, TransformError> {
        let Some(before) = table.column(&self.column).map(|c| c.null_count()) else {
            return Ok(table);
        };

        let table = table.map_column(&self.column, to_date);

        let after = table.column(&self.column).map(|c| c.null_count()).unwrap_or(0);
        if after > before {
            warn!(
                "{} unparseable values in {}.{} set to null",
                after - before,
                table.name(),
                self.column
            );
        }
        Ok(table)
    }
}
