use serde_json::Value;

use super::{
    fields::{extract_exchange, extract_ticker},
    numeric::canonicalize,
};
use crate::dataset::{Dataset, Field};
use crate::error::{PipelineError, Result};
use crate::locate::Record;
use crate::types::DatasetKind;

/// Source field holding the quote link the ticker and exchange come from.
pub const CODE_FIELD: &str = "sscode";

/// `(source field, canonical column)`, in output order after ticker/exchange.
pub const RENAMES: &[(&str, &str)] = &[
    ("ssname", "company"),
    ("sslast", "last"),
    ("sshigh", "high"),
    ("sschg", "change"),
    ("sschgp", "change_percents"),
    ("ssvol", "volume"),
    ("ssrvol", "relative_volume"),
    ("ss5mvol", "5min_volume"),
    ("sscap", "capitalization"),
];

/// Canonical columns holding suffix-scaled numbers.
const SCALED: &[&str] = &["volume", "5min_volume", "capitalization"];

pub fn columns() -> Vec<&'static str> {
    let mut cols = vec!["ticker", "exchange"];
    cols.extend(RENAMES.iter().map(|(_, canonical)| *canonical));
    cols
}

pub fn normalize(records: &[Record]) -> Result<Dataset> {
    let mut out = Dataset::new(DatasetKind::UnusualVolume, &columns());
    for record in records {
        let code = match field(record, CODE_FIELD)? {
            Value::String(s) => s.as_str(),
            other => return Err(PipelineError::MalformedLink(other.to_string())),
        };
        let mut row = Vec::with_capacity(out.columns.len());
        row.push(Field::text(extract_ticker(code)?));
        row.push(Field::text(extract_exchange(code)?));

        for (source, canonical) in RENAMES {
            let value = field(record, source)?;
            row.push(if SCALED.contains(canonical) {
                scaled(value)?
            } else {
                plain(value)
            });
        }
        out.records.push(row);
    }
    Ok(out)
}

fn field<'a>(record: &'a Record, name: &str) -> Result<&'a Value> {
    record.get(name).ok_or_else(|| PipelineError::MissingColumn {
        dataset: DatasetKind::UnusualVolume.slug(),
        column: name.to_string(),
    })
}

/// Strings go through the suffix parser. A bare JSON number is already
/// canonical; null is absent.
fn scaled(value: &Value) -> Result<Field> {
    match value {
        Value::String(s) => Ok(Field::Number(canonicalize(s)?)),
        Value::Number(n) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .map(Field::Number)
            .ok_or_else(|| PipelineError::InvalidNumber(n.to_string())),
        Value::Null => Ok(Field::Missing),
        other => Err(PipelineError::UnsupportedSuffix(other.to_string())),
    }
}

/// Passthrough columns keep the JSON type they arrived with.
fn plain(value: &Value) -> Field {
    match value {
        Value::String(s) => Field::text(s.as_str()),
        Value::Number(n) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .map(Field::Number)
            .unwrap_or_else(|| Field::text(n.to_string())),
        Value::Null => Field::Missing,
        other => Field::text(other.to_string()),
    }
}
