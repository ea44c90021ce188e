use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{fields::strip_percent, numeric::canonicalize, raw_table::RawTable};
use crate::dataset::{Dataset, Field};
use crate::error::{PipelineError, Result};
use crate::types::DatasetKind;

pub const COLUMNS: &[&str] = &[
    "Company", "Ticker", "Exchange", "ShortInt", "Float", "Outstd", "Industry",
];

static TICKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{1,4}$").expect("ticker regex should compile"));

/// Complete rows with a 1–4 letter uppercase ticker, percentages and
/// suffixed share counts turned into floats.
///
/// The source interleaves repeated headers and ad rows with the data; those
/// fail the completeness or ticker checks and are dropped quietly.
pub fn normalize(table: &RawTable) -> Result<Dataset> {
    let kind = DatasetKind::HighShortInterest;
    let idx = column_indices(table, kind, COLUMNS)?;
    let mut out = Dataset::new(kind, COLUMNS);

    let mut skipped = 0usize;
    for row in &table.rows {
        let complete = (0..table.headers.len()).all(|i| RawTable::cell(row, i).is_some());
        let ticker = RawTable::cell(row, idx[1]).unwrap_or_default();
        if !complete || !TICKER_RE.is_match(ticker) {
            skipped += 1;
            continue;
        }

        let mut record = Vec::with_capacity(COLUMNS.len());
        for (name, &i) in COLUMNS.iter().zip(&idx) {
            let cell = RawTable::cell(row, i).unwrap_or_default();
            record.push(match *name {
                "ShortInt" => Field::Number(strip_percent(cell)?),
                "Float" | "Outstd" => Field::Number(canonicalize(cell)?),
                _ => Field::text(cell),
            });
        }
        out.records.push(record);
    }

    debug!(rows = out.len(), skipped, "normalized high short interest");
    Ok(out)
}

/// Position of each wanted column in the table's header row.
pub(crate) fn column_indices(
    table: &RawTable,
    kind: DatasetKind,
    columns: &[&str],
) -> Result<Vec<usize>> {
    columns
        .iter()
        .map(|name| {
            table
                .column_index(name)
                .ok_or_else(|| PipelineError::MissingColumn {
                    dataset: kind.slug(),
                    column: name.to_string(),
                })
        })
        .collect()
}
