use super::{high_short_interest::column_indices, raw_table::RawTable};
use crate::dataset::{Dataset, Field};
use crate::error::Result;
use crate::types::{DatasetKind, TradeSide};

pub const COLUMNS: &[&str] = &[
    "Ticker",
    "Owner",
    "Relationship",
    "Date",
    "Transaction",
    "Cost",
    "#Shares",
    "Value ($)",
    "#Shares Total",
    "SEC Form 4",
];

/// Column selection only: every row is kept and every cell stays text.
pub fn normalize(table: &RawTable, side: TradeSide) -> Result<Dataset> {
    let kind = DatasetKind::InsiderTrades(side);
    let idx = column_indices(table, kind, COLUMNS)?;
    let mut out = Dataset::new(kind, COLUMNS);
    out.records = table
        .rows
        .iter()
        .map(|row| {
            idx.iter()
                .map(|&i| Field::opt_text(RawTable::cell(row, i)))
                .collect()
        })
        .collect();
    Ok(out)
}
