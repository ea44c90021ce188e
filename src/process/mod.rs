// src/process/mod.rs

//! Turning a located table into a typed, canonical dataset.

pub mod date_parser;
pub mod fields;
pub mod high_short_interest;
pub mod insider_trades;
pub mod numeric;
pub mod raw_table;
pub mod unusual_volume;
pub mod utils;

use crate::dataset::Dataset;
use crate::error::{PipelineError, Result};
use crate::locate::Located;
use crate::types::DatasetKind;

pub use fields::{extract_exchange, extract_ticker, strip_percent};
pub use numeric::canonicalize;

/// Single entry point for every dataset kind. Each kind is a pure function of
/// its located table; the first bad cell fails the whole dataset.
#[tracing::instrument(level = "debug", skip(located), fields(dataset = %kind))]
pub fn normalize(located: &Located, kind: DatasetKind) -> Result<Dataset> {
    match (kind, located) {
        (DatasetKind::HighShortInterest, Located::Table(table)) => {
            high_short_interest::normalize(table)
        }
        (DatasetKind::InsiderTrades(side), Located::Table(table)) => {
            insider_trades::normalize(table, side)
        }
        (DatasetKind::UnusualVolume, Located::Records(records)) => {
            unusual_volume::normalize(records)
        }
        (kind, _) => Err(PipelineError::UnexpectedLayout(format!(
            "{} cannot be built from this kind of located table",
            kind
        ))),
    }
}
