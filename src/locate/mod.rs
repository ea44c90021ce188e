// src/locate/mod.rs

//! Finding the data table inside a raw page or payload.
//!
//! Sources have no stable ids or headers to search for, only stable layout,
//! so each dataset is described by a fixed positional path. When a source
//! reshuffles its page, the constants below are the thing to update.

pub mod json;
pub mod path;

use scraper::Html;

use crate::error::Result;
use crate::process::raw_table::RawTable;
use crate::types::DatasetKind;
pub use json::Record;
pub use path::{Descend, Pick};

/// First table → third row → second table inside it.
pub const HIGH_SHORT_INTEREST_TABLE: &[Descend] = &[
    Descend::nth("table", 0),
    Descend::nth("tr", 2),
    Descend::nth("table", 1),
];

/// First cell of the last row of the first table (the "updated on" trailer).
pub const HIGH_SHORT_INTEREST_DATE: &[Descend] = &[
    Descend::nth("table", 0),
    Descend::last("tr"),
    Descend::nth("td", 0),
];

/// The trade list is the last table on the page.
pub const INSIDER_TRADES_TABLE: &[Descend] = &[Descend::last("table")];

pub const UNUSUAL_VOLUME_KEY: &str = "data";

/// Where a dataset's table lives in its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Locator {
    Html(&'static [Descend]),
    JsonKey(&'static str),
}

impl Locator {
    pub fn for_kind(kind: DatasetKind) -> Self {
        match kind {
            DatasetKind::HighShortInterest => Locator::Html(HIGH_SHORT_INTEREST_TABLE),
            DatasetKind::InsiderTrades(_) => Locator::Html(INSIDER_TRADES_TABLE),
            DatasetKind::UnusualVolume => Locator::JsonKey(UNUSUAL_VOLUME_KEY),
        }
    }
}

/// A located table, still untyped.
#[derive(Clone, Debug, PartialEq)]
pub enum Located {
    Table(RawTable),
    Records(Vec<Record>),
}

/// Pull the table described by `locator` out of `content`.
pub fn locate(content: &str, locator: Locator) -> Result<Located> {
    match locator {
        Locator::Html(steps) => {
            let doc = Html::parse_document(content);
            let table = path::follow(&doc, steps)?;
            Ok(Located::Table(RawTable::from_grid(path::table_grid(table))))
        }
        Locator::JsonKey(key) => Ok(Located::Records(json::records_at(content, key)?)),
    }
}
