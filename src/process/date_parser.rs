use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use crate::error::{PipelineError, Result};
use crate::locate::{path, HIGH_SHORT_INTEREST_DATE};

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(January|February|March|April|May|June|July|August|September|October|November|December)\s\d{1,2},\s20\d{2}",
    )
    .expect("date regex should compile")
});

/// Find the first `"<Month> <day>, 20<yy>"` in `text`, e.g. `"November 14, 2021"`.
pub fn parse_long_date(text: &str) -> Result<NaiveDate> {
    let found = DATE_RE
        .find(text)
        .ok_or_else(|| PipelineError::DateNotFound(text.to_string()))?;
    NaiveDate::parse_from_str(found.as_str(), "%B %d, %Y")
        .map_err(|_| PipelineError::DateNotFound(text.to_string()))
}

/// Date the high short interest page claims its figures are from, read from
/// the trailer row of its first table.
pub fn extract_effective_date(content: &str) -> Result<NaiveDate> {
    let doc = Html::parse_document(content);
    let cell = path::follow(&doc, HIGH_SHORT_INTEREST_DATE)?;
    let text = path::element_text(cell).unwrap_or_default();
    parse_long_date(&text)
}
