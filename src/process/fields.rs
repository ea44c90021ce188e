use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

use crate::error::{PipelineError, Result};

static LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("link selector should parse"));

static BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("http://localhost/").expect("base URL should parse"));

/// Ticker part of the `<exchange>-<ticker>` link in a cell, e.g. `aapl` for
/// `<a href="/quote/nasdaq-aapl">`.
pub fn extract_ticker(cell_html: &str) -> Result<String> {
    link_code(cell_html).map(|(_, ticker)| ticker)
}

/// Exchange part of the `<exchange>-<ticker>` link in a cell.
pub fn extract_exchange(cell_html: &str) -> Result<String> {
    link_code(cell_html).map(|(exchange, _)| exchange)
}

/// Split the last path segment of the cell's first link on its single `-`.
/// Tickers that themselves contain `-` are rejected rather than guessed at.
fn link_code(cell_html: &str) -> Result<(String, String)> {
    let malformed = || PipelineError::MalformedLink(cell_html.to_string());

    let fragment = Html::parse_fragment(cell_html);
    let href = fragment
        .select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .ok_or_else(malformed)?;
    let url = BASE.join(href.trim()).map_err(|_| malformed())?;
    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .ok_or_else(malformed)?;

    let mut parts = segment.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(exchange), Some(ticker), None) if !exchange.is_empty() && !ticker.is_empty() => {
            Ok((exchange.to_string(), ticker.to_string()))
        }
        _ => Err(malformed()),
    }
}

/// `"3.5%"` → `3.5`. The trailing `%` is optional.
pub fn strip_percent(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    match number.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(PipelineError::InvalidPercentage(text.to_string())),
    }
}
