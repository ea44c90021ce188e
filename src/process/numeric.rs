use crate::error::{PipelineError, Result};

/// Parse a suffix-scaled number such as `"12.3M"` into a plain float.
///
/// The last character must be exactly `K`, `M` or `B` (case-sensitive);
/// anything else, including an empty string or trailing whitespace, is
/// `UnsupportedSuffix`. The prefix must be a decimal whose scaled value is
/// finite.
pub fn canonicalize(text: &str) -> Result<f64> {
    let scale = match text.chars().last() {
        Some('K') => 1_000.0,
        Some('M') => 1_000_000.0,
        Some('B') => 1_000_000_000.0,
        _ => return Err(PipelineError::UnsupportedSuffix(text.to_string())),
    };
    let prefix = &text[..text.len() - 1];
    let value = prefix
        .parse::<f64>()
        .map(|v| v * scale)
        .map_err(|_| PipelineError::InvalidNumber(text.to_string()))?;
    if !value.is_finite() {
        return Err(PipelineError::InvalidNumber(text.to_string()));
    }
    Ok(value)
}
