use chrono::NaiveDate;
use std::fmt;

/// Side of an insider trade listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub const ALL: [TradeSide; 2] = [TradeSide::Buy, TradeSide::Sell];

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

/// One independently produced dataset. Insider trades are two datasets,
/// one per side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    HighShortInterest,
    InsiderTrades(TradeSide),
    UnusualVolume,
}

impl DatasetKind {
    /// Identifier used for logging and as the snapshot `source_id`.
    pub fn slug(&self) -> String {
        match self {
            DatasetKind::HighShortInterest => "high_short_interest".to_string(),
            DatasetKind::InsiderTrades(side) => format!("insider_trades.{}", side.as_str()),
            DatasetKind::UnusualVolume => "unusual_volume".to_string(),
        }
    }

    pub fn format(&self) -> SourceFormat {
        match self {
            DatasetKind::UnusualVolume => SourceFormat::Json,
            _ => SourceFormat::Html,
        }
    }

    /// Human readable name written into the run metadata.
    pub fn display_name(&self) -> String {
        match self {
            DatasetKind::HighShortInterest => "High Short Interest".to_string(),
            DatasetKind::InsiderTrades(side) => format!("Insider Trades ({})", side.as_str()),
            DatasetKind::UnusualVolume => "Unusual Volume".to_string(),
        }
    }

    pub fn description(&self) -> String {
        match self {
            DatasetKind::HighShortInterest => {
                "Dataset contains short interest for stocks where it is high".to_string()
            }
            DatasetKind::InsiderTrades(side) => format!(
                "Dataset contains the latest insider {} trades reported on SEC Form 4",
                side.as_str()
            ),
            DatasetKind::UnusualVolume => {
                "Dataset contains unusual volumes for stocks".to_string()
            }
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.slug())
    }
}

/// One scheduler trigger. Insider trades fan out into a buy and a sell run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pipeline {
    HighShortInterest,
    InsiderTrades,
    UnusualVolume,
}

impl Pipeline {
    pub const ALL: [Pipeline; 3] = [
        Pipeline::HighShortInterest,
        Pipeline::InsiderTrades,
        Pipeline::UnusualVolume,
    ];

    pub fn datasets(&self) -> Vec<DatasetKind> {
        match self {
            Pipeline::HighShortInterest => vec![DatasetKind::HighShortInterest],
            Pipeline::InsiderTrades => TradeSide::ALL
                .iter()
                .map(|side| DatasetKind::InsiderTrades(*side))
                .collect(),
            Pipeline::UnusualVolume => vec![DatasetKind::UnusualVolume],
        }
    }
}

/// Payload format of a source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    Html,
    Json,
}

impl SourceFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Html => "html",
            SourceFormat::Json => "json",
        }
    }
}

/// Raw body of one source, captured once per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawSnapshot {
    pub source_id: String,
    pub retrieved_at: NaiveDate,
    pub content: String,
}
