// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::types::{DatasetKind, TradeSide};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Everything a `PipelineRunner` needs: where to write, how to fetch, and
/// where each source lives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_root: PathBuf,
    pub http: HttpConfig,
    pub retry: RetryPolicy,
    pub sources: Sources,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
}

/// Fixed-delay retry: one initial attempt plus `max_retries` more.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sources {
    pub high_short_interest: SourceConfig,
    pub insider_trades: InsiderTradesConfig,
    pub unusual_volume: SourceConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub url: String,
    pub dir: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InsiderTradesConfig {
    pub buy_url: String,
    pub sell_url: String,
    pub dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            http: HttpConfig::default(),
            retry: RetryPolicy::default(),
            sources: Sources::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay_ms: 10_000,
        }
    }
}

impl RetryPolicy {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            high_short_interest: SourceConfig {
                url: "https://www.highshortinterest.com/".to_string(),
                dir: PathBuf::from("high_short_interest"),
            },
            insider_trades: InsiderTradesConfig {
                buy_url: "https://finviz.com/insidertrading.ashx?tc=1".to_string(),
                sell_url: "https://finviz.com/insidertrading.ashx?tc=2".to_string(),
                dir: PathBuf::from("insider_trades"),
            },
            unusual_volume: SourceConfig {
                url: "https://stockbeep.com/table-data/unusual-volume-stocks\
                      ?sort-column=ssrvol&sort-order=desc&country=us&time-zone=-180"
                    .to_string(),
                dir: PathBuf::from("unusual_volume"),
            },
        }
    }
}

impl Config {
    /// Load a YAML config. Missing fields fall back to the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
        serde_yaml::from_str(&text).with_context(|| format!("parsing config {:?}", path))
    }

    /// Source URL for one dataset.
    pub fn url(&self, kind: DatasetKind) -> &str {
        match kind {
            DatasetKind::HighShortInterest => &self.sources.high_short_interest.url,
            DatasetKind::InsiderTrades(TradeSide::Buy) => &self.sources.insider_trades.buy_url,
            DatasetKind::InsiderTrades(TradeSide::Sell) => &self.sources.insider_trades.sell_url,
            DatasetKind::UnusualVolume => &self.sources.unusual_volume.url,
        }
    }

    /// Output directory for one dataset, `data_root` applied.
    pub fn dataset_dir(&self, kind: DatasetKind) -> PathBuf {
        let dir = match kind {
            DatasetKind::HighShortInterest => &self.sources.high_short_interest.dir,
            DatasetKind::InsiderTrades(_) => &self.sources.insider_trades.dir,
            DatasetKind::UnusualVolume => &self.sources.unusual_volume.dir,
        };
        self.data_root.join(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(
            tmp,
            "data_root: /srv/stocks\nretry:\n  max_retries: 5\nsources:\n  unusual_volume:\n    url: http://localhost/uv\n    dir: uv"
        )
        .unwrap();

        let cfg = Config::load(tmp.path()).unwrap();
        assert_eq!(cfg.data_root, PathBuf::from("/srv/stocks"));
        assert_eq!(cfg.retry.max_retries, 5);
        assert_eq!(cfg.retry.delay_ms, 10_000);
        assert_eq!(cfg.url(DatasetKind::UnusualVolume), "http://localhost/uv");
        assert_eq!(
            cfg.url(DatasetKind::HighShortInterest),
            "https://www.highshortinterest.com/"
        );
        assert_eq!(
            cfg.dataset_dir(DatasetKind::UnusualVolume),
            PathBuf::from("/srv/stocks/uv")
        );
    }

    #[test]
    fn test_insider_sides_share_dir() {
        let cfg = Config::default();
        assert_eq!(
            cfg.dataset_dir(DatasetKind::InsiderTrades(TradeSide::Buy)),
            cfg.dataset_dir(DatasetKind::InsiderTrades(TradeSide::Sell))
        );
        assert_ne!(
            cfg.url(DatasetKind::InsiderTrades(TradeSide::Buy)),
            cfg.url(DatasetKind::InsiderTrades(TradeSide::Sell))
        );
    }

    #[test]
    fn test_unreadable_config_errors() {
        assert!(Config::load("/definitely/not/here.yaml").is_err());
    }
}
