// src/store/metadata.rs

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::DatasetKind;

/// Descriptor written next to every committed dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub name: String,
    pub description: String,
    /// Day the run was triggered for.
    #[serde(with = "ymd")]
    pub effective_date: NaiveDate,
    /// Wall-clock time the run executed.
    #[serde(with = "ymd_hms")]
    pub run_date: NaiveDateTime,
    /// Day the source says its figures are from; lags `effective_date` when
    /// the source is stale.
    #[serde(with = "ymd")]
    pub source_date: NaiveDate,
    pub data_location: String,
}

impl RunMetadata {
    pub fn new(
        kind: DatasetKind,
        effective_date: NaiveDate,
        run_date: NaiveDateTime,
        source_date: Option<NaiveDate>,
        data_location: String,
    ) -> Self {
        Self {
            name: kind.display_name(),
            description: kind.description(),
            effective_date,
            run_date,
            source_date: source_date.unwrap_or(effective_date),
            data_location,
        }
    }
}

mod ymd {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

mod ymd_hms {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
