//! Worldwide timeline (`/historical/all`) and the daily series behind the line chart.
//!
//! The API returns cumulative counts keyed by `M/D/YY` dates:
//!
//! ```json
//! {"cases": {"1/22/20": 557, "1/23/20": 657}, "deaths": {...}, "recovered": {...}}
//! ```
//!
//! JSON objects carry no order we can rely on, so keys are parsed to dates and
//! each series is sorted chronologically.

use crate::api::decode;
use crate::error::{Error, Result};
use crate::models::CaseCategory;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

const DATE_FORMAT: &str = "%m/%d/%y";

#[derive(Debug, Deserialize)]
struct RawTimeline {
    cases: HashMap<String, u64>,
    #[serde(default)]
    deaths: HashMap<String, u64>,
    #[serde(default)]
    recovered: HashMap<String, u64>,
}

/// Cumulative series, each sorted by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub cases: Vec<(NaiveDate, u64)>,
    pub deaths: Vec<(NaiveDate, u64)>,
    pub recovered: Vec<(NaiveDate, u64)>,
}

/// One point of the "new per day" chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    /// Change against the previous day. Negative when the source revised totals down.
    pub value: i64,
}

fn parse_series(raw: HashMap<String, u64>) -> Result<Vec<(NaiveDate, u64)>> {
    let mut out = raw
        .into_iter()
        .map(|(k, v)| {
            NaiveDate::parse_from_str(k.trim(), DATE_FORMAT)
                .map(|d| (d, v))
                .map_err(|e| Error::InvalidData(format!("timeline date {:?}: {}", k, e)))
        })
        .collect::<Result<Vec<_>>>()?;
    out.sort_by_key(|(d, _)| *d);
    Ok(out)
}

impl Timeline {
    /// Decode the `/historical/all` payload.
    pub fn from_value(value: Value) -> Result<Self> {
        let raw: RawTimeline = decode(value, "historical timeline")?;
        Ok(Self {
            cases: parse_series(raw.cases)?,
            deaths: parse_series(raw.deaths)?,
            recovered: parse_series(raw.recovered)?,
        })
    }

    pub fn series(&self, category: CaseCategory) -> &[(NaiveDate, u64)] {
        match category {
            CaseCategory::Confirmed => &self.cases,
            CaseCategory::Recovered => &self.recovered,
            CaseCategory::Deaths => &self.deaths,
        }
    }
}

/// Day-over-day differences of the cumulative series for `category`.
///
/// The first date has no predecessor and produces no point, so `n` dates give
/// `n - 1` points. Differences beyond the `i64` range saturate.
pub fn daily_new(timeline: &Timeline, category: CaseCategory) -> Vec<DailyPoint> {
    timeline
        .series(category)
        .windows(2)
        .map(|w| DailyPoint {
            date: w[1].0,
            value: (i128::from(w[1].1) - i128::from(w[0].1))
                .clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64,
        })
        .collect()
}
