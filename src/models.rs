use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the three counters is currently highlighted across cards, map and chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseCategory {
    /// Confirmed cases (`cases` in the API payloads).
    #[default]
    Confirmed,
    Recovered,
    Deaths,
}

impl CaseCategory {
    pub const ALL: [CaseCategory; 3] = [
        CaseCategory::Confirmed,
        CaseCategory::Recovered,
        CaseCategory::Deaths,
    ];

    /// Field name used by the API for this counter.
    pub fn api_key(&self) -> &'static str {
        match self {
            CaseCategory::Confirmed => "cases",
            CaseCategory::Recovered => "recovered",
            CaseCategory::Deaths => "deaths",
        }
    }

    /// Card heading.
    pub fn title(&self) -> &'static str {
        match self {
            CaseCategory::Confirmed => "Coronavirus Cases",
            CaseCategory::Recovered => "Recovered",
            CaseCategory::Deaths => "Deaths",
        }
    }
}

impl fmt::Display for CaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_key())
    }
}

/// Access to the cumulative and "today" counters shared by global and per-country payloads.
pub trait CaseCounts {
    fn total(&self, category: CaseCategory) -> Option<u64>;
    fn today(&self, category: CaseCategory) -> Option<u64>;
}

/// `countryInfo` object nested in every per-country record.
///
/// Territories without an ISO code (cruise ships, some islands) come back with
/// `iso2`/`iso3` set to `null`, so everything here is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    #[serde(rename = "_id")]
    pub id: Option<u32>,
    pub iso2: Option<String>,
    pub iso3: Option<String>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub flag: Option<String>,
}

/// Serde helper: read a counter leniently.
///
/// Non-negative integers (as numbers, whole floats or numeric strings) are kept.
/// Negative values, fractions and non-numeric strings are treated as absent, so
/// one odd field does not discard the record it sits in.
fn de_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct CountVisitor;

    impl<'de> Visitor<'de> for CountVisitor {
        type Value = Option<u64>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number, a numeric string or null")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(u64::try_from(v).ok())
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 {
                Ok(Some(v as u64))
            } else {
                Ok(None)
            }
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(s.trim().parse::<u64>().ok())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            deserializer.deserialize_any(CountVisitor)
        }
    }

    deserializer.deserialize_any(CountVisitor)
}

/// One country's reported totals (element of `/countries`, or `/countries/{code}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryStat {
    pub country: String,
    #[serde(default)]
    pub country_info: CountryInfo,
    /// Milliseconds since the Unix epoch.
    pub updated: Option<i64>,
    #[serde(default, deserialize_with = "de_count")]
    pub cases: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub today_cases: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub deaths: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub today_deaths: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub recovered: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub today_recovered: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub active: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub critical: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub population: Option<u64>,
}

impl CountryStat {
    /// ISO2 code, if the API knows one.
    pub fn iso2(&self) -> Option<&str> {
        self.country_info
            .iso2
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// `(lat, lng)` when both coordinates are present and finite.
    pub fn lat_lng(&self) -> Option<(f64, f64)> {
        match (self.country_info.lat, self.country_info.long) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
            _ => None,
        }
    }
}

impl CaseCounts for CountryStat {
    fn total(&self, category: CaseCategory) -> Option<u64> {
        match category {
            CaseCategory::Confirmed => self.cases,
            CaseCategory::Recovered => self.recovered,
            CaseCategory::Deaths => self.deaths,
        }
    }

    fn today(&self, category: CaseCategory) -> Option<u64> {
        match category {
            CaseCategory::Confirmed => self.today_cases,
            CaseCategory::Recovered => self.today_recovered,
            CaseCategory::Deaths => self.today_deaths,
        }
    }
}

/// Worldwide totals (`/all`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStat {
    pub updated: Option<i64>,
    #[serde(default, deserialize_with = "de_count")]
    pub cases: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub today_cases: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub deaths: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub today_deaths: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub recovered: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub today_recovered: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub active: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub critical: Option<u64>,
    #[serde(default, deserialize_with = "de_count")]
    pub population: Option<u64>,
    pub affected_countries: Option<u32>,
}

impl CaseCounts for GlobalStat {
    fn total(&self, category: CaseCategory) -> Option<u64> {
        match category {
            CaseCategory::Confirmed => self.cases,
            CaseCategory::Recovered => self.recovered,
            CaseCategory::Deaths => self.deaths,
        }
    }

    fn today(&self, category: CaseCategory) -> Option<u64> {
        match category {
            CaseCategory::Confirmed => self.today_cases,
            CaseCategory::Recovered => self.today_recovered,
            CaseCategory::Deaths => self.today_deaths,
        }
    }
}

/// The totals shown on the info cards: either the global shape or one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Stats {
    Global(GlobalStat),
    Country(CountryStat),
}

impl Stats {
    pub fn is_global(&self) -> bool {
        matches!(self, Stats::Global(_))
    }
}

impl CaseCounts for Stats {
    fn total(&self, category: CaseCategory) -> Option<u64> {
        match self {
            Stats::Global(g) => g.total(category),
            Stats::Country(c) => c.total(category),
        }
    }

    fn today(&self, category: CaseCategory) -> Option<u64> {
        match self {
            Stats::Global(g) => g.today(category),
            Stats::Country(c) => c.today(category),
        }
    }
}

/// Entry of the country picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOption {
    pub name: String,
    pub code: String,
}

/// Picker value: the worldwide aggregate or one country code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    Worldwide,
    Country(String),
}

impl Selection {
    /// Picker code used for the worldwide entry.
    pub const WORLDWIDE: &'static str = "worldwide";

    /// Parse a picker code. `"worldwide"` (any case) and blank input select the aggregate.
    pub fn parse(code: &str) -> Self {
        let code = code.trim();
        if code.is_empty() || code.eq_ignore_ascii_case(Self::WORLDWIDE) {
            Selection::Worldwide
        } else {
            Selection::Country(code.to_string())
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Selection::Worldwide => Self::WORLDWIDE,
            Selection::Country(code) => code,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Map center and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub center: LatLng,
    pub zoom: u8,
}

impl ViewportState {
    pub const DEFAULT_CENTER: LatLng = LatLng {
        lat: 23.9037,
        lng: 121.0794,
    };
    pub const DEFAULT_ZOOM: u8 = 3;
    /// Zoom applied when a single country is selected.
    pub const COUNTRY_ZOOM: u8 = 4;

    /// Viewport focused on the given coordinates.
    pub fn focused(lat: f64, lng: f64) -> Self {
        Self {
            center: LatLng { lat, lng },
            zoom: Self::COUNTRY_ZOOM,
        }
    }

    /// Viewport matching the stats being displayed.
    ///
    /// Global stats and countries without coordinates fall back to the default view.
    pub fn for_stats(stats: &Stats) -> Self {
        match stats {
            Stats::Country(c) => match c.lat_lng() {
                Some((lat, lng)) => Self::focused(lat, lng),
                None => Self::default(),
            },
            Stats::Global(_) => Self::default(),
        }
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            center: Self::DEFAULT_CENTER,
            zoom: Self::DEFAULT_ZOOM,
        }
    }
}
