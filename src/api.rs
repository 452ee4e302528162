//! Synchronous client for the **disease.sh COVID-19 API (v3)**.
//!
//! Covers the four endpoints the dashboard needs and decodes them into the
//! typed records in [`crate::models`]:
//!
//! - `/all`: worldwide totals
//! - `/countries`: one record per country
//! - `/countries/{code}`: a single country (ISO2, ISO3 or name)
//! - `/historical/all?lastdays=N`: cumulative worldwide timeline
//!
//! ### Notes
//! - Failed requests are not retried; the error is returned to the caller.
//! - An unknown country answers with HTTP 404 and a `{"message": ...}` body, which
//!   is surfaced as [`Error::Api`].
//! - The base URL can be overridden with the `COVID_API_BASE_URL` environment variable
//!   (see [`ClientConfig::from_env`]).
//!
//! Typical usage:
//! ```no_run
//! # use covid_tracker::{Client, normalize};
//! let client = Client::default();
//! let countries = client.fetch_countries()?;
//! let list = normalize::normalize(countries);
//! println!("{} countries, top: {:?}", list.table.len(), list.table.first().map(|c| &c.country));
//! # Ok::<(), covid_tracker::Error>(())
//! ```
use crate::error::{Error, Result};
use crate::history::Timeline;
use crate::models::{CountryStat, GlobalStat, Selection, Stats};
use log::debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://disease.sh/v3/covid-19";

/// Environment variable that overrides [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "COVID_API_BASE_URL";

/// HTTP settings for [`Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Total request timeout.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_redirects: 5,
            user_agent: concat!("covid_tracker/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl ClientConfig {
    /// Defaults, with the base URL taken from `COVID_API_BASE_URL` when it is set and non-empty.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                cfg.base_url = url.to_string();
            }
        }
        cfg
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::with_config(ClientConfig::default()).expect("reqwest client build")
    }
}

// Codes are ISO2/ISO3 or country names ("Diamond Princess"); keep '-', '_', '.' readable.
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(part: &str) -> String {
    percent_encoding::utf8_percent_encode(part.trim(), SAFE).to_string()
}

/// Decode an API payload into `T`.
///
/// A top-level object carrying a `message` field is the API's error envelope and
/// becomes [`Error::Api`]; any other shape mismatch is [`Error::MalformedResponse`].
pub fn decode<T: DeserializeOwned>(value: Value, context: &'static str) -> Result<T> {
    if let Some(msg) = value.get("message") {
        let msg = msg.as_str().map(str::to_string).unwrap_or_else(|| msg.to_string());
        return Err(Error::Api(msg));
    }
    serde_json::from_value(value).map_err(|source| Error::MalformedResponse { context, source })
}

impl Client {
    pub fn with_config(cfg: ClientConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(cfg.timeout)
            .connect_timeout(cfg.connect_timeout)
            .redirect(Policy::limited(cfg.max_redirects))
            .user_agent(cfg.user_agent)
            .build()?;
        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// GET `{base_url}{path}` and parse the body as JSON.
    ///
    /// 404 bodies are still parsed: the API explains unknown countries in a
    /// `message` field, which [`decode`] turns into a readable error.
    fn get_json(&self, path: &str, context: &'static str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);
        let resp = self.http.get(&url).send()?;
        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string));
            if let Some(msg) = message {
                return Err(Error::Api(msg));
            }
            return Err(Error::Http { status, url });
        }
        serde_json::from_str(&body).map_err(|source| Error::MalformedResponse { context, source })
    }

    /// Worldwide totals.
    pub fn fetch_global(&self) -> Result<GlobalStat> {
        let v = self.get_json("/all", "global totals")?;
        decode(v, "global totals")
    }

    /// Per-country totals in API order.
    pub fn fetch_countries(&self) -> Result<Vec<CountryStat>> {
        let v = self.get_json("/countries", "country list")?;
        if !v.is_array() {
            // Error envelopes are objects; let `decode` surface their message.
            decode::<Value>(v, "country list")?;
            return Err(Error::InvalidData(
                "country list: expected a top-level array".into(),
            ));
        }
        decode(v, "country list")
    }

    /// Totals for one country. `code` may be ISO2, ISO3 or the country name.
    pub fn fetch_country(&self, code: &str) -> Result<CountryStat> {
        if code.trim().is_empty() {
            return Err(Error::InvalidData("empty country code".into()));
        }
        let v = self.get_json(&format!("/countries/{}", enc(code)), "country totals")?;
        decode(v, "country totals")
    }

    /// Stats for a picker selection: global totals for `Worldwide`, otherwise one country.
    pub fn fetch_selection(&self, selection: &Selection) -> Result<Stats> {
        match selection {
            Selection::Worldwide => self.fetch_global().map(Stats::Global),
            Selection::Country(code) => self.fetch_country(code).map(Stats::Country),
        }
    }

    /// Cumulative worldwide timeline for the last `last_days` days.
    pub fn fetch_history(&self, last_days: u32) -> Result<Timeline> {
        let v = self.get_json(
            &format!("/historical/all?lastdays={}", last_days),
            "historical timeline",
        )?;
        Timeline::from_value(v)
    }
}
