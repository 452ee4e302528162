//! Error type shared by the fetcher, the dashboard state and the exporters.
//!
//! Every variant is recoverable: a failed fetch leaves the displayed dashboard
//! untouched and the front end decides how to surface the message.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure (DNS, TLS, timeout, connection reset).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("request to {url} failed with HTTP {status}")]
    Http {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The API returned a `{"message": ...}` payload instead of data.
    #[error("disease.sh api error: {0}")]
    Api(String),

    /// The body was not the JSON shape we expected.
    #[error("malformed response ({context}): {source}")]
    MalformedResponse {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Well-formed JSON carrying values that break a data invariant.
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("chart rendering failed: {0}")]
    Chart(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
