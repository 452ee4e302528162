//! covid_tracker
//!
//! A lightweight Rust library for fetching, reshaping and charting public COVID-19
//! statistics from the disease.sh API. Pairs with the `covid` CLI and the
//! `covid-gui` desktop dashboard.
//!
//! ### Features
//! - Fetch worldwide totals, per-country totals, a single country, and the worldwide timeline
//! - Sort countries by confirmed cases (stable) and build picker options
//! - Thousands-grouped and compact counters for cards and tables
//! - Dashboard state with last-selection-wins fetch sequencing
//! - Bubble map sizing and an SVG/PNG daily-new line chart
//! - Export the sorted table as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use covid_tracker::{Client, CaseCategory};
//!
//! let client = Client::default();
//! let list = covid_tracker::normalize::normalize(client.fetch_countries()?);
//! covid_tracker::storage::save_table_csv(&list.table, "countries.csv")?;
//! let timeline = client.fetch_history(120)?;
//! let daily = covid_tracker::history::daily_new(&timeline, CaseCategory::Confirmed);
//! covid_tracker::chart::plot_daily(&daily, "new_cases.svg", 1000, 600, CaseCategory::Confirmed)?;
//! # Ok::<(), covid_tracker::Error>(())
//! ```

pub mod api;
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod history;
pub mod map;
pub mod models;
pub mod normalize;
pub mod storage;

pub use api::{Client, ClientConfig};
pub use dashboard::{Dashboard, Outcome, Ticket};
pub use error::{Error, Result};
pub use models::{
    CaseCategory, CaseCounts, CountryStat, GlobalStat, Selection, SelectionOption, Stats,
    ViewportState,
};
