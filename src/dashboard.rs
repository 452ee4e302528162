//! Dashboard state: picker selection, displayed stats, map viewport, highlighted category.
//!
//! Fetches run outside this type. A selection change hands out a [`Ticket`]
//! tagged with a sequence number; the caller performs the request and reports
//! back through [`Dashboard::complete`]. Only the response to the most recent
//! ticket is applied, and it replaces selection, stats and viewport together.
//!
//! ```
//! use covid_tracker::dashboard::{Dashboard, Outcome};
//! use covid_tracker::models::{GlobalStat, Selection, Stats};
//!
//! let mut dash = Dashboard::new();
//! let ticket = dash.begin_selection(Selection::Worldwide);
//! let outcome = dash.complete(ticket, Ok(Stats::Global(GlobalStat::default())));
//! assert!(matches!(outcome, Outcome::Applied));
//! ```

use crate::error::Error;
use crate::format::{format_count, pretty_print_stat};
use crate::models::{CaseCategory, CaseCounts, CountryStat, Selection, Stats, ViewportState};
use crate::normalize::{CountryList, normalize};
use log::{debug, warn};

/// Everything that has to change together when a selection resolves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub selection: Selection,
    /// `None` until the first fetch succeeds.
    pub stats: Option<Stats>,
    pub viewport: ViewportState,
}

/// Handle for one in-flight selection fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    selection: Selection,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }
}

/// What happened to a completed fetch.
#[derive(Debug)]
pub enum Outcome {
    /// The new snapshot is now displayed.
    Applied,
    /// A newer selection was issued meanwhile; the response was dropped.
    Stale,
    /// The fetch failed; the previous snapshot is still displayed.
    Failed(Error),
}

/// One of the three summary cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoCard {
    pub category: CaseCategory,
    pub title: &'static str,
    /// Compact "today" delta, e.g. `+1.2k`.
    pub today: String,
    /// Grouped cumulative total, e.g. `1,234,567`.
    pub total: String,
    pub active: bool,
    /// Confirmed and deaths cards render in red.
    pub is_red: bool,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    snapshot: Snapshot,
    countries: CountryList,
    category: CaseCategory,
    last_issued: u64,
    pending: Option<Selection>,
}

impl Dashboard {
    /// Worldwide, default viewport, confirmed cases, nothing loaded yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn countries(&self) -> &CountryList {
        &self.countries
    }

    pub fn category(&self) -> CaseCategory {
        self.category
    }

    /// Selection the picker should show: the latest request if one is in flight.
    pub fn shown_selection(&self) -> &Selection {
        self.pending.as_ref().unwrap_or(&self.snapshot.selection)
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Make `category` the only highlighted one.
    pub fn set_category(&mut self, category: CaseCategory) {
        self.category = category;
    }

    /// Register a new selection and return the ticket for its fetch.
    ///
    /// Issuing a ticket supersedes every ticket issued before it.
    pub fn begin_selection(&mut self, selection: Selection) -> Ticket {
        self.last_issued += 1;
        self.pending = Some(selection.clone());
        debug!("selection #{} -> {}", self.last_issued, selection);
        Ticket {
            seq: self.last_issued,
            selection,
        }
    }

    /// Apply the result of the fetch started with `ticket`.
    pub fn complete(&mut self, ticket: Ticket, result: Result<Stats, Error>) -> Outcome {
        if ticket.seq != self.last_issued {
            debug!(
                "dropping stale response #{} for {} (latest is #{})",
                ticket.seq, ticket.selection, self.last_issued
            );
            return Outcome::Stale;
        }
        self.pending = None;

        let stats = match result {
            Ok(stats) => stats,
            Err(err) => {
                warn!("fetch for {} failed: {}", ticket.selection, err);
                return Outcome::Failed(err);
            }
        };
        if stats.is_global() != (ticket.selection == Selection::Worldwide) {
            let err = Error::InvalidData(format!(
                "stats shape does not match selection {}",
                ticket.selection
            ));
            warn!("{}", err);
            return Outcome::Failed(err);
        }

        let next = Snapshot {
            viewport: ViewportState::for_stats(&stats),
            selection: ticket.selection,
            stats: Some(stats),
        };
        debug!("applied snapshot: {:?}", next);
        self.snapshot = next;
        Outcome::Applied
    }

    /// Replace the country list (map, table, picker) from a `/countries` fetch.
    ///
    /// On error the previous list stays in place.
    pub fn load_countries(&mut self, result: Result<Vec<CountryStat>, Error>) -> Outcome {
        match result {
            Ok(countries) => {
                self.countries = normalize(countries);
                debug!("loaded {} countries", self.countries.map.len());
                Outcome::Applied
            }
            Err(err) => {
                warn!("country list fetch failed: {}", err);
                Outcome::Failed(err)
            }
        }
    }

    /// Cards for confirmed, recovered and deaths, in that order.
    pub fn info_cards(&self) -> [InfoCard; 3] {
        let stats = self.snapshot.stats.as_ref();
        CaseCategory::ALL.map(|category| InfoCard {
            category,
            title: category.title(),
            today: pretty_print_stat(stats.and_then(|s| s.today(category))),
            total: format_count(stats.and_then(|s| s.total(category))),
            active: category == self.category,
            is_red: category != CaseCategory::Recovered,
        })
    }
}
