use covid_tracker::dashboard::{Dashboard, Outcome};
use covid_tracker::models::{
    CaseCategory, CountryInfo, CountryStat, GlobalStat, LatLng, Selection, Stats, ViewportState,
};
use covid_tracker::Error;

fn germany() -> Stats {
    Stats::Country(CountryStat {
        country: "Germany".into(),
        country_info: CountryInfo {
            iso2: Some("DE".into()),
            lat: Some(51.0),
            long: Some(9.0),
            ..Default::default()
        },
        cases: Some(38_437_756),
        today_cases: Some(1_234),
        deaths: Some(174_979),
        ..Default::default()
    })
}

fn world() -> Stats {
    Stats::Global(GlobalStat {
        cases: Some(1_000_000),
        recovered: Some(900_000),
        deaths: Some(10_000),
        ..Default::default()
    })
}

#[test]
fn starts_worldwide_with_confirmed_highlighted() {
    let dash = Dashboard::new();
    assert_eq!(dash.snapshot().selection, Selection::Worldwide);
    assert_eq!(dash.snapshot().viewport, ViewportState::default());
    assert!(dash.snapshot().stats.is_none());
    assert_eq!(dash.category(), CaseCategory::Confirmed);
    assert!(!dash.is_loading());
}

#[test]
fn exactly_one_category_active_after_any_clicks() {
    let mut dash = Dashboard::new();
    let clicks = [
        CaseCategory::Deaths,
        CaseCategory::Recovered,
        CaseCategory::Recovered,
        CaseCategory::Confirmed,
        CaseCategory::Deaths,
    ];
    for click in clicks {
        dash.set_category(click);
        let cards = dash.info_cards();
        let active: Vec<_> = cards.iter().filter(|c| c.active).map(|c| c.category).collect();
        assert_eq!(active, vec![click]);
    }
}

#[test]
fn country_selection_focuses_viewport() {
    let mut dash = Dashboard::new();
    let ticket = dash.begin_selection(Selection::parse("DE"));
    assert!(dash.is_loading());
    assert_eq!(dash.shown_selection(), &Selection::Country("DE".into()));

    let outcome = dash.complete(ticket, Ok(germany()));
    assert!(matches!(outcome, Outcome::Applied));
    let snap = dash.snapshot();
    assert_eq!(snap.selection, Selection::Country("DE".into()));
    assert_eq!(snap.viewport.center, LatLng { lat: 51.0, lng: 9.0 });
    assert_eq!(snap.viewport.zoom, ViewportState::COUNTRY_ZOOM);
    assert!(!dash.is_loading());
}

#[test]
fn worldwide_resets_viewport_and_stats_shape() {
    let mut dash = Dashboard::new();
    let t = dash.begin_selection(Selection::Country("DE".into()));
    dash.complete(t, Ok(germany()));

    let t = dash.begin_selection(Selection::parse("worldwide"));
    assert!(matches!(dash.complete(t, Ok(world())), Outcome::Applied));

    let snap = dash.snapshot();
    assert_eq!(snap.selection, Selection::Worldwide);
    assert_eq!(snap.viewport.zoom, ViewportState::DEFAULT_ZOOM);
    assert_eq!(snap.viewport.center, ViewportState::DEFAULT_CENTER);
    assert!(snap.stats.as_ref().unwrap().is_global());
}

#[test]
fn stale_response_is_dropped() {
    let mut dash = Dashboard::new();
    let slow = dash.begin_selection(Selection::Country("DE".into()));
    let fast = dash.begin_selection(Selection::Worldwide);

    assert!(matches!(dash.complete(fast, Ok(world())), Outcome::Applied));
    // the older request resolves last and must not overwrite the newer one
    assert!(matches!(dash.complete(slow, Ok(germany())), Outcome::Stale));
    assert_eq!(dash.snapshot().selection, Selection::Worldwide);
    assert!(dash.snapshot().stats.as_ref().unwrap().is_global());
}

#[test]
fn failed_fetch_keeps_previous_snapshot() {
    let mut dash = Dashboard::new();
    let t = dash.begin_selection(Selection::Country("DE".into()));
    dash.complete(t, Ok(germany()));
    let before = dash.snapshot().clone();

    let t = dash.begin_selection(Selection::Country("ZZ".into()));
    let outcome = dash.complete(
        t,
        Err(Error::Api("Country not found or doesn't have any cases".into())),
    );
    assert!(matches!(outcome, Outcome::Failed(Error::Api(_))));
    assert_eq!(dash.snapshot(), &before);
    assert_eq!(dash.shown_selection(), &Selection::Country("DE".into()));
}

#[test]
fn mismatched_stats_shape_is_rejected() {
    let mut dash = Dashboard::new();
    let t = dash.begin_selection(Selection::Worldwide);
    let outcome = dash.complete(t, Ok(germany()));
    assert!(matches!(outcome, Outcome::Failed(Error::InvalidData(_))));
    assert!(dash.snapshot().stats.is_none());
}

#[test]
fn info_cards_format_counters() {
    let mut dash = Dashboard::new();
    let cards = dash.info_cards();
    assert_eq!(cards[0].total, "0");
    assert_eq!(cards[0].today, "+0");

    let t = dash.begin_selection(Selection::Country("DE".into()));
    dash.complete(t, Ok(germany()));
    let cards = dash.info_cards();
    assert_eq!(cards[0].title, "Coronavirus Cases");
    assert_eq!(cards[0].total, "38,437,756");
    assert_eq!(cards[0].today, "+1.2k");
    assert!(cards[0].is_red);
    assert_eq!(cards[1].title, "Recovered");
    assert_eq!(cards[1].total, "0");
    assert!(!cards[1].is_red);
    assert_eq!(cards[2].total, "174,979");
}

#[test]
fn country_list_replaced_or_kept() {
    let mut dash = Dashboard::new();
    let rows = vec![
        CountryStat { country: "A".into(), cases: Some(100), ..Default::default() },
        CountryStat { country: "B".into(), cases: Some(500), ..Default::default() },
    ];
    assert!(matches!(dash.load_countries(Ok(rows)), Outcome::Applied));
    assert_eq!(dash.countries().table[0].country, "B");

    let outcome = dash.load_countries(Err(Error::InvalidData("boom".into())));
    assert!(matches!(outcome, Outcome::Failed(_)));
    assert_eq!(dash.countries().map.len(), 2);
}
