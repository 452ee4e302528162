use covid_tracker::map::{bubble_radius_m, bubbles, category_style, metres_to_px, project};
use covid_tracker::models::{CaseCategory, CountryInfo, CountryStat, ViewportState};

fn located(name: &str, lat: f64, lng: f64, cases: u64, deaths: u64) -> CountryStat {
    CountryStat {
        country: name.into(),
        country_info: CountryInfo {
            lat: Some(lat),
            long: Some(lng),
            ..Default::default()
        },
        cases: Some(cases),
        deaths: Some(deaths),
        ..Default::default()
    }
}

#[test]
fn radius_scales_with_sqrt_and_category_multiplier() {
    let c = located("A", 0.0, 0.0, 10_000, 100);
    assert_eq!(bubble_radius_m(&c, CaseCategory::Confirmed), 100.0 * 800.0);
    assert_eq!(bubble_radius_m(&c, CaseCategory::Deaths), 10.0 * 2000.0);
    // recovered missing
    assert_eq!(bubble_radius_m(&c, CaseCategory::Recovered), 0.0);
}

#[test]
fn category_colors() {
    assert_eq!(category_style(CaseCategory::Confirmed).hex, "#CC1034");
    assert_eq!(category_style(CaseCategory::Recovered).rgb, (125, 215, 29));
    assert_eq!(category_style(CaseCategory::Deaths).multiplier, 2000.0);
}

#[test]
fn bubbles_skip_countries_without_coordinates() {
    let rows = vec![
        located("A", 10.0, 20.0, 4, 1),
        CountryStat { country: "Nowhere".into(), cases: Some(5), ..Default::default() },
        located("B", -10.0, -20.0, 1_234, 0),
    ];
    let out = bubbles(&rows, CaseCategory::Confirmed);
    let names: Vec<&str> = out.iter().map(|b| b.country.as_str()).collect();
    assert_eq!(names, ["A", "B"]);
    assert_eq!(out[1].popup[0], "Cases: 1,234");
    assert_eq!(out[1].popup[1], "Recovered: 0");
}

#[test]
fn projection_puts_center_in_the_middle() {
    let vp = ViewportState::focused(51.0, 9.0);
    let (x, y) = project(51.0, 9.0, &vp, 800.0, 600.0);
    assert!((x - 400.0).abs() < 1e-9);
    assert!((y - 300.0).abs() < 1e-9);

    // east is right, north is up
    let (xe, yn) = project(52.0, 10.0, &vp, 800.0, 600.0);
    assert!(xe > 400.0);
    assert!(yn < 300.0);
}

#[test]
fn projection_wraps_the_antimeridian() {
    let vp = ViewportState::focused(0.0, 179.0);
    let (x, _) = project(0.0, -179.0, &vp, 800.0, 600.0);
    // two degrees east, not 358 degrees west
    assert!(x > 400.0);
}

#[test]
fn radius_grows_with_zoom() {
    let far = ViewportState::default();
    let near = ViewportState::focused(0.0, 0.0);
    assert!(metres_to_px(100_000.0, &near) > metres_to_px(100_000.0, &far));
}
