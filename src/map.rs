//! Bubble layer for the case map: per-category colors, circle sizes and a flat projection.

use crate::format::format_count;
use crate::models::{CaseCategory, CaseCounts, CountryStat, ViewportState};

/// Color and size factor for one category's bubbles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryStyle {
    pub hex: &'static str,
    pub rgb: (u8, u8, u8),
    /// Metres of radius per square root of the count.
    pub multiplier: f64,
}

pub fn category_style(category: CaseCategory) -> CategoryStyle {
    match category {
        CaseCategory::Confirmed => CategoryStyle {
            hex: "#CC1034",
            rgb: (204, 16, 52),
            multiplier: 800.0,
        },
        CaseCategory::Recovered => CategoryStyle {
            hex: "#7DD71D",
            rgb: (125, 215, 29),
            multiplier: 1200.0,
        },
        CaseCategory::Deaths => CategoryStyle {
            hex: "#FB4443",
            rgb: (251, 68, 67),
            multiplier: 2000.0,
        },
    }
}

/// Circle radius in metres: `sqrt(total) * multiplier`. Missing totals give 0.
pub fn bubble_radius_m(stat: &CountryStat, category: CaseCategory) -> f64 {
    let n = stat.total(category).unwrap_or(0) as f64;
    n.sqrt() * category_style(category).multiplier
}

/// One drawable circle with its popup text.
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub country: String,
    pub flag: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub radius_m: f64,
    /// Popup lines: "Cases: 1,234", "Recovered: ...", "Deaths: ...".
    pub popup: [String; 3],
}

/// Bubbles for every country that has coordinates, in input order.
pub fn bubbles(countries: &[CountryStat], category: CaseCategory) -> Vec<Bubble> {
    countries
        .iter()
        .filter_map(|c| {
            let (lat, lng) = c.lat_lng()?;
            Some(Bubble {
                country: c.country.clone(),
                flag: c.country_info.flag.clone(),
                lat,
                lng,
                radius_m: bubble_radius_m(c, category),
                popup: [
                    format!("Cases: {}", format_count(c.cases)),
                    format!("Recovered: {}", format_count(c.recovered)),
                    format!("Deaths: {}", format_count(c.deaths)),
                ],
            })
        })
        .collect()
}

const TILE_PX: f64 = 256.0;
const METRES_PER_DEGREE: f64 = 111_320.0;

/// Screen pixels per degree at the viewport's zoom (one 256px tile spans the world at zoom 0).
pub fn px_per_degree(viewport: &ViewportState) -> f64 {
    TILE_PX * 2f64.powi(viewport.zoom as i32) / 360.0
}

/// Equirectangular projection of `(lat, lng)` into a `width` x `height` canvas
/// centred on the viewport. Longitude differences wrap so the shorter way round wins.
pub fn project(lat: f64, lng: f64, viewport: &ViewportState, width: f64, height: f64) -> (f64, f64) {
    let ppd = px_per_degree(viewport);
    let mut dlng = lng - viewport.center.lng;
    if dlng > 180.0 {
        dlng -= 360.0;
    } else if dlng < -180.0 {
        dlng += 360.0;
    }
    let dlat = lat.clamp(-85.0, 85.0) - viewport.center.lat;
    (width / 2.0 + dlng * ppd, height / 2.0 - dlat * ppd)
}

/// Convert a radius in metres to pixels at the viewport's zoom (equatorial scale).
pub fn metres_to_px(radius_m: f64, viewport: &ViewportState) -> f64 {
    radius_m / METRES_PER_DEGREE * px_per_degree(viewport)
}
