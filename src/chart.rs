//! Render the daily-new series as a filled line chart to **SVG** or **PNG**.
//!
//! The backend is picked from the output extension (`.svg`, anything else is a bitmap).
//! No text is drawn, so no font has to be registered for the `ab_glyph` path.

use crate::error::{Error, Result};
use crate::history::DailyPoint;
use crate::map::category_style;
use crate::models::CaseCategory;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;

fn chart_err<E: std::fmt::Debug>(e: E) -> Error {
    Error::Chart(format!("{:?}", e))
}

/// Plot `points` (one per day, in date order) for `category`.
pub fn plot_daily<P: AsRef<Path>>(
    points: &[DailyPoint],
    out_path: P,
    width: u32,
    height: u32,
    category: CaseCategory,
) -> Result<()> {
    if points.is_empty() {
        return Err(Error::Chart("no data to plot".into()));
    }
    if width == 0 || height == 0 {
        return Err(Error::Chart("chart dimensions must be non-zero".into()));
    }

    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    let mut min_val = points.iter().map(|p| p.value).min().unwrap_or(0).min(0);
    let mut max_val = points.iter().map(|p| p.value).max().unwrap_or(0).max(0);
    if min_val == max_val {
        min_val -= 1;
        max_val += 1;
    }
    let max_x = (points.len() as i32 - 1).max(1);

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, points, max_x, min_val, max_val, category)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, points, max_x, min_val, max_val, category)?;
    }
    log::debug!("wrote {} daily points to {}", points.len(), out_path.display());
    Ok(())
}

fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    points: &[DailyPoint],
    max_x: i32,
    min_val: i64,
    max_val: i64,
    category: CaseCategory,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(0i32..max_x, min_val..max_val)
        .map_err(chart_err)?;

    let (r, g, b) = category_style(category).rgb;
    let color = RGBColor(r, g, b);

    // Zero baseline
    chart
        .draw_series(LineSeries::new(
            [(0, 0i64), (max_x, 0)],
            ShapeStyle {
                color: RGBColor(165, 165, 165).to_rgba(),
                filled: false,
                stroke_width: 1,
            },
        ))
        .map_err(chart_err)?;

    let series: Vec<(i32, i64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as i32, p.value))
        .collect();

    let fill = color.mix(0.35).filled();
    let border = color.stroke_width(2);
    chart
        .draw_series(AreaSeries::new(series, 0, fill).border_style(border))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}
