//! Hand-off to external renderers: sunburst nodes as JSON, scatter and bar
//! charts as PNG via the plotters bitmap backend.

use color_eyre::Result;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::chart_data::{BarSlice, ScatterPoint, SunburstNode};

/// Write sunburst node rows as a JSON array of `{id, parent, value}`
/// objects, the shape hierarchical chart libraries consume directly.
pub fn write_sunburst_json(path: &Path, nodes: &[SunburstNode]) -> Result<()> {
    let mut f = File::create(path)?;
    serde_json::to_writer_pretty(&mut f, nodes)?;
    f.write_all(b"\n")?;
    f.sync_all()?;
    Ok(())
}

/// Write the critic score vs total sales scatter to PNG, one colored
/// series per genre.
pub fn write_scatter_png(path: &Path, points: &[ScatterPoint]) -> Result<()> {
    use plotters::prelude::*;

    if points.is_empty() {
        return Err(color_eyre::eyre::eyre!("No data to export"));
    }

    // Group into per-genre series; BTreeMap keeps legend order stable.
    let mut by_genre: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    for p in points {
        by_genre
            .entry(p.genre.as_str())
            .or_default()
            .push((p.critic_score, p.total_sales));
    }

    let x_max = points
        .iter()
        .map(|p| p.critic_score)
        .fold(f64::MIN, f64::max);
    let x_min = points
        .iter()
        .map(|p| p.critic_score)
        .fold(f64::MAX, f64::min);
    let y_max = points.iter().map(|p| p.total_sales).fold(f64::MIN, f64::max);

    let root = BitMapBackend::new(path, (640, 480)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(30)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max.max(x_min + 1.0), 0.0..y_max.max(1.0))?;

    chart
        .configure_mesh()
        .x_desc("critic_score")
        .y_desc("total_sales")
        .draw()?;

    let colors = [
        CYAN,
        MAGENTA,
        GREEN,
        YELLOW,
        BLUE,
        RED,
        RGBColor(128, 255, 255),
    ];

    for (idx, (genre, series)) in by_genre.iter().enumerate() {
        let color = colors[idx % colors.len()];
        chart
            .draw_series(PointSeries::of_element(
                series.iter().copied(),
                3,
                color,
                &|c, s, _| EmptyElement::at(c) + Circle::new((0, 0), s, color.filled()),
            ))?
            .label(*genre)
            .legend(move |(x, y)| Circle::new((x + 10, y), 3, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Write the total-sales-by-developer bars to PNG. Bars keep the input
/// order (callers pass them sorted descending).
pub fn write_bars_png(path: &Path, bars: &[BarSlice]) -> Result<()> {
    use plotters::prelude::*;

    if bars.is_empty() {
        return Err(color_eyre::eyre::eyre!("No data to export"));
    }

    let y_max = bars.iter().map(|b| b.total_sales).fold(f64::MIN, f64::max);

    let root = BitMapBackend::new(path, (640, 480)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(30)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..bars.len() as f64 - 0.5, 0.0..y_max.max(1.0))?;

    chart
        .configure_mesh()
        .x_desc("developer")
        .y_desc("total_sales")
        .x_label_formatter(&|x| {
            let i = x.round() as i64;
            if i >= 0 && (i as usize) < bars.len() && (x - i as f64).abs() < 1e-9 {
                bars[i as usize].developer.clone()
            } else {
                String::new()
            }
        })
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, b)| {
        let x0 = i as f64 - 0.3;
        let x1 = i as f64 + 0.3;
        Rectangle::new([(x0, 0.0), (x1, b.total_sales)], CYAN.filled())
    }))?;

    root.present()?;
    Ok(())
}
