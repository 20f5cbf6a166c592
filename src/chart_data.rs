//! Chart-ready payloads: sunburst node rows, scatter points, and the
//! per-developer sales bars consumed by external renderers.

use color_eyre::Result;
use polars::prelude::*;
use serde::Serialize;

use crate::dataset::REGIONAL_COLUMNS;

/// One node of a hierarchical (sunburst) chart. `id` is the `/`-joined
/// level prefix, so node ids round-trip through the drill-down resolver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunburstNode {
    pub id: String,
    pub parent: String,
    pub value: f64,
}

/// One point of the critic score vs total sales scatter, colored by genre.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub critic_score: f64,
    pub total_sales: f64,
    pub genre: String,
}

/// One bar of the total-sales-by-developer chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSlice {
    pub developer: String,
    pub total_sales: f64,
}

/// Build sunburst node rows for the given hierarchy levels: one node per
/// distinct level prefix, valued by the summed measure. Nodes are ordered
/// by depth, then lexicographically within a ring.
pub fn sunburst_rows(df: &DataFrame, levels: &[&str], measure: &str) -> Result<Vec<SunburstNode>> {
    let mut nodes = Vec::new();
    if df.height() == 0 || levels.is_empty() {
        return Ok(nodes);
    }

    for depth in 1..=levels.len() {
        let prefix = &levels[..depth];
        let group_cols: Vec<Expr> = prefix.iter().map(|c| col(*c)).collect();
        let options = SortMultipleOptions {
            descending: vec![false; depth],
            ..Default::default()
        };
        let grouped = df
            .clone()
            .lazy()
            .group_by(group_cols.clone())
            .agg([col(measure).sum()])
            .sort_by_exprs(group_cols, options)
            .collect()?;

        let mut level_values = Vec::with_capacity(depth);
        for name in prefix {
            let column = grouped.column(name)?.clone();
            level_values.push(column);
        }
        let totals = grouped.column(measure)?.cast(&DataType::Float64)?;
        let totals = totals.f64()?;

        for row in 0..grouped.height() {
            let mut segments = Vec::with_capacity(depth);
            for column in &level_values {
                segments.push(column.str()?.get(row).unwrap_or("").to_string());
            }
            let id = segments.join("/");
            let parent = segments[..depth - 1].join("/");
            nodes.push(SunburstNode {
                id,
                parent,
                value: totals.get(row).unwrap_or(0.0),
            });
        }
    }

    Ok(nodes)
}

/// Build the innermost sunburst ring: each title's sales split across the
/// regional columns, one leaf node per region parented on the title.
/// Regional columns absent from the frame are skipped; a frame carrying
/// none of them yields no nodes.
pub fn regional_breakdown(df: &DataFrame) -> Result<Vec<SunburstNode>> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    let regions: Vec<&str> = REGIONAL_COLUMNS
        .iter()
        .copied()
        .filter(|r| names.iter().any(|n| n == r))
        .collect();
    if df.height() == 0 || regions.is_empty() {
        return Ok(Vec::new());
    }

    let sums: Vec<Expr> = regions.iter().map(|r| col(*r).sum()).collect();
    let options = SortMultipleOptions {
        descending: vec![false],
        ..Default::default()
    };
    let grouped = df
        .clone()
        .lazy()
        .group_by([col("title")])
        .agg(sums)
        .sort_by_exprs(vec![col("title")], options)
        .collect()?;

    let titles = grouped.column("title")?.clone();
    let titles = titles.str()?;
    let mut totals = Vec::with_capacity(regions.len());
    for region in &regions {
        totals.push(grouped.column(region)?.cast(&DataType::Float64)?);
    }

    let mut nodes = Vec::with_capacity(grouped.height() * regions.len());
    for row in 0..grouped.height() {
        let title = titles.get(row).unwrap_or("");
        for (region, column) in regions.iter().zip(&totals) {
            nodes.push(SunburstNode {
                id: format!("{}/{}", title, region),
                parent: title.to_string(),
                value: column.f64()?.get(row).unwrap_or(0.0),
            });
        }
    }
    Ok(nodes)
}

/// Extract scatter points, dropping rows where either numeric value is
/// missing. Run after imputation when visual continuity matters.
pub fn scatter_points(df: &DataFrame) -> Result<Vec<ScatterPoint>> {
    if df.height() == 0 {
        return Ok(Vec::new());
    }

    let scores = df.column("critic_score")?.cast(&DataType::Float64)?;
    let scores = scores.f64()?;
    let sales = df.column("total_sales")?.cast(&DataType::Float64)?;
    let sales = sales.f64()?;
    let genres = df.column("genre")?.clone();
    let genres = genres.str()?;

    let mut points = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        if let (Some(critic_score), Some(total_sales)) = (scores.get(i), sales.get(i)) {
            points.push(ScatterPoint {
                critic_score,
                total_sales,
                genre: genres.get(i).unwrap_or("").to_string(),
            });
        }
    }
    Ok(points)
}

/// Total sales summed per developer, largest first.
pub fn sales_by_developer(df: &DataFrame) -> Result<Vec<BarSlice>> {
    if df.height() == 0 {
        return Ok(Vec::new());
    }

    let options = SortMultipleOptions {
        descending: vec![true],
        ..Default::default()
    };
    let grouped = df
        .clone()
        .lazy()
        .group_by([col("developer")])
        .agg([col("total_sales").sum()])
        .sort_by_exprs(vec![col("total_sales")], options)
        .collect()?;

    let developers = grouped.column("developer")?.clone();
    let developers = developers.str()?;
    let totals = grouped.column("total_sales")?.cast(&DataType::Float64)?;
    let totals = totals.f64()?;

    let mut bars = Vec::with_capacity(grouped.height());
    for i in 0..grouped.height() {
        bars.push(BarSlice {
            developer: developers.get(i).unwrap_or("").to_string(),
            total_sales: totals.get(i).unwrap_or(0.0),
        });
    }
    Ok(bars)
}
