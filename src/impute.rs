//! Synthetic substitution for missing critic scores and sales figures.
//!
//! The filled values are uniform draws for visualization continuity only.
//! They are not real review or sales data and must never be written back
//! to the source table; callers always receive a fresh copy.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use polars::prelude::*;
use rand::Rng;

/// Ranges the synthetic draws are taken from, plus rounding precision.
#[derive(Debug, Clone, PartialEq)]
pub struct ImputeBounds {
    pub critic_score_min: f64,
    pub critic_score_max: f64,
    pub total_sales_min: f64,
    pub total_sales_max: f64,
    pub decimals: u32,
}

impl Default for ImputeBounds {
    fn default() -> Self {
        Self {
            critic_score_min: 1.0,
            critic_score_max: 6.0,
            total_sales_min: 0.1,
            total_sales_max: 2.5,
            decimals: 2,
        }
    }
}

impl ImputeBounds {
    pub fn validate(&self) -> Result<()> {
        if self.critic_score_min > self.critic_score_max {
            return Err(eyre!(
                "critic score bounds are inverted: {} > {}",
                self.critic_score_min,
                self.critic_score_max
            ));
        }
        if self.total_sales_min > self.total_sales_max {
            return Err(eyre!(
                "total sales bounds are inverted: {} > {}",
                self.total_sales_min,
                self.total_sales_max
            ));
        }
        Ok(())
    }
}

/// How many values were substituted, for observability only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImputeReport {
    pub critic_scores_filled: usize,
    pub total_sales_filled: usize,
}

impl ImputeReport {
    pub fn total(&self) -> usize {
        self.critic_scores_filled + self.total_sales_filled
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Replace nulls in one numeric column with uniform draws from `[min, max]`.
fn fill_column<R: Rng>(
    df: &mut DataFrame,
    name: &str,
    min: f64,
    max: f64,
    decimals: u32,
    rng: &mut R,
) -> Result<usize> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    let values = column.f64()?;
    if values.null_count() == 0 {
        return Ok(0);
    }

    let mut filled = 0;
    let replaced: Vec<f64> = values
        .into_iter()
        .map(|v| match v {
            Some(v) => v,
            None => {
                filled += 1;
                // Coarse rounding can push a draw outside the range, so
                // clamp it back in.
                round_to(rng.gen_range(min..=max), decimals).clamp(min, max)
            }
        })
        .collect();

    df.with_column(Series::new(name.into(), replaced))?;
    Ok(filled)
}

/// Produce a copy of `df` with missing `critic_score` and `total_sales`
/// values substituted by independent uniform draws. The input frame is
/// untouched.
pub fn fill_missing<R: Rng>(
    df: &DataFrame,
    bounds: &ImputeBounds,
    rng: &mut R,
) -> Result<(DataFrame, ImputeReport)> {
    let mut out = df.clone();
    let report = ImputeReport {
        critic_scores_filled: fill_column(
            &mut out,
            "critic_score",
            bounds.critic_score_min,
            bounds.critic_score_max,
            bounds.decimals,
            rng,
        )?,
        total_sales_filled: fill_column(
            &mut out,
            "total_sales",
            bounds.total_sales_min,
            bounds.total_sales_max,
            bounds.decimals,
            rng,
        )?,
    };

    if report.total() > 0 {
        log::info!(
            "substituted {} missing values ({} critic scores, {} sales figures)",
            report.total(),
            report.critic_scores_filled,
            report.total_sales_filled
        );
    }

    Ok((out, report))
}
