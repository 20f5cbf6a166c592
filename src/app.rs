//! Event-handling adapter between the UI transport and the resolver. A
//! `Dashboard` owns the table and rebuilds the current view per click;
//! clicks are handled one at a time, each running to completion.

use color_eyre::Result;
use polars::prelude::DataFrame;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chart_data::{
    regional_breakdown, sales_by_developer, scatter_points, sunburst_rows, BarSlice, ScatterPoint,
    SunburstNode,
};
use crate::config::AppConfig;
use crate::dataset::{SalesTable, MEASURE};
use crate::drilldown::{resolve, DrillView};
use crate::impute::{fill_missing, ImputeBounds};

/// A chart-node click as delivered by the UI boundary. Only the node path
/// is consumed; `None` models the initial (no prior click) state.
#[derive(Debug, Clone, Default)]
pub struct ClickEvent {
    pub path: Option<String>,
}

impl ClickEvent {
    pub fn root() -> Self {
        Self { path: None }
    }

    pub fn node(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

/// Detail charts for a drilled-in subset.
pub struct DetailView {
    /// Sunburst rows for the subset at the policy's next levels.
    pub sunburst: Vec<SunburstNode>,
    /// Hierarchy columns those rows were built from.
    pub levels: Vec<&'static str>,
    /// Innermost ring: per-title leaves splitting sales across the
    /// regional columns.
    pub regional: Vec<SunburstNode>,
    /// Per-developer sales bars for the subset.
    pub bars: Vec<BarSlice>,
    /// Rows in the subset before imputation.
    pub row_count: usize,
}

/// Everything the renderers need for the current state.
pub struct DashboardView {
    /// Top-level console/publisher sunburst rows; always present.
    pub overview: Vec<SunburstNode>,
    /// Critic score vs total sales points: the full table at root, the
    /// imputed subset after a drill.
    pub scatter: Vec<ScatterPoint>,
    /// Present only after a drill-down click.
    pub detail: Option<DetailView>,
}

impl DashboardView {
    pub fn is_root(&self) -> bool {
        self.detail.is_none()
    }
}

/// Owns the read-only table and per-process RNG; constructed once at
/// startup by the serving process.
pub struct Dashboard {
    table: SalesTable,
    bounds: ImputeBounds,
    rng: StdRng,
}

impl Dashboard {
    pub fn new(table: SalesTable, config: &AppConfig, seed: Option<u64>) -> Result<Self> {
        let bounds = ImputeBounds::from(&config.imputation);
        bounds.validate()?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { table, bounds, rng })
    }

    pub fn table(&self) -> &SalesTable {
        &self.table
    }

    /// The view before any click: top-level sunburst plus the unfiltered
    /// scatter, no detail.
    pub fn root_view(&self) -> Result<DashboardView> {
        let df = self.table.dataframe();
        Ok(DashboardView {
            overview: sunburst_rows(df, &["console", "publisher"], MEASURE)?,
            scatter: scatter_points(df)?,
            detail: None,
        })
    }

    /// Handle one click event, resolving the node path and rebuilding the
    /// view. Malformed paths and reset clicks land back on the root view,
    /// and so does any selection whose charts cannot be built.
    pub fn click(&mut self, event: &ClickEvent) -> Result<DashboardView> {
        let drill = match resolve(event.path.as_deref(), &self.table) {
            Ok(drill) => drill,
            Err(e) => {
                log::warn!("could not resolve click path ({}), resetting to top-level view", e);
                return self.root_view();
            }
        };
        match drill {
            DrillView::Root => self.root_view(),
            DrillView::Detail {
                subset,
                levels,
                measure,
            } => match self.detail_view(subset, levels, measure) {
                Ok(view) => Ok(view),
                Err(e) => {
                    log::warn!("could not build detail view ({}), resetting to top-level view", e);
                    self.root_view()
                }
            },
        }
    }

    fn detail_view(
        &mut self,
        subset: DataFrame,
        levels: Vec<&'static str>,
        measure: &'static str,
    ) -> Result<DashboardView> {
        let row_count = subset.height();
        let (filled, _report) = fill_missing(&subset, &self.bounds, &mut self.rng)?;
        Ok(DashboardView {
            overview: sunburst_rows(self.table.dataframe(), &["console", "publisher"], measure)?,
            scatter: scatter_points(&filled)?,
            detail: Some(DetailView {
                sunburst: sunburst_rows(&filled, &levels, measure)?,
                levels,
                regional: regional_breakdown(&filled)?,
                bars: sales_by_developer(&filled)?,
                row_count,
            }),
        })
    }
}
