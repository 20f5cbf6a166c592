pub mod app;
pub mod chart_data;
pub mod chart_export;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod drilldown;
pub mod impute;

pub use app::{ClickEvent, Dashboard, DashboardView, DetailView};
pub use cli::Args;
pub use config::{AppConfig, ConfigManager};
pub use dataset::{OpenOptions, SalesTable, HIERARCHY, MEASURE, REGIONAL_COLUMNS};
pub use drilldown::{resolve, DrillView};
pub use impute::{fill_missing, ImputeBounds, ImputeReport};

/// Application name used for config directory and other app-specific paths
pub const APP_NAME: &str = "vgdrill";
