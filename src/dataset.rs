//! The in-memory sales table: CSV loading, schema validation, and the
//! top-level console/publisher aggregation.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use polars::prelude::*;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use crate::cli;
use crate::config::AppConfig;

/// Fixed drill-down ordering. Path segments produced by the sunburst map
/// onto these columns by position.
pub const HIERARCHY: [&str; 4] = ["console", "publisher", "developer", "title"];

/// The numeric column aggregated within each hierarchy node.
pub const MEASURE: &str = "total_sales";

/// Per-region sales columns split beneath each title in the regional ring.
pub const REGIONAL_COLUMNS: [&str; 4] = ["na_sales", "jp_sales", "pal_sales", "other_sales"];

/// Placeholder for records with no developer on file.
pub const UNKNOWN_DEVELOPER: &str = "Unknown";

#[derive(Default, Clone)]
pub struct OpenOptions {
    pub delimiter: Option<u8>,
    pub has_header: Option<bool>,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_has_header(mut self, has_header: bool) -> Self {
        self.has_header = Some(has_header);
        self
    }

    /// Create OpenOptions from CLI args and config, with CLI args taking precedence
    pub fn from_args_and_config(args: &cli::Args, config: &AppConfig) -> Self {
        let mut opts = OpenOptions::new();
        opts.delimiter = args.delimiter.or(config.file_loading.delimiter);
        opts.has_header = if args.no_header {
            Some(false)
        } else {
            config.file_loading.has_header
        };
        opts
    }
}

/// The sales dataset, loaded once at startup and read-only afterwards.
/// Constructed by the serving process and passed by reference into the
/// resolver and chart builders.
pub struct SalesTable {
    df: DataFrame,
}

impl SalesTable {
    /// Validate and preprocess an already-materialized frame: drop the
    /// scraper's `img` column when present and substitute "Unknown" for
    /// missing developers.
    pub fn from_dataframe(df: DataFrame) -> Result<Self> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        for required in HIERARCHY.iter().chain(std::iter::once(&MEASURE)) {
            if !names.iter().any(|n| n == required) {
                return Err(eyre!("input data is missing the '{}' column", required));
            }
        }

        let df = if names.iter().any(|n| n == "img") {
            df.drop("img")?
        } else {
            df
        };
        let df = df
            .lazy()
            .with_column(col("developer").fill_null(lit(UNKNOWN_DEVELOPER)))
            .collect()?;
        Ok(Self { df })
    }

    /// Load the table from a CSV file. Gzipped input (`.gz`) is
    /// decompressed into memory and read eagerly; plain CSV goes through
    /// a lazy scan.
    pub fn from_csv(path: &Path, options: &OpenOptions) -> Result<Self> {
        let is_gzipped = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("gz"))
            .unwrap_or(false);

        let df = if is_gzipped {
            let file = File::open(path)?;
            let mut decoder = flate2::read::GzDecoder::new(BufReader::new(file));
            let mut decompressed = Vec::new();
            decoder.read_to_end(&mut decompressed)?;

            let mut read_options = CsvReadOptions::default();
            if let Some(has_header) = options.has_header {
                read_options.has_header = has_header;
            }
            let delimiter = options.delimiter;
            read_options = read_options.map_parse_options(|parse_options| {
                if let Some(delimiter) = delimiter {
                    parse_options.with_separator(delimiter)
                } else {
                    parse_options
                }
            });
            CsvReader::new(std::io::Cursor::new(decompressed))
                .with_options(read_options)
                .finish()?
        } else {
            let pl_path = PlPath::Local(Arc::from(path));
            let mut reader = LazyCsvReader::new(pl_path);
            if let Some(delimiter) = options.delimiter {
                reader = reader.with_separator(delimiter);
            }
            if let Some(has_header) = options.has_header {
                reader = reader.with_has_header(has_header);
            }
            reader.finish()?.collect()?
        };

        Self::from_dataframe(df)
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Top-level aggregation: total sales grouped by console and publisher,
    /// sorted by the hierarchy columns for stable output.
    pub fn overview(&self) -> Result<DataFrame> {
        let options = SortMultipleOptions {
            descending: vec![false, false],
            ..Default::default()
        };
        let df = self
            .df
            .clone()
            .lazy()
            .group_by([col("console"), col("publisher")])
            .agg([col(MEASURE).sum()])
            .sort_by_exprs(vec![col("console"), col("publisher")], options)
            .collect()?;
        Ok(df)
    }
}
