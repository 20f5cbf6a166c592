//! Decode a clicked sunburst node path into row constraints and the next
//! set of hierarchy levels to render.

use color_eyre::Result;
use polars::prelude::*;

use crate::dataset::{SalesTable, HIERARCHY, MEASURE};

/// Outcome of resolving a click path against the sales table.
pub enum DrillView {
    /// No selection: show the top-level console/publisher aggregation with
    /// no detail charts.
    Root,
    /// A drilled-in subset plus the hierarchy levels the detail sunburst
    /// should render beneath it.
    Detail {
        subset: DataFrame,
        levels: Vec<&'static str>,
        measure: &'static str,
    },
}

impl DrillView {
    pub fn is_root(&self) -> bool {
        matches!(self, DrillView::Root)
    }
}

/// Equality constraints decoded from a `/`-joined node path. Segment index
/// selects the hierarchy column; empty segments constrain nothing.
/// Returns `None` when the path has more segments than hierarchy levels.
fn decode_path(path: &str) -> Option<Vec<(&'static str, String)>> {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() > HIERARCHY.len() {
        return None;
    }
    let mut constraints = Vec::new();
    for (i, segment) in segments.iter().enumerate() {
        if !segment.is_empty() {
            constraints.push((HIERARCHY[i], segment.to_string()));
        }
    }
    Some(constraints)
}

/// Which hierarchy levels the detail sunburst renders for a path of the
/// given segment count. One segment resets to the top-level view.
fn next_levels(depth: usize) -> Option<Vec<&'static str>> {
    match depth {
        1 => None,
        2 => Some(vec!["developer", "title"]),
        3 => Some(vec!["title"]),
        _ => Some(HIERARCHY.to_vec()),
    }
}

/// Resolve a clicked node path to a row subset and the next rendering
/// levels. Absent, blank, or undecodable paths degrade to the root view;
/// constraints matching zero rows yield an empty subset, not an error.
/// Repeated calls with the same path against the same table produce
/// row-identical subsets.
pub fn resolve(path: Option<&str>, table: &SalesTable) -> Result<DrillView> {
    let path = match path {
        Some(p) if !p.trim().is_empty() => p,
        _ => return Ok(DrillView::Root),
    };

    let constraints = match decode_path(path) {
        Some(c) => c,
        None => {
            log::warn!("undecodable node path {:?}, falling back to root view", path);
            return Ok(DrillView::Root);
        }
    };

    let depth = path.split('/').count();
    let levels = match next_levels(depth) {
        Some(levels) => levels,
        None => return Ok(DrillView::Root),
    };

    let mut predicate: Option<Expr> = None;
    for (column, value) in &constraints {
        let clause = col(*column).eq(lit(value.as_str()));
        predicate = Some(match predicate {
            Some(current) => current.and(clause),
            None => clause,
        });
    }

    let mut lf = table.dataframe().clone().lazy();
    if let Some(predicate) = predicate {
        lf = lf.filter(predicate);
    }
    let subset = lf.collect()?;

    log::debug!(
        "path {:?} selected {} of {} rows, next levels {:?}",
        path,
        subset.height(),
        table.height(),
        levels
    );

    Ok(DrillView::Detail {
        subset,
        levels,
        measure: MEASURE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SalesTable {
        let df = df!(
            "console" => &["Console A", "Console A", "Console B"],
            "publisher" => &["Publisher X", "Publisher Y", "Publisher X"],
            "developer" => &["Dev1", "Dev2", "Dev1"],
            "title" => &["Game1", "Game2", "Game3"],
            "genre" => &["Action", "Sports", "Action"],
            "critic_score" => &[Some(8.5_f64), None, Some(7.0)],
            "total_sales" => &[Some(1.5_f64), Some(0.4), Some(2.0)]
        )
        .unwrap();
        SalesTable::from_dataframe(df).unwrap()
    }

    #[test]
    fn decode_maps_segments_to_hierarchy_columns() {
        let constraints = decode_path("Console A/Publisher X").unwrap();
        assert_eq!(
            constraints,
            vec![
                ("console", "Console A".to_string()),
                ("publisher", "Publisher X".to_string()),
            ]
        );
    }

    #[test]
    fn decode_skips_empty_segments() {
        let constraints = decode_path("/Publisher X").unwrap();
        assert_eq!(constraints, vec![("publisher", "Publisher X".to_string())]);
    }

    #[test]
    fn decode_rejects_overlong_paths() {
        assert!(decode_path("a/b/c/d/e").is_none());
    }

    #[test]
    fn single_segment_resets_to_root() {
        let view = resolve(Some("Console A"), &table()).unwrap();
        assert!(view.is_root());
    }

    #[test]
    fn absent_and_blank_paths_are_root() {
        assert!(resolve(None, &table()).unwrap().is_root());
        assert!(resolve(Some(""), &table()).unwrap().is_root());
        assert!(resolve(Some("   "), &table()).unwrap().is_root());
    }

    #[test]
    fn two_segments_filter_console_and_publisher() {
        let view = resolve(Some("Console A/Publisher X"), &table()).unwrap();
        match view {
            DrillView::Detail {
                subset,
                levels,
                measure,
            } => {
                assert_eq!(subset.height(), 1);
                let titles = subset.column("title").unwrap();
                assert_eq!(titles.str().unwrap().get(0), Some("Game1"));
                assert_eq!(levels, vec!["developer", "title"]);
                assert_eq!(measure, "total_sales");
            }
            DrillView::Root => panic!("expected a detail view"),
        }
    }

    #[test]
    fn three_segments_drill_to_titles() {
        let view = resolve(Some("Console A/Publisher X/Dev1"), &table()).unwrap();
        match view {
            DrillView::Detail { subset, levels, .. } => {
                assert_eq!(subset.height(), 1);
                assert_eq!(levels, vec!["title"]);
            }
            DrillView::Root => panic!("expected a detail view"),
        }
    }

    #[test]
    fn four_segments_render_full_hierarchy() {
        let view = resolve(Some("Console A/Publisher X/Dev1/Game1"), &table()).unwrap();
        match view {
            DrillView::Detail { subset, levels, .. } => {
                assert_eq!(subset.height(), 1);
                assert_eq!(levels, HIERARCHY.to_vec());
            }
            DrillView::Root => panic!("expected a detail view"),
        }
    }

    #[test]
    fn overlong_path_degrades_to_root() {
        let view = resolve(Some("a/b/c/d/e"), &table()).unwrap();
        assert!(view.is_root());
    }

    #[test]
    fn zero_match_constraint_yields_empty_subset() {
        let view = resolve(Some("Console Z/Publisher X"), &table()).unwrap();
        match view {
            DrillView::Detail { subset, .. } => assert_eq!(subset.height(), 0),
            DrillView::Root => panic!("expected a detail view"),
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        let table = table();
        let first = resolve(Some("Console A/Publisher Y"), &table).unwrap();
        let second = resolve(Some("Console A/Publisher Y"), &table).unwrap();
        match (first, second) {
            (DrillView::Detail { subset: a, .. }, DrillView::Detail { subset: b, .. }) => {
                assert!(a.equals_missing(&b));
            }
            _ => panic!("expected detail views"),
        }
    }
}
