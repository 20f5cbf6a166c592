use color_eyre::Result;
use vgdrill::{AppConfig, ClickEvent, Dashboard, SalesTable};

mod common;

fn dashboard() -> Dashboard {
    let table = SalesTable::from_dataframe(common::sales_df()).unwrap();
    Dashboard::new(table, &AppConfig::default(), Some(7)).unwrap()
}

#[test]
fn root_state_has_unfiltered_scatter_and_no_detail() -> Result<()> {
    let dash = dashboard();
    let view = dash.root_view()?;
    assert!(view.is_root());
    // Two fixture rows carry both numeric values before imputation.
    assert_eq!(view.scatter.len(), 2);
    Ok(())
}

#[test]
fn drill_produces_imputed_scatter_and_bars() -> Result<()> {
    let mut dash = dashboard();
    let view = dash.click(&ClickEvent::node("Console A/Publisher X"))?;
    let detail = view.detail.expect("detail view");

    assert_eq!(detail.row_count, 2);
    assert_eq!(detail.levels, vec!["developer", "title"]);

    // Imputation fills the subset copy, so both rows scatter; the filled
    // critic score lands in the configured range.
    assert_eq!(view.scatter.len(), 2);
    for p in &view.scatter {
        assert!(p.critic_score >= 1.0);
        assert!(p.total_sales >= 0.1);
    }

    // One bar per developer in the subset, largest first.
    assert_eq!(detail.bars.len(), 2);
    assert!(detail.bars[0].total_sales >= detail.bars[1].total_sales);
    Ok(())
}

#[test]
fn drill_splits_titles_across_regions() -> Result<()> {
    let mut dash = dashboard();
    let view = dash.click(&ClickEvent::node("Console A/Publisher X"))?;
    let detail = view.detail.expect("detail view");

    // Game1 and Game2 each split into four regional leaves.
    assert_eq!(detail.regional.len(), 8);

    let na = detail
        .regional
        .iter()
        .find(|n| n.id == "Game1/na_sales")
        .expect("na leaf");
    assert_eq!(na.parent, "Game1");
    assert!((na.value - 0.7).abs() < 1e-9);

    // The regional leaves under a title add back up to its total sales.
    let game2: f64 = detail
        .regional
        .iter()
        .filter(|n| n.parent == "Game2")
        .map(|n| n.value)
        .sum();
    assert!((game2 - 0.8).abs() < 1e-9);
    Ok(())
}

#[test]
fn reset_click_returns_to_root() -> Result<()> {
    let mut dash = dashboard();
    let _ = dash.click(&ClickEvent::node("Console A/Publisher X"))?;
    let view = dash.click(&ClickEvent::root())?;
    assert!(view.is_root());
    Ok(())
}

#[test]
fn empty_selection_degrades_to_empty_charts() -> Result<()> {
    let mut dash = dashboard();
    let view = dash.click(&ClickEvent::node("Console Z/Publisher Q"))?;
    let detail = view.detail.expect("detail view");
    assert_eq!(detail.row_count, 0);
    assert!(detail.sunburst.is_empty());
    assert!(detail.regional.is_empty());
    assert!(detail.bars.is_empty());
    assert!(view.scatter.is_empty());
    Ok(())
}

#[test]
fn table_height_is_stable_across_clicks() -> Result<()> {
    let mut dash = dashboard();
    let before = dash.table().height();
    let _ = dash.click(&ClickEvent::node("Console A/Publisher X"))?;
    let _ = dash.click(&ClickEvent::node("Console B/Publisher X"))?;
    let _ = dash.click(&ClickEvent::root())?;
    assert_eq!(dash.table().height(), before);
    Ok(())
}
