use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

pub fn sales_df() -> DataFrame {
    df!(
        "console" => &["Console A", "Console A", "Console A", "Console B"],
        "publisher" => &["Publisher X", "Publisher X", "Publisher Y", "Publisher X"],
        "developer" => &[Some("Dev1"), Some("Dev2"), None, Some("Dev1")],
        "title" => &["Game1", "Game2", "Game3", "Game4"],
        "genre" => &["Action", "Action", "Sports", "Racing"],
        "critic_score" => &[Some(8.5_f64), None, Some(6.0), Some(7.5)],
        "total_sales" => &[Some(1.5_f64), Some(0.8), None, Some(2.1)],
        "na_sales" => &[Some(0.7_f64), Some(0.3), None, Some(1.0)],
        "jp_sales" => &[Some(0.2_f64), Some(0.1), None, Some(0.3)],
        "pal_sales" => &[Some(0.4_f64), Some(0.3), None, Some(0.6)],
        "other_sales" => &[Some(0.2_f64), Some(0.1), None, Some(0.2)]
    )
    .unwrap()
}

#[allow(dead_code)]
pub fn write_sample_csv(dir: &Path) -> PathBuf {
    let path = dir.join("sales.csv");
    let mut df = sales_df();
    let mut file = File::create(&path).unwrap();
    CsvWriter::new(&mut file).finish(&mut df).unwrap();
    path
}
