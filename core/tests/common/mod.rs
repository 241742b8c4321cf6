#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use trainlog_core::{ChartLabels, ChartRenderer, Grid, Result, TrendSeries};

/// CSV-tekst → rader. Tom rad skrives som "," (csv hopper over helt tomme linjer).
pub fn rows_from_csv(text: &str) -> Vec<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    rdr.records()
        .map(|r| r.expect("gyldig csv").iter().map(str::to_string).collect())
        .collect()
}

pub fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

/// Setter `value` i kolonne `idx`, fyller med tomme celler ved behov.
pub fn set_cell(row: &mut Vec<String>, idx: usize, value: &str) {
    if row.len() <= idx {
        row.resize(idx + 1, String::new());
    }
    row[idx] = value.to_string();
}

/// Kolonnevis vektark: én verdikolonne per (måned, celler). 12 grupper à 4 kolonner.
pub fn weight_columns(months: &[(u32, Vec<&str>)]) -> Grid {
    let mut cols = vec![Vec::new(); 48];
    for (month, cells) in months {
        let idx = (*month as usize - 1) * 4 + 3;
        cols[idx] = row(cells);
        cols[idx - 3] = row(&["дата"]);
    }
    Grid::new(cols)
}

/// Samme ark radvis (slik `StaticGridSource` lagrer det).
pub fn weight_rows(month: u32, cells: &[&str]) -> Vec<Vec<String>> {
    let idx = (month as usize - 1) * 4 + 3;
    cells
        .iter()
        .map(|c| {
            let mut r = Vec::new();
            set_cell(&mut r, idx, c);
            r
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Rendered {
    pub title: String,
    pub points: Vec<(f64, f64)>,
    pub has_fit: bool,
    pub out: PathBuf,
}

/// Renderer som bare husker hva den fikk.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub calls: Rc<RefCell<Vec<Rendered>>>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&self, series: &TrendSeries, labels: &ChartLabels, out: &Path) -> Result<()> {
        self.calls.borrow_mut().push(Rendered {
            title: labels.title.clone(),
            points: series.points.clone(),
            has_fit: series.fit.is_some(),
            out: out.to_path_buf(),
        });
        Ok(())
    }
}
