// core/src/grid.rs
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Retning på dataene som hentes: rader eller kolonner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MajorDimension {
    Rows,
    Columns,
}

impl MajorDimension {
    pub fn as_api_str(self) -> &'static str {
        match self {
            MajorDimension::Rows => "ROWS",
            MajorDimension::Columns => "COLUMNS",
        }
    }
}

/// Ett øyeblikksbilde av et område i regnearket.
///
/// `lines` er rader (ROWS) eller kolonner (COLUMNS). Linjene kan ha ulik lengde;
/// alt utenfor leses som tom celle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    pub lines: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(lines: Vec<Vec<String>>) -> Self {
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Linje `i`, eller tom slice hvis den ikke finnes.
    pub fn line(&self, i: usize) -> &[String] {
        self.lines.get(i).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Celle (linje, posisjon). Utenfor → "".
    pub fn cell(&self, line: usize, idx: usize) -> &str {
        cell_at(self.line(line), idx)
    }
}

/// Grensesjekket celleoppslag i én linje.
#[inline]
pub fn cell_at(line: &[String], idx: usize) -> &str {
    line.get(idx).map(String::as_str).unwrap_or("")
}

/// Område som skal leses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridRange {
    /// Hele fanen.
    Whole,
    /// `A1` til (max_rows, fanens deklarerte kolonneantall).
    Bounded { max_rows: usize },
}

/// Kolonnenummer (1-basert) → bokstaver: 1 → "A", 27 → "AA", 702 → "ZZ".
pub fn column_letters(mut col: usize) -> String {
    let mut out = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        out.push(b'A' + rem as u8);
        col = (col - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// A1-adresse for (rad, kolonne), begge 1-baserte.
pub fn rowcol_to_a1(row: usize, col: usize) -> String {
    format!("{}{}", column_letters(col.max(1)), row.max(1))
}

/// A1-område med fanenavn i apostrofer: `'вес'!A1:ZZ40`.
pub fn a1_range(tab: &str, max_rows: usize, col_count: usize) -> String {
    format!("'{}'!A1:{}", tab.replace('\'', "''"), rowcol_to_a1(max_rows, col_count))
}

/// Leverandør av rutenett (prod: `SheetsApiClient`, test: `StaticGridSource`).
pub trait GridSource {
    fn fetch(&self, tab: &str, range: &GridRange, major: MajorDimension) -> Result<Grid>;
}

impl<T: GridSource + ?Sized> GridSource for &T {
    fn fetch(&self, tab: &str, range: &GridRange, major: MajorDimension) -> Result<Grid> {
        (**self).fetch(tab, range, major)
    }
}

impl<T: GridSource + ?Sized> GridSource for Box<T> {
    fn fetch(&self, tab: &str, range: &GridRange, major: MajorDimension) -> Result<Grid> {
        (**self).fetch(tab, range, major)
    }
}

/// Fast rutenett i minnet, lagret radvis. Brukes i tester og offline-kjøring.
#[derive(Debug, Clone, Default)]
pub struct StaticGridSource {
    tabs: Vec<(String, Vec<Vec<String>>)>,
}

impl StaticGridSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tab(mut self, tab: &str, rows: Vec<Vec<String>>) -> Self {
        self.tabs.push((tab.to_string(), rows));
        self
    }

    fn rows(&self, tab: &str) -> Result<&[Vec<String>]> {
        self.tabs
            .iter()
            .find(|(name, _)| name == tab)
            .map(|(_, rows)| rows.as_slice())
            .ok_or_else(|| crate::error::Error::TabNotFound(tab.to_string()))
    }
}

impl GridSource for StaticGridSource {
    fn fetch(&self, tab: &str, range: &GridRange, major: MajorDimension) -> Result<Grid> {
        let rows = self.rows(tab)?;
        let rows = match range {
            GridRange::Whole => rows,
            GridRange::Bounded { max_rows } => &rows[..rows.len().min(*max_rows)],
        };
        let lines = match major {
            MajorDimension::Rows => rows.to_vec(),
            MajorDimension::Columns => transpose(rows),
        };
        Ok(Grid::new(lines))
    }
}

/// Rader → kolonner. Tomme haler kuttes slik regnearket gjør det.
pub fn transpose(rows: &[Vec<String>]) -> Vec<Vec<String>> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..width)
        .map(|c| {
            let col: Vec<String> = rows.iter().map(|r| cell_at(r, c).to_string()).collect();
            trim_trailing_blank(col)
        })
        .collect()
}

/// Fyller korte linjer med tomme celler til samme bredde.
/// Values-API-et kutter tomme haler; rader skal se ut som i arket.
pub fn pad_to_width(lines: &mut [Vec<String>]) {
    let width = lines.iter().map(Vec::len).max().unwrap_or(0);
    for line in lines.iter_mut() {
        line.resize(width, String::new());
    }
}

fn trim_trailing_blank(mut line: Vec<String>) -> Vec<String> {
    while line.last().map_or(false, |c| c.is_empty()) {
        line.pop();
    }
    line
}
