// core/src/trend.rs
use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::grid::{cell_at, Grid};
use crate::numeric::{mean_present, parse_number, RoundTo};
use crate::weight::{value_column_index, value_columns, DailyWeightSeries, DAYS_IN_SERIES};

pub const WEEK_LEN: usize = 7;

/// Hvilken periode grafen dekker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Inneværende måned, ett punkt per dag.
    Last,
    /// Hele historikken, ett punkt per uke.
    All,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Last => "last",
            Period::All => "all",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last" => Ok(Period::Last),
            "all" => Ok(Period::All),
            other => Err(Error::InvalidArgument(format!(
                "period må være 'last' eller 'all', fikk {:?}",
                other
            ))),
        }
    }
}

/// Minste kvadraters rett linje y = slope·x + intercept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// `None` ved færre enn 2 punkter eller når alle x er like.
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (x, y) in points {
            sxx += (x - mean_x).powi(2);
            sxy += (x - mean_x) * (y - mean_y);
        }
        if sxx.abs() < f64::EPSILON {
            return None;
        }
        let slope = sxy / sxx;
        Some(Self { slope, intercept: mean_y - slope * mean_x })
    }

    #[inline]
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Punkter klare for tegning, med valgfri trendlinje.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub period: Period,
    pub points: Vec<(f64, f64)>,
    pub fit: Option<LinearFit>,
}

impl TrendSeries {
    pub fn new(period: Period, points: Vec<(f64, f64)>) -> Self {
        let fit = LinearFit::fit(&points);
        Self { period, points, fit }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Trendlinjen evaluert i hvert x; tom uten fit.
    pub fn fitted(&self) -> Vec<(f64, f64)> {
        match self.fit {
            Some(f) => self.points.iter().map(|&(x, _)| (x, f.at(x))).collect(),
            None => Vec::new(),
        }
    }
}

/// Én måned: x = dag (1-basert), y = vekt, kun dager med verdi.
pub fn single_month(grid: &Grid, month: u32) -> TrendSeries {
    let idx = value_column_index(month);
    if idx >= grid.len() {
        warn!("for lite data: trenger kolonne {}, har {}", idx, grid.len());
        return TrendSeries::new(Period::Last, Vec::new());
    }
    let series = DailyWeightSeries::for_month(grid, month);
    TrendSeries::new(Period::Last, series.points())
}

/// Ukesbøtter for én verdikolonne.
///
/// De `skip_rows` første cellene hoppes over, så tas `DAYS_IN_SERIES` celler.
/// Tomme celler fjernes før oppdeling i biter à 7; en bit uten gyldige tall
/// gir ikke punkt, men teller likevel som en uke.
fn weekly_means(col: &[String], skip_rows: usize) -> Vec<Option<f64>> {
    let cells: Vec<Option<f64>> = (skip_rows..skip_rows + DAYS_IN_SERIES)
        .map(|i| cell_at(col, i))
        .filter(|c| !c.trim().is_empty())
        .map(parse_number)
        .collect();

    cells
        .chunks(WEEK_LEN)
        .map(|week| mean_present(week).map(|m| m.round_to(2)))
        .collect()
}

/// Hele historikken: ett punkt per uke over alle månedsgrupper.
/// Ukenummeret fortsetter over månedsgrensene og nullstilles aldri.
pub fn full_history(grid: &Grid, skip_rows: usize) -> TrendSeries {
    let mut points = Vec::new();
    let mut week_counter = 1usize;

    for (month_idx, col) in value_columns(grid).enumerate() {
        let weeks = weekly_means(col, skip_rows);
        debug!("månedsgruppe {}: {} uker", month_idx + 1, weeks.len());
        for mean in weeks {
            if let Some(m) = mean {
                points.push((week_counter as f64, m));
            }
            week_counter += 1;
        }
    }

    TrendSeries::new(Period::All, points)
}
