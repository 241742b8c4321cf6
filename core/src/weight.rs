// core/src/weight.rs
use chrono::{Datelike, NaiveDate};
use log::warn;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::grid::{cell_at, Grid};
use crate::numeric::{mean_present, parse_number, RoundTo};

/// Kolonner per måned i vektfanen.
pub const MONTH_GROUP_WIDTH: usize = 4;
/// Kolonnen med dagsvekt innen en månedsgruppe.
pub const VALUE_OFFSET: usize = 3;
pub const DAYS_IN_SERIES: usize = 31;
pub const ROLLING_WINDOW: usize = 7;

/// Kolonneindeks for vektverdiene i måned `month` (1..=12).
pub fn value_column_index(month: u32) -> usize {
    (month.saturating_sub(1) as usize) * MONTH_GROUP_WIDTH + VALUE_OFFSET
}

/// Alle verdikolonner (3, 7, 11, ...) i rekkefølge.
pub fn value_columns(grid: &Grid) -> impl Iterator<Item = &[String]> {
    grid.lines
        .iter()
        .skip(VALUE_OFFSET)
        .step_by(MONTH_GROUP_WIDTH)
        .map(Vec::as_slice)
}

/// Dagsvekt for én måned. Slot 0..30 = dag 1..31; `None` = ikke registrert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWeightSeries {
    pub days: [Option<f64>; DAYS_IN_SERIES],
}

impl Default for DailyWeightSeries {
    fn default() -> Self {
        Self { days: [None; DAYS_IN_SERIES] }
    }
}

impl DailyWeightSeries {
    /// De 31 første cellene i en verdikolonne.
    pub fn from_column(col: &[String]) -> Self {
        let mut days = [None; DAYS_IN_SERIES];
        for (i, slot) in days.iter_mut().enumerate() {
            *slot = parse_number(cell_at(col, i));
        }
        Self { days }
    }

    pub fn from_values(values: &[Option<f64>]) -> Self {
        let mut days = [None; DAYS_IN_SERIES];
        for (slot, v) in days.iter_mut().zip(values) {
            *slot = *v;
        }
        Self { days }
    }

    /// Serien for måneden `month` fra et kolonnevis rutenett.
    /// Mangler kolonnen blir serien tom (alle `None`).
    pub fn for_month(grid: &Grid, month: u32) -> Self {
        let idx = value_column_index(month);
        if idx >= grid.len() {
            warn!(
                "mangler vektkolonne for måned {}: trenger indeks {}, har {} kolonner",
                month,
                idx,
                grid.len()
            );
        }
        Self::from_column(grid.line(idx))
    }

    pub fn present(&self) -> impl Iterator<Item = f64> + '_ {
        self.days.iter().flatten().copied()
    }

    /// (dag, vekt) for dager med verdi; dag er 1-basert.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.days
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|w| ((i + 1) as f64, w)))
            .collect()
    }
}

/// Statistikk for inneværende måned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub today_filled: bool,
    pub avg_last_7: Option<f64>,
    pub weights: DailyWeightSeries,
    pub rolling7: Vec<Option<f64>>,
    pub filled_days: usize,
    pub missing_days: usize,
}

/// Rullende 7-dagers snitt per slot, over verdiene som finnes i `[i-6, i]`.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            mean_present(&values[start..=i]).map(|m| m.round_to(2))
        })
        .collect()
}

/// Beregner `WeightStats` for serien gitt dagens dato.
/// Ren funksjon: samme serie + samme dato gir samme svar.
pub fn compute_stats(series: &DailyWeightSeries, today: NaiveDate) -> WeightStats {
    let days = &series.days;
    let day = today.day() as usize;

    let min = series.present().map(OrderedFloat).min().map(|v| v.0);
    let max = series.present().map(OrderedFloat).max().map(|v| v.0);

    let today_filled = (1..=days.len()).contains(&day) && days[day - 1].is_some();

    let upto = day.min(days.len());
    let last7 = &days[day.saturating_sub(ROLLING_WINDOW).min(upto)..upto];
    let avg_last_7 = mean_present(last7).map(|m| m.round_to(2));

    let rolling7 = rolling_mean(days, ROLLING_WINDOW);

    let filled_days = days[..upto].iter().filter(|v| v.is_some()).count();
    let missing_days = day.saturating_sub(filled_days);

    WeightStats {
        min,
        max,
        today_filled,
        avg_last_7,
        weights: series.clone(),
        rolling7,
        filled_days,
        missing_days,
    }
}

/// Hele kjeden: kolonnevis rutenett + dato → statistikk for dato-måneden.
pub fn current_month_stats(grid: &Grid, today: NaiveDate) -> WeightStats {
    let series = DailyWeightSeries::for_month(grid, today.month());
    compute_stats(&series, today)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_column_per_month() {
        assert_eq!(value_column_index(1), 3);
        assert_eq!(value_column_index(10), 39);
        assert_eq!(value_column_index(12), 47);
    }

    #[test]
    fn rolling_window_clamps_at_start() {
        let xs = [Some(10.0), None, Some(12.0)];
        assert_eq!(rolling_mean(&xs, 7), vec![Some(10.0), Some(10.0), Some(11.0)]);
        assert_eq!(rolling_mean(&[None, None], 7), vec![None, None]);
    }
}
