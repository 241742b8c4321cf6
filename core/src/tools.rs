// core/src/tools.rs
use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};
use log::info;
use serde::Serialize;
use serde_json::{json, Value};

use crate::chart::{labels_for, ChartRenderer};
use crate::config::SheetConfig;
use crate::error::{Error, Result};
use crate::grid::{Grid, GridRange, GridSource, MajorDimension};
use crate::metrics::Metrics;
use crate::render::{format_weight_summary, format_workout};
use crate::trend::{full_history, single_month, Period, TrendSeries};
use crate::weight::{current_month_stats, WeightStats};
use crate::workout::{extract_latest_workout, WorkoutSession};

pub const TOOL_LATEST_WORKOUT: &str = "show_latest_workout";
pub const TOOL_WEIGHT_SUMMARY: &str = "weight_summary";
pub const TOOL_WEIGHT_PLOT: &str = "weight_plot";

/// Beskrivelse av et verktøy for agent-laget.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

/// Resultatet av `weight_plot`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotOutcome {
    Saved(PathBuf),
    /// Bygget uten graf-støtte.
    NoRenderer,
    /// For få punkter / mangler kolonne.
    NoData,
}

impl PlotOutcome {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            PlotOutcome::Saved(p) => Some(p),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            PlotOutcome::Saved(p) => format!("График сохранён: {}", p.display()),
            PlotOutcome::NoRenderer => "Построение графиков недоступно.".to_string(),
            PlotOutcome::NoData => "Нет данных для построения графика.".to_string(),
        }
    }
}

/// De tre verktøyene agenten kan kalle.
///
/// Hvert kall henter et nytt øyeblikksbilde fra kilden; ingenting caches mellom kall.
pub struct Tools<S: GridSource> {
    source: S,
    cfg: SheetConfig,
    renderer: Option<Box<dyn ChartRenderer>>,
    metrics: Metrics,
    clock: Box<dyn Fn() -> NaiveDate>,
}

impl<S: GridSource> Tools<S> {
    /// `renderer` er graf-kapabiliteten, avgjort ved oppstart (se `chart::default_renderer`).
    pub fn new(
        source: S,
        cfg: SheetConfig,
        renderer: Option<Box<dyn ChartRenderer>>,
        metrics: Metrics,
    ) -> Self {
        Self {
            source,
            cfg,
            renderer,
            metrics,
            clock: Box::new(|| Local::now().date_naive()),
        }
    }

    /// Fast "i dag" for tester og gjenkjøring.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> NaiveDate + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn config(&self) -> &SheetConfig {
        &self.cfg
    }

    fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    fn fetch_weight_columns(&self) -> Result<Grid> {
        let tab = &self.cfg.weight_tab;
        let grid = self.source.fetch(
            tab,
            &GridRange::Bounded { max_rows: self.cfg.max_rows },
            MajorDimension::Columns,
        )?;
        self.metrics.sheet_read(tab);
        Ok(grid)
    }

    pub fn latest_workout(&self) -> Result<WorkoutSession> {
        let tab = &self.cfg.workout_tab;
        let grid = self.source.fetch(tab, &GridRange::Whole, MajorDimension::Rows)?;
        self.metrics.sheet_read(tab);

        let session = extract_latest_workout(&grid);
        self.metrics.rows_skipped(session.skipped_rows);
        info!(
            "siste økt: {} øvelser, {} rader hoppet over",
            session.exercises.len(),
            session.skipped_rows
        );
        Ok(session)
    }

    pub fn weight_stats(&self) -> Result<WeightStats> {
        let grid = self.fetch_weight_columns()?;
        Ok(current_month_stats(&grid, self.today()))
    }

    pub fn weight_trend(&self, period: Period) -> Result<TrendSeries> {
        let grid = self.fetch_weight_columns()?;
        let series = match period {
            Period::Last => single_month(&grid, self.today().month()),
            Period::All => full_history(&grid, self.cfg.history_skip_rows),
        };
        Ok(series)
    }

    pub fn show_latest_workout(&self) -> Result<String> {
        Ok(format_workout(&self.latest_workout()?))
    }

    pub fn weight_summary(&self) -> Result<String> {
        Ok(format_weight_summary(&self.weight_stats()?))
    }

    /// Lager graf for `period` ("last" | "all"). Annen verdi er en feil.
    pub fn weight_plot(&self, period: &str) -> Result<PlotOutcome> {
        let period: Period = period.parse()?;
        let renderer = match &self.renderer {
            Some(r) => r,
            None => {
                info!("graf-støtte mangler i denne builden");
                return Ok(PlotOutcome::NoRenderer);
            }
        };

        let series = self.weight_trend(period)?;
        if series.is_empty() {
            return Ok(PlotOutcome::NoData);
        }

        let out = self.cfg.plot_dir.join(format!("weight_{}.png", period));
        renderer.render(&series, &labels_for(period, self.today()), &out)?;
        Ok(PlotOutcome::Saved(out))
    }

    /// Kall et verktøy ved navn med JSON-argumenter.
    pub fn invoke(&self, name: &str, args: &Value) -> Result<String> {
        match name {
            TOOL_LATEST_WORKOUT => self.show_latest_workout(),
            TOOL_WEIGHT_SUMMARY => self.weight_summary(),
            TOOL_WEIGHT_PLOT => {
                let period = match args.get("period") {
                    None | Some(Value::Null) => Period::Last.as_str(),
                    Some(Value::String(s)) => s.as_str(),
                    Some(other) => {
                        return Err(Error::InvalidArgument(format!(
                            "period må være en streng, fikk {}",
                            other
                        )))
                    }
                };
                Ok(self.weight_plot(period)?.message())
            }
            other => Err(Error::InvalidArgument(format!("ukjent verktøy `{}`", other))),
        }
    }
}

/// Verktøyene slik agent-laget ser dem.
pub fn tool_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: TOOL_LATEST_WORKOUT,
            description: "Показать ближайшую тренировку из вкладки 'тренировки'.",
            parameters: json!({"type": "object", "properties": {}}),
        },
        ToolSpec {
            name: TOOL_WEIGHT_SUMMARY,
            description: "Краткий отчёт по вкладке 'вес' за текущий месяц: мин/макс, среднее за 7 дней, заполнен ли сегодня.",
            parameters: json!({"type": "object", "properties": {}}),
        },
        ToolSpec {
            name: TOOL_WEIGHT_PLOT,
            description: "Построить график веса. period: 'last' – текущий месяц по дням, 'all' – весь период по неделям. Возвращает путь к PNG.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "period": {"type": "string", "enum": ["last", "all"], "default": "last"}
                }
            }),
        },
    ]
}
