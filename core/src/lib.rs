//! Kjernen for treningsloggen: finner siste økt og regner vektstatistikk
//! ut fra et løst formatert regneark.
//!
//! Flyt: `GridSource` → {`workout` | `weight`} → {`render` | `trend`}.

pub mod chart;
pub mod config;
pub mod error;
pub mod grid;
pub mod metrics;
pub mod numeric;
pub mod render;
pub mod sheets_api;
pub mod tools;
pub mod trend;
pub mod weight;
pub mod workout;

pub use chart::{default_renderer, plotting_available, ChartLabels, ChartRenderer};
pub use config::SheetConfig;
pub use error::{Error, Result};
pub use grid::{Grid, GridRange, GridSource, MajorDimension, StaticGridSource};
pub use metrics::Metrics;
pub use numeric::{parse_number, RoundTo};
pub use sheets_api::SheetsApiClient;
pub use tools::{tool_specs, PlotOutcome, ToolSpec, Tools};
pub use trend::{LinearFit, Period, TrendSeries};
pub use weight::{compute_stats, DailyWeightSeries, WeightStats};
pub use workout::{extract_latest_workout, ExerciseRecord, WorkoutSession};
