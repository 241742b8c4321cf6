// core/src/chart.rs
use std::path::Path;

use chrono::{Datelike, NaiveDate};

use crate::error::Result;
use crate::trend::{Period, TrendSeries};

/// Tekstene rundt selve grafen.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLabels {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

pub fn labels_for(period: Period, today: NaiveDate) -> ChartLabels {
    match period {
        Period::Last => ChartLabels {
            title: format!("Вес по дням — {}-{:02}", today.year(), today.month()),
            x_label: "День месяца",
            y_label: "Вес, кг",
        },
        Period::All => ChartLabels {
            title: "Вес (среднее за неделю) — весь период".to_string(),
            x_label: "Номер недели с начала отслеживания",
            y_label: "Вес, кг",
        },
    }
}

/// Tegner en ferdig beregnet serie til fil. Kjernen tegner aldri selv.
pub trait ChartRenderer {
    fn render(&self, series: &TrendSeries, labels: &ChartLabels, out: &Path) -> Result<()>;
}

/// Grafer er tilgjengelig når crate er bygget med `plot`.
pub fn plotting_available() -> bool {
    cfg!(feature = "plot")
}

/// Standard renderer for denne builden, eller `None` uten plot-støtte.
pub fn default_renderer() -> Option<Box<dyn ChartRenderer>> {
    #[cfg(feature = "plot")]
    let renderer: Option<Box<dyn ChartRenderer>> = Some(Box::new(png::PngRenderer::default()));
    #[cfg(not(feature = "plot"))]
    let renderer: Option<Box<dyn ChartRenderer>> = None;
    renderer
}

#[cfg(feature = "plot")]
pub mod png {
    use std::path::Path;

    use log::info;
    use plotters::prelude::*;

    use super::{ChartLabels, ChartRenderer};
    use crate::error::{Error, Result};
    use crate::numeric::fmt_number;
    use crate::trend::TrendSeries;

    const SKY: RGBColor = RGBColor(135, 206, 235);

    fn render_err<E: std::fmt::Display>(e: E) -> Error {
        Error::Render(e.to_string())
    }

    fn padded(lo: f64, hi: f64, pad: f64) -> std::ops::Range<f64> {
        (lo - pad)..(hi + pad)
    }

    /// PNG via plotters' bitmap-backend.
    #[derive(Debug, Clone)]
    pub struct PngRenderer {
        pub size: (u32, u32),
    }

    impl Default for PngRenderer {
        fn default() -> Self {
            Self { size: (1000, 500) }
        }
    }

    impl ChartRenderer for PngRenderer {
        fn render(&self, series: &TrendSeries, labels: &ChartLabels, out: &Path) -> Result<()> {
            let points = &series.points;
            if points.is_empty() {
                return Err(Error::Render("tom serie".into()));
            }
            let fitted = series.fitted();

            let xs = points.iter().map(|p| p.0);
            let ys = points.iter().map(|p| p.1).chain(fitted.iter().map(|p| p.1));
            let (x_lo, x_hi) = xs.fold((f64::MAX, f64::MIN), |(a, b), x| (a.min(x), b.max(x)));
            let (y_lo, y_hi) = ys.fold((f64::MAX, f64::MIN), |(a, b), y| (a.min(y), b.max(y)));

            let root = BitMapBackend::new(out, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&labels.title, ("sans-serif", 22))
                .margin(15)
                .x_label_area_size(40)
                .y_label_area_size(55)
                .build_cartesian_2d(padded(x_lo, x_hi, 0.5), padded(y_lo, y_hi, 0.5))
                .map_err(render_err)?;

            chart
                .configure_mesh()
                .x_desc(labels.x_label)
                .y_desc(labels.y_label)
                .draw()
                .map_err(render_err)?;

            chart
                .draw_series(LineSeries::new(points.iter().copied(), SKY.stroke_width(2)))
                .map_err(render_err)?
                .label("Вес")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &SKY));

            chart
                .draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), 4, SKY.filled())))
                .map_err(render_err)?;

            // Verdien over hvert punkt
            chart
                .draw_series(points.iter().map(|&(x, y)| {
                    Text::new(fmt_number(y), (x - 0.24, y + 0.03), ("sans-serif", 12))
                }))
                .map_err(render_err)?;

            if !fitted.is_empty() {
                chart
                    .draw_series(LineSeries::new(fitted.into_iter(), RED.mix(0.5).stroke_width(2)))
                    .map_err(render_err)?
                    .label("Тренд")
                    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
            }

            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(render_err)?;

            root.present().map_err(render_err)?;
            info!("graf lagret: {}", out.display());
            Ok(())
        }
    }
}
