#![cfg(feature = "plot")]

use chrono::NaiveDate;
use trainlog_core::chart::labels_for;
use trainlog_core::chart::png::PngRenderer;
use trainlog_core::{ChartRenderer, Error, Period, TrendSeries};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 7).expect("dato")
}

#[test]
fn daily_series_with_trend_is_written_as_png() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("weight_last.png");
    let series = TrendSeries::new(Period::Last, vec![(1.0, 80.0), (3.0, 79.6), (7.0, 79.1)]);
    assert!(series.fit.is_some());

    PngRenderer::default()
        .render(&series, &labels_for(Period::Last, today()), &out)
        .unwrap();
    let meta = std::fs::metadata(&out).unwrap();
    assert!(meta.len() > 0);
}

#[test]
fn single_week_without_trend_still_renders() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("weight_all.png");
    let series = TrendSeries::new(Period::All, vec![(1.0, 82.35)]);
    assert!(series.fit.is_none());

    PngRenderer::default()
        .render(&series, &labels_for(Period::All, today()), &out)
        .unwrap();
    assert!(out.exists());
}

#[test]
fn empty_series_is_a_render_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tom.png");
    let series = TrendSeries::new(Period::Last, Vec::new());
    let err = PngRenderer::default()
        .render(&series, &labels_for(Period::Last, today()), &out)
        .unwrap_err();
    assert!(matches!(err, Error::Render(_)));
    assert!(!out.exists());
}
