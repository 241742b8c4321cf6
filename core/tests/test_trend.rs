mod common;

use common::weight_columns;
use trainlog_core::trend::{full_history, single_month};
use trainlog_core::{LinearFit, Period};

#[test]
fn single_month_uses_day_numbers_for_present_values() {
    let grid = weight_columns(&[(10, vec!["80", "", "79,5", "", "79"])]);
    let t = single_month(&grid, 10);

    assert_eq!(t.period, Period::Last);
    assert_eq!(t.points, vec![(1.0, 80.0), (3.0, 79.5), (5.0, 79.0)]);
    let fit = t.fit.expect("tre punkter gir trend");
    assert!((fit.slope + 0.25).abs() < 1e-9);
    assert_eq!(t.fitted().len(), 3);
}

#[test]
fn single_point_has_no_trend_line() {
    let grid = weight_columns(&[(10, vec!["", "80"])]);
    let t = single_month(&grid, 10);
    assert_eq!(t.points, vec![(2.0, 80.0)]);
    assert!(t.fit.is_none());
    assert!(t.fitted().is_empty());
}

#[test]
fn month_column_out_of_range_is_empty() {
    let mut grid = weight_columns(&[(1, vec!["80", "81"])]);
    grid.lines.truncate(8);
    let t = single_month(&grid, 11);
    assert!(t.is_empty());
    assert!(t.fit.is_none());
}

#[test]
fn ten_values_make_two_weeks_and_counter_continues() {
    let jan: Vec<&str> = std::iter::once("янв")
        .chain(["80", "81", "82", "83", "84", "85", "86", "87", "88", "89"])
        .collect();
    let feb: Vec<&str> = std::iter::once("фев").chain(["90"; 7]).collect();
    let grid = weight_columns(&[(1, jan), (2, feb)]);

    let t = full_history(&grid, 1);
    assert_eq!(t.period, Period::All);
    assert_eq!(t.points, vec![(1.0, 83.0), (2.0, 88.0), (3.0, 90.0)]);
    assert!(t.fit.is_some());
}

#[test]
fn week_without_numbers_still_advances_counter() {
    let jan: Vec<&str> = std::iter::once("янв")
        .chain(["x"; 7])
        .chain(["80", "82"])
        .collect();
    let feb = vec!["фев", "70"];
    let grid = weight_columns(&[(1, jan), (2, feb)]);

    let t = full_history(&grid, 1);
    assert_eq!(t.points, vec![(2.0, 81.0), (3.0, 70.0)]);
}

#[test]
fn empty_month_groups_add_no_weeks() {
    let grid = weight_columns(&[(1, vec!["янв", "80"]), (3, vec!["мар", "75"])]);
    let t = full_history(&grid, 1);
    assert_eq!(t.points, vec![(1.0, 80.0), (2.0, 75.0)]);
}

#[test]
fn skip_offset_is_configurable() {
    let jan: Vec<&str> = std::iter::once("янв")
        .chain(["80", "81", "82", "83", "84", "85", "86"])
        .collect();
    let grid = weight_columns(&[(1, jan)]);

    let skip1 = full_history(&grid, 1);
    assert_eq!(skip1.points, vec![(1.0, 83.0)]);

    // uten skip teller overskriften som en (tom) dag i første uke
    let skip0 = full_history(&grid, 0);
    assert_eq!(skip0.points, vec![(1.0, 82.5), (2.0, 86.0)]);
}

#[test]
fn linear_fit_matches_least_squares() {
    let pts = [(1.0, 80.0), (2.0, 79.0), (3.0, 79.5), (4.0, 78.0)];
    let f = LinearFit::fit(&pts).unwrap();
    // x̄ = 2.5, ȳ = 79.125, Sxy = -2.75, Sxx = 5
    assert!((f.slope + 0.55).abs() < 1e-9);
    assert!((f.intercept - 80.5).abs() < 1e-9);
}

#[test]
fn period_parsing_rejects_unknown_values() {
    assert_eq!("last".parse::<Period>().unwrap(), Period::Last);
    assert!(" all ".parse::<Period>().is_err());
    assert!("week".parse::<Period>().is_err());
    assert!("".parse::<Period>().is_err());
}
