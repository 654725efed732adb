//! FILENAME: tests/test_report.rs
//! The shell end to end: load, filter, render, serialize.

mod common;

use clap::Parser;
use chart_engine::{DashboardWarning, ViewKind};
use common::{cli_for, sample_csv};
use dashboard_lib::config::Cli;
use dashboard_lib::{build_report, load_dashboard, to_json};

#[test]
fn test_default_request_renders_everything() {
    let file = sample_csv();
    let cli = cli_for(&file, &[]);
    let report = build_report(&load_dashboard(&cli).unwrap(), &cli).unwrap();

    let render = report.render.unwrap();
    assert_eq!(render.charts.len(), ViewKind::ALL.len());
    assert_eq!(render.kpis.total_customers, 4);
    assert_eq!(render.kpi_display.total_revenue, "$300");
    assert!(report.options.is_none());
    assert!(report.kpis.is_none());
}

#[test]
fn test_kpis_and_options_only() {
    let file = sample_csv();
    let cli = cli_for(&file, &["--kpis", "--options", "--gender", "Female"]);
    let report = build_report(&load_dashboard(&cli).unwrap(), &cli).unwrap();

    assert!(report.render.is_none());
    let kpis = report.kpis.unwrap();
    assert_eq!(kpis.transactions, 2);
    assert_eq!(kpis.total_customers, 1);
    assert_eq!(report.kpi_display.unwrap().average_order_value, "$55");

    // Options ignore the current filter
    let options = report.options.unwrap();
    assert_eq!(options.gender, vec!["All", "Male", "Female"]);
}

#[test]
fn test_view_selection_with_empty_filter() {
    let file = sample_csv();
    let cli = cli_for(&file, &["--view", "gender_distribution", "--category", "Outerwear", "--theme", "dark"]);
    let report = build_report(&load_dashboard(&cli).unwrap(), &cli).unwrap();

    let render = report.render.unwrap();
    assert_eq!(render.charts.len(), 1);
    assert_eq!(render.charts[0].title_color, "white");
    assert!(render.charts[0].is_empty());
    assert!(matches!(render.warnings.as_slice(), [DashboardWarning::EmptyResult { .. }]));
}

#[test]
fn test_json_omits_unrequested_parts() {
    let file = sample_csv();
    let cli = cli_for(&file, &["--kpis"]);
    let report = build_report(&load_dashboard(&cli).unwrap(), &cli).unwrap();

    let json: serde_json::Value = serde_json::from_str(&to_json(&report, false).unwrap()).unwrap();
    assert_eq!(json["kpi_display"]["total_customers"], "4");
    assert!(json.get("render").is_none());
    assert!(json.get("options").is_none());
    assert!(to_json(&report, true).unwrap().contains('\n'));
}

#[test]
fn test_missing_dataset_fails_with_context() {
    let cli = Cli::try_parse_from(["dashboard", "--data", "/nonexistent/customers.csv"]).unwrap();
    let err = load_dashboard(&cli).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/customers.csv"));
}

#[test]
fn test_unknown_section_is_an_error() {
    let file = sample_csv();
    let cli = cli_for(&file, &["--section", "marketing"]);
    assert!(build_report(&load_dashboard(&cli).unwrap(), &cli).is_err());
}
