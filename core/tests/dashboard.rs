//! Dashboard command tests: the JSON surface the front end talks to.

use realty_core::{
    catalog::SeriesKey,
    command::DashCommand,
    dashboard::Dashboard,
    error::DashError,
    mortgage::{LoanTerms, RepaymentMethod},
    simulation::SimulationInput,
    tax::TaxInput,
};
use serde_json::json;

fn dashboard() -> Dashboard {
    let _ = env_logger::builder().is_test(true).try_init();
    Dashboard::build_test().expect("test dashboard")
}

#[test]
fn commands_parse_from_tagged_json() {
    let cmd: DashCommand =
        serde_json::from_value(json!({ "cmd": "get_series", "series": "gdp" })).unwrap();
    assert!(matches!(cmd, DashCommand::GetSeries { series: SeriesKey::Gdp }));

    let cmd: DashCommand = serde_json::from_value(json!({ "cmd": "list_snapshots" })).unwrap();
    assert_eq!(cmd.name(), "list_snapshots");
}

#[test]
fn get_series_returns_every_point() {
    let dash = dashboard();
    let value = dash
        .execute(DashCommand::GetSeries { series: SeriesKey::InterestRate })
        .unwrap();

    let points = value.as_array().expect("array of points");
    assert_eq!(points.len(), 313);
    assert_eq!(points[0]["period"]["freq"], "month");
    assert!(points[0]["values"]["base_rate"].as_f64().unwrap() > 0.0);
}

#[test]
fn series_summary_reports_latest_and_yoy() {
    let dash = dashboard();
    let value = dash
        .execute(DashCommand::SeriesSummary {
            series: SeriesKey::HousePriceIndex,
            dimension: "seoul".into(),
        })
        .unwrap();

    assert_eq!(value["latest"]["period"], "2026-01");
    // First year has no prior-year counterpart.
    assert_eq!(value["year_over_year"].as_array().unwrap().len(), 313 - 12);
}

#[test]
fn clear_cache_bumps_epoch() {
    let dash = dashboard();
    dash.execute(DashCommand::GetSeries { series: SeriesKey::Gdp }).unwrap();

    let value = dash.execute(DashCommand::ClearCache).unwrap();
    assert_eq!(value["epoch"], 1);
    assert!(dash.generator.cached_keys().is_empty());
}

#[test]
fn simulate_returns_issues_alongside_result() {
    let dash = dashboard();
    let input = SimulationInput { vacancy_rate: 140.0, ..SimulationInput::default() };

    let value = dash.execute(DashCommand::Simulate { input }).unwrap();

    assert_eq!(value["issues"][0]["field"], "vacancy_rate");
    assert_eq!(value["result"]["yearly"].as_array().unwrap().len(), 11);
}

#[test]
fn mortgage_command_returns_schedule_and_summary() {
    let dash = dashboard();
    let terms = LoanTerms {
        principal: 10_000.0,
        annual_rate: 3.0,
        term_years: 10,
        method: RepaymentMethod::EqualPrincipal,
    };

    let value = dash.execute(DashCommand::Mortgage { terms }).unwrap();
    assert_eq!(value["schedule"].as_array().unwrap().len(), 120);
    assert_eq!(value["summary"]["months"], 120);
}

#[test]
fn oversized_mortgage_command_is_clamped() {
    let dash = dashboard();
    let terms = LoanTerms {
        principal: 10_000.0,
        annual_rate: 3.0,
        term_years: u32::MAX,
        method: RepaymentMethod::Bullet,
    };

    let value = dash.execute(DashCommand::Mortgage { terms }).unwrap();
    assert_eq!(value["summary"]["months"], 600);
}

#[test]
fn tax_command_returns_breakdown() {
    let dash = dashboard();
    let input = TaxInput {
        purchase_price: 50_000.0,
        sale_price: 60_000.0,
        homes_owned: 1,
        holding_years: 0.5,
        property_tax_rate: 0.1,
    };

    let value = dash.execute(DashCommand::Tax { input }).unwrap();
    assert_eq!(value["capital_gains_rate"], 0.5);
}

#[test]
fn snapshot_commands_round_trip() {
    let dash = dashboard();

    dash.execute(DashCommand::SaveSnapshot {
        name: "first-home".into(),
        input: SimulationInput::default(),
    })
    .unwrap();

    let listed = dash.execute(DashCommand::ListSnapshots).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let loaded = dash
        .execute(DashCommand::LoadSnapshot { name: "first-home".into() })
        .unwrap();
    assert_eq!(loaded["name"], "first-home");
    assert_eq!(loaded["input"]["holding_period"], 10);

    dash.execute(DashCommand::DeleteSnapshot { name: "first-home".into() })
        .unwrap();
    let err = dash
        .execute(DashCommand::LoadSnapshot { name: "first-home".into() })
        .unwrap_err();
    assert!(matches!(err, DashError::SnapshotNotFound { .. }));
}
