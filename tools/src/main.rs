//! market-runner: headless driver for the real-estate dashboard core.
//!
//! Usage:
//!   market-runner --seed 12345 --series house_price_index
//!   market-runner --data-dir ./data --db snapshots.db --ipc-mode

use anyhow::{Context, Result};
use realty_core::{
    analytics,
    catalog::SeriesKey,
    command::DashCommand,
    config::DashConfig,
    dashboard::Dashboard,
    simulation::SimulationInput,
    store::SnapshotStore,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = flag_value(&args, "--data-dir").unwrap_or("./data");
    let db = flag_value(&args, "--db").unwrap_or(":memory:");
    let series = flag_value(&args, "--series");

    let mut config = if Path::new(&format!("{data_dir}/generator.json")).exists() {
        DashConfig::load(data_dir)?
    } else {
        log::warn!("no generator.json under {data_dir}; using built-in defaults");
        DashConfig::default()
    };
    if let Some(seed) = parse_seed(flag_value(&args, "--seed"))? {
        config.generator.seed = Some(seed);
    }

    let store = SnapshotStore::open(db)?;
    store.migrate()?;
    let dashboard = Dashboard::new(config, store);

    if ipc_mode {
        return run_ipc_loop(&dashboard);
    }

    println!("Real-estate dashboard: market-runner");
    println!("  seed:      {:#x}", dashboard.generator.master_seed());
    println!(
        "  window:    {} ..= {}",
        dashboard.generator.config().start,
        dashboard.generator.config().end
    );
    println!("  data_dir:  {data_dir}");
    println!("  db:        {db}");
    println!();

    match series {
        Some(name) => {
            let key: SeriesKey = name.parse().map_err(anyhow::Error::msg)?;
            print_series(&dashboard, key);
        }
        None => {
            print_overview(&dashboard);
            print_simulation(&dashboard, &SimulationInput::default());
        }
    }
    Ok(())
}

/// JSON lines in, JSON lines out. `{"cmd":"quit"}` or EOF ends the loop.
/// Bad lines and failed commands answer with an error object.
fn run_ipc_loop(dashboard: &Dashboard) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let raw: serde_json::Value = match serde_json::from_str(&buffer) {
            Ok(v) => v,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };
        if raw["cmd"] == "quit" {
            break;
        }

        let response = serde_json::from_value::<DashCommand>(raw)
            .map_err(anyhow::Error::from)
            .and_then(|cmd| dashboard.execute(cmd).map_err(anyhow::Error::from));

        match response {
            Ok(value) => writeln!(stdout, "{}", serde_json::to_string(&value)?)?,
            Err(e) => {
                log::warn!("command failed: {e}");
                write_error(&mut stdout, &e.to_string())?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{err_json}")?;
    out.flush()?;
    Ok(())
}

fn print_overview(dashboard: &Dashboard) {
    println!("=== SERIES OVERVIEW ===");
    for key in SeriesKey::ALL {
        let points = dashboard.generator.series(key);
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            println!("  {key:<22} (empty window)");
            continue;
        };
        let latest: Vec<String> = last
            .values
            .iter()
            .map(|(dim, v)| format!("{dim}={v:.1}"))
            .collect();
        println!(
            "  {key:<22} {} pts  {} → {}  {}",
            points.len(),
            first.period,
            last.period,
            latest.join(" ")
        );
    }
    println!();
}

fn print_series(dashboard: &Dashboard, key: SeriesKey) {
    let points = dashboard.generator.series(key);
    println!("=== {key} ({} points) ===", points.len());
    for p in points.iter() {
        let row: Vec<String> = p.values.iter().map(|(d, v)| format!("{d}={v:.1}")).collect();
        println!("  {:<8} {}", p.period.to_string(), row.join("  "));
    }

    if let Some(first_dim) = points.first().and_then(|p| p.values.keys().next()) {
        if let Some((period, pct)) = analytics::year_over_year(&points, first_dim).last() {
            println!();
            println!("  {first_dim} YoY at {period}: {pct:+.2}%");
        }
    }
}

fn print_simulation(dashboard: &Dashboard, input: &SimulationInput) {
    let report = dashboard.simulate(input);
    let r = &report.result;

    println!("=== SAMPLE SIMULATION ({} years) ===", input.holding_period);
    for issue in &report.issues {
        println!("  ! {}: {}", issue.field, issue.message);
    }
    println!("  equity:          {:.0}", r.equity_amount);
    println!("  loan:            {:.0}", r.loan_amount);
    println!("  monthly payment: {:.2}", r.monthly_payment);
    println!("  net income/yr:   {:.0}", r.annual_net_income);
    println!("  sale value:      {:.0}", r.sale_value);
    println!("  capital gains:   {:.0} (tax {:.0})", r.capital_gain, r.capital_gains_tax);
    println!("  total profit:    {:.0}", r.total_profit);
    println!("  ROI:             {:.2}%  (CAGR {:.2}%)", r.total_roi, r.annualized_roi);
    println!();
    for y in &r.yearly {
        println!(
            "  Y{:<3} value {:>10.0} | loan {:>10.0} | equity {:>10.0} | cash {:>10.0}",
            y.year, y.property_value, y.remaining_loan, y.equity, y.cumulative_cash_flow
        );
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_seed(raw: Option<&str>) -> Result<Option<u64>> {
    raw.map(|raw| {
        raw.parse::<u64>()
            .with_context(|| format!("--seed expects an unsigned integer, got {raw:?}"))
    })
    .transpose()
}
