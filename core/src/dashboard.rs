//! The dashboard host: wires the series generator, the calculators and
//! the snapshot store behind one command entry point.
//!
//! RULES:
//!   - The generator is built once per dashboard and memoizes every series.
//!   - Calculators are recomputed in full on every request.
//!   - Validation issues are logged and returned, never turned into errors.
//!   - Only the snapshot store touches persistence.

use crate::{
    analytics,
    command::DashCommand,
    config::DashConfig,
    error::DashResult,
    generator::SeriesGenerator,
    mortgage::{amortization_schedule, summarize},
    simulation::{self, SimulationInput, SimulationResult, ValidationIssue},
    store::SnapshotStore,
    tax::TaxBreakdown,
};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub issues: Vec<ValidationIssue>,
    pub result: SimulationResult,
}

pub struct Dashboard {
    pub config:    DashConfig,
    pub generator: SeriesGenerator,
    pub store:     SnapshotStore,
}

impl Dashboard {
    pub fn new(config: DashConfig, store: SnapshotStore) -> Self {
        let generator = SeriesGenerator::new(&config);
        Self { config, generator, store }
    }

    /// Dashboard over the test config and a migrated in-memory store.
    pub fn build_test() -> DashResult<Self> {
        let store = SnapshotStore::in_memory()?;
        store.migrate()?;
        Ok(Self::new(DashConfig::default_test(), store))
    }

    /// Validate, log any issues, and simulate regardless.
    pub fn simulate(&self, input: &SimulationInput) -> SimulationReport {
        let issues = simulation::validate(input);
        for issue in &issues {
            log::warn!("simulation input {}: {}", issue.field, issue.message);
        }
        SimulationReport { issues, result: simulation::simulate(input) }
    }

    pub fn execute(&self, command: DashCommand) -> DashResult<Value> {
        log::debug!("command: {}", command.name());
        let response = match command {
            DashCommand::GetSeries { series } => {
                let points = self.generator.series(series);
                serde_json::to_value(&*points)?
            }
            DashCommand::SeriesSummary { series, dimension } => {
                let points = self.generator.series(series);
                let yoy: Vec<Value> = analytics::year_over_year(&points, &dimension)
                    .into_iter()
                    .map(|(period, pct)| json!({ "period": period.to_string(), "yoy_pct": pct }))
                    .collect();
                let latest = analytics::latest(&points, &dimension)
                    .map(|(period, value)| json!({ "period": period.to_string(), "value": value }));
                json!({
                    "series": series.name(),
                    "dimension": dimension,
                    "latest": latest,
                    "year_over_year": yoy,
                })
            }
            DashCommand::ClearCache => {
                self.generator.clear_cache();
                json!({ "epoch": self.generator.epoch() })
            }
            DashCommand::Simulate { input } => serde_json::to_value(self.simulate(&input))?,
            DashCommand::Validate { input } => serde_json::to_value(simulation::validate(&input))?,
            DashCommand::Mortgage { terms } => {
                let schedule = amortization_schedule(&terms);
                json!({ "summary": summarize(&schedule), "schedule": schedule })
            }
            DashCommand::Tax { input } => serde_json::to_value(TaxBreakdown::compute(&input))?,
            DashCommand::SaveSnapshot { name, input } => {
                let report = self.simulate(&input);
                serde_json::to_value(self.store.save(&name, &input, &report.result)?)?
            }
            DashCommand::LoadSnapshot { name } => serde_json::to_value(self.store.load(&name)?)?,
            DashCommand::ListSnapshots => serde_json::to_value(self.store.list()?)?,
            DashCommand::DeleteSnapshot { name } => {
                self.store.delete(&name)?;
                json!({ "deleted": name })
            }
        };
        Ok(response)
    }
}
