use crate::{
    catalog::SeriesKey,
    mortgage::LoanTerms,
    simulation::SimulationInput,
    tax::TaxInput,
};
use serde::{Deserialize, Serialize};

/// Every request the dashboard front end can make.
/// Variants are only ever appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DashCommand {
    // ── Charts ────────────────────────────────────
    GetSeries { series: SeriesKey },
    SeriesSummary { series: SeriesKey, dimension: String },
    ClearCache,

    // ── Calculators ───────────────────────────────
    Simulate { input: SimulationInput },
    Validate { input: SimulationInput },
    Mortgage { terms: LoanTerms },
    Tax { input: TaxInput },

    // ── Saved simulations ─────────────────────────
    SaveSnapshot { name: String, input: SimulationInput },
    LoadSnapshot { name: String },
    ListSnapshots,
    DeleteSnapshot { name: String },
}

impl DashCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetSeries { .. }      => "get_series",
            Self::SeriesSummary { .. }  => "series_summary",
            Self::ClearCache            => "clear_cache",
            Self::Simulate { .. }       => "simulate",
            Self::Validate { .. }       => "validate",
            Self::Mortgage { .. }       => "mortgage",
            Self::Tax { .. }            => "tax",
            Self::SaveSnapshot { .. }   => "save_snapshot",
            Self::LoadSnapshot { .. }   => "load_snapshot",
            Self::ListSnapshots         => "list_snapshots",
            Self::DeleteSnapshot { .. } => "delete_snapshot",
        }
    }
}
