//! Named snapshots: a simulation input saved together with the result
//! computed from it.

use crate::simulation::{SimulationInput, SimulationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSnapshot {
    pub id:       String,
    pub name:     String,
    pub saved_at: DateTime<Utc>,
    pub input:    SimulationInput,
    pub result:   SimulationResult,
}

/// Listing row without the payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub id:       String,
    pub name:     String,
    pub saved_at: DateTime<Utc>,
}
