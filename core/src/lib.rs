//! Calculation core for a Korean real-estate market dashboard.
//!
//! Two independent components sit at the centre:
//!   - `generator`: memoized synthetic market series over a fixed window.
//!   - `simulation`: the investment ROI engine.
//!
//! The mortgage and tax calculators, series analytics and the snapshot
//! store surround them; `dashboard` wires everything behind one command
//! entry point.

pub mod analytics;
pub mod catalog;
pub mod command;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod generator;
pub mod mortgage;
pub mod rate_table;
pub mod rng;
pub mod simulation;
pub mod snapshot;
pub mod store;
pub mod tax;
pub mod types;
