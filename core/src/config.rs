use crate::{
    catalog::SeriesSpec,
    error::{DashError, DashResult},
    rate_table::RateTable,
    types::YearMonth,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path};

pub const DEFAULT_START: YearMonth = YearMonth::new(2000, 1);
pub const DEFAULT_END: YearMonth = YearMonth::new(2026, 1);
/// ±0.1% per period.
pub const DEFAULT_NOISE_BAND: f64 = 0.001;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_start")]
    pub start:      YearMonth,
    #[serde(default = "default_end")]
    pub end:        YearMonth,
    #[serde(default = "default_noise_band")]
    pub noise_band: f64,
    /// Fixed master seed. None seeds from entropy.
    #[serde(default)]
    pub seed:       Option<u64>,
}

fn default_start() -> YearMonth { DEFAULT_START }
fn default_end() -> YearMonth { DEFAULT_END }
fn default_noise_band() -> f64 { DEFAULT_NOISE_BAND }

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start:      DEFAULT_START,
            end:        DEFAULT_END,
            noise_band: DEFAULT_NOISE_BAND,
            seed:       None,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> DashResult<()> {
        if !self.start.is_valid() || !self.end.is_valid() {
            return Err(DashError::InvalidConfig(format!(
                "window months must be 1..=12 (start {}, end {})",
                self.start, self.end
            )));
        }
        if self.start > self.end {
            return Err(DashError::InvalidConfig(format!(
                "window start {} is after end {}",
                self.start, self.end
            )));
        }
        if !self.noise_band.is_finite() || !(0.0..0.5).contains(&self.noise_band) {
            return Err(DashError::InvalidConfig(format!(
                "noise_band {} must be in [0, 0.5)",
                self.noise_band
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RateTablesFile {
    tables: HashMap<String, RateTable>,
}

#[derive(Debug, Clone, Default)]
pub struct DashConfig {
    pub generator:      GeneratorConfig,
    /// Keyed by `"<series>.<dimension>"`.
    pub rate_overrides: HashMap<String, RateTable>,
}

impl DashConfig {
    /// Load from the data/ directory.
    /// `generator.json` is required; `rate_tables.json` is optional.
    /// In tests, use DashConfig::default_test().
    pub fn load(data_dir: &str) -> DashResult<Self> {
        let path = format!("{data_dir}/generator.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| DashError::InvalidConfig(format!("Cannot read {path}: {e}")))?;
        let generator: GeneratorConfig = serde_json::from_str(&content)?;
        generator.validate()?;

        let tables_path = format!("{data_dir}/rate_tables.json");
        let rate_overrides = if Path::new(&tables_path).exists() {
            let tables_content = std::fs::read_to_string(&tables_path)?;
            let file: RateTablesFile = serde_json::from_str(&tables_content)?;
            file.tables
                .into_iter()
                .map(|(key, table)| {
                    if !SeriesSpec::is_known_dimension(&key) {
                        return Err(DashError::InvalidRateTable {
                            dimension: key,
                            reason: "unknown series dimension".into(),
                        });
                    }
                    let table = table.validated(&key)?;
                    Ok((key, table))
                })
                .collect::<DashResult<HashMap<_, _>>>()?
        } else {
            HashMap::new()
        };

        log::info!(
            "config loaded from {data_dir}: window {}..={}, {} rate override(s)",
            generator.start,
            generator.end,
            rate_overrides.len()
        );

        Ok(Self { generator, rate_overrides })
    }

    /// Config with a pinned seed and built-in tables for use in tests.
    pub fn default_test() -> Self {
        Self {
            generator: GeneratorConfig {
                seed: Some(0x5EED_2026),
                ..GeneratorConfig::default()
            },
            rate_overrides: HashMap::new(),
        }
    }
}
