//! Synthetic series generator with a per-key memo cache.
//!
//! Each dimension keeps a running value. Every period after the first
//! multiplies it by (1 + bias + noise), where bias is the dimension's
//! annual table rate spread over the periods of a year and noise is
//! uniform in ±noise_band. Stored values are rounded to one decimal.
//!
//! The cache hands out the same Arc until clear_cache() is called.
//! Clearing bumps the epoch, so the next access draws fresh noise.

use crate::{
    catalog::{SeriesKey, SeriesSpec},
    config::{DashConfig, GeneratorConfig},
    rate_table::RateTable,
    rng::{NoiseSource, RngBank},
    types::Period,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard,
    },
};

/// Values never drop below this, keeping every index positive.
pub const MIN_VALUE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub period: Period,
    pub values: BTreeMap<String, f64>,
}

impl TimeSeriesPoint {
    pub fn value(&self, dimension: &str) -> Option<f64> {
        self.values.get(dimension).copied()
    }
}

pub type Series = Arc<Vec<TimeSeriesPoint>>;

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Build one series from its spec. Pure apart from the noise source.
pub fn build_series(
    spec: &SeriesSpec,
    config: &GeneratorConfig,
    noise: &mut dyn NoiseSource,
) -> Vec<TimeSeriesPoint> {
    let frequency = spec.key.frequency();
    let periods_per_year = f64::from(frequency.periods_per_year());
    let periods = Period::range(frequency, config.start, config.end);

    let mut running: Vec<f64> = spec.dimensions.iter().map(|d| d.base.max(MIN_VALUE)).collect();
    let mut points = Vec::with_capacity(periods.len());

    for (i, period) in periods.into_iter().enumerate() {
        let at = period.first_month();
        let mut values = BTreeMap::new();
        for (dim, value) in spec.dimensions.iter().zip(running.iter_mut()) {
            if i > 0 {
                let bias = dim.table.annual_rate(at) / periods_per_year;
                let jitter = noise.symmetric(config.noise_band * dim.noise_scale);
                *value = (*value * (1.0 + bias + jitter)).max(MIN_VALUE);
            }
            values.insert(dim.name.to_string(), round1(*value).max(MIN_VALUE));
        }
        points.push(TimeSeriesPoint { period, values });
    }

    points
}

pub struct SeriesGenerator {
    config:    GeneratorConfig,
    overrides: HashMap<String, RateTable>,
    bank:      RngBank,
    epoch:     AtomicU64,
    cache:     Mutex<HashMap<SeriesKey, Series>>,
}

impl SeriesGenerator {
    /// Seeds from `config.generator.seed`, or from entropy when unset.
    pub fn new(config: &DashConfig) -> Self {
        let bank = match config.generator.seed {
            Some(seed) => RngBank::new(seed),
            None       => RngBank::from_entropy(),
        };
        log::debug!("series generator seeded with {:#x}", bank.master_seed());
        Self {
            config:    config.generator.clone(),
            overrides: config.rate_overrides.clone(),
            bank,
            epoch:     AtomicU64::new(0),
            cache:     Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn master_seed(&self) -> u64 {
        self.bank.master_seed()
    }

    /// Number of times the cache has been cleared.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    // Cached series are immutable, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<SeriesKey, Series>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Memoized series for `key`. Generated on first access.
    pub fn series(&self, key: SeriesKey) -> Series {
        let mut cache = self.lock();
        if let Some(series) = cache.get(&key) {
            log::debug!("series cache hit: {key}");
            return Arc::clone(series);
        }

        let epoch = self.epoch();
        let spec = SeriesSpec::builtin(key).with_overrides(&self.overrides);
        let mut rng = self.bank.for_series(key.slot(), epoch);
        let series: Series = Arc::new(build_series(&spec, &self.config, &mut rng));

        log::debug!(
            "generated {key}: {} point(s), {} dimension(s), epoch {epoch}",
            series.len(),
            spec.dimensions.len()
        );
        cache.insert(key, Arc::clone(&series));
        series
    }

    pub fn house_price_index(&self) -> Series { self.series(SeriesKey::HousePriceIndex) }
    pub fn rent_price_index(&self) -> Series { self.series(SeriesKey::RentPriceIndex) }
    pub fn consumer_price_index(&self) -> Series { self.series(SeriesKey::ConsumerPriceIndex) }
    pub fn interest_rates(&self) -> Series { self.series(SeriesKey::InterestRate) }
    pub fn gdp(&self) -> Series { self.series(SeriesKey::Gdp) }
    pub fn money_supply(&self) -> Series { self.series(SeriesKey::MoneySupply) }
    pub fn transaction_volume(&self) -> Series { self.series(SeriesKey::TransactionVolume) }
    pub fn regional_snapshot(&self) -> Series { self.series(SeriesKey::RegionalSnapshot) }

    /// Warm every series.
    pub fn generate_all(&self) {
        for key in SeriesKey::ALL {
            self.series(key);
        }
    }

    /// Keys currently memoized, in catalog order.
    pub fn cached_keys(&self) -> Vec<SeriesKey> {
        let cache = self.lock();
        SeriesKey::ALL.into_iter().filter(|k| cache.contains_key(k)).collect()
    }

    /// Drop every memoized series. The next access regenerates with new noise.
    pub fn clear_cache(&self) {
        let mut cache = self.lock();
        let dropped = cache.len();
        cache.clear();
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!("series cache cleared: {dropped} series dropped, epoch now {epoch}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round1_rounds_half_away_from_zero() {
        assert_eq!(round1(100.25), 100.3);
        assert_eq!(round1(99.94), 99.9);
    }
}
