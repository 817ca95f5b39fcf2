//! Seeded random number generation for series noise.
//!
//! RULE: The generator never calls a platform RNG while building a series.
//! All noise flows through a NoiseSource. Production draws the master seed
//! from entropy once; tests pin it.
//!
//! Each series gets its own stream, seeded from
//! (master_seed XOR slot XOR cache epoch). This means:
//!   - Adding a new series never changes existing series' noise.
//!   - Clearing the cache re-rolls every series without touching the seed.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// Anything that can feed uniform noise into the generator.
pub trait NoiseSource {
    /// A float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64;

    /// A float uniformly distributed in [-band, +band).
    fn symmetric(&mut self, band: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * band
    }
}

/// A named, deterministic RNG for a single series.
pub struct SeriesRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SeriesRng {
    /// Create a series RNG from the master seed, a stable slot index and
    /// the cache epoch. The slot index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64, epoch: u64) -> Self {
        let derived_seed = master_seed
            ^ slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15)
            ^ epoch.wrapping_mul(0xbf58_476d_1ce4_e5b9);
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl NoiseSource for SeriesRng {
    fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Always returns the midpoint, so `symmetric` yields zero noise.
/// Useful for asserting the pure rate-table trajectory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn next_f64(&mut self) -> f64 {
        0.5
    }
}

/// All series RNGs for one generator, indexed by stable slot.
#[derive(Debug, Clone, Copy)]
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Seed the bank from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_series(&self, slot: SeriesSlot, epoch: u64) -> SeriesRng {
        SeriesRng::new(self.master_seed, slot as u64, epoch).with_name(slot.name())
    }
}

/// Stable slot assignments.
/// NEVER reorder or remove entries, only append.
/// Reordering changes every series' noise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum SeriesSlot {
    HousePrice = 0,
    RentPrice = 1,
    ConsumerPrice = 2,
    InterestRate = 3,
    Gdp = 4,
    MoneySupply = 5,
    TransactionVolume = 6,
    RegionalSnapshot = 7,
    // Add new series here, append only.
}

impl SeriesSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::HousePrice        => "house_price",
            Self::RentPrice         => "rent_price",
            Self::ConsumerPrice     => "consumer_price",
            Self::InterestRate      => "interest_rate",
            Self::Gdp               => "gdp",
            Self::MoneySupply       => "money_supply",
            Self::TransactionVolume => "transaction_volume",
            Self::RegionalSnapshot  => "regional_snapshot",
        }
    }
}
