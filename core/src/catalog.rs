//! Built-in series definitions: dimensions, base values and growth tables.
//!
//! Rates are annual fractions; the generator spreads them evenly over the
//! periods of each year. Base values put the house-price indices near 100
//! around mid-2021.

use crate::{
    rate_table::RateTable,
    rng::SeriesSlot,
    types::{Frequency, Half},
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKey {
    HousePriceIndex,
    RentPriceIndex,
    ConsumerPriceIndex,
    InterestRate,
    Gdp,
    MoneySupply,
    TransactionVolume,
    RegionalSnapshot,
}

impl SeriesKey {
    pub const ALL: [SeriesKey; 8] = [
        Self::HousePriceIndex,
        Self::RentPriceIndex,
        Self::ConsumerPriceIndex,
        Self::InterestRate,
        Self::Gdp,
        Self::MoneySupply,
        Self::TransactionVolume,
        Self::RegionalSnapshot,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::HousePriceIndex    => "house_price_index",
            Self::RentPriceIndex     => "rent_price_index",
            Self::ConsumerPriceIndex => "consumer_price_index",
            Self::InterestRate       => "interest_rate",
            Self::Gdp                => "gdp",
            Self::MoneySupply        => "money_supply",
            Self::TransactionVolume  => "transaction_volume",
            Self::RegionalSnapshot   => "regional_snapshot",
        }
    }

    pub fn frequency(&self) -> Frequency {
        match self {
            Self::Gdp              => Frequency::Quarterly,
            Self::RegionalSnapshot => Frequency::Yearly,
            _                      => Frequency::Monthly,
        }
    }

    pub fn slot(&self) -> SeriesSlot {
        match self {
            Self::HousePriceIndex    => SeriesSlot::HousePrice,
            Self::RentPriceIndex     => SeriesSlot::RentPrice,
            Self::ConsumerPriceIndex => SeriesSlot::ConsumerPrice,
            Self::InterestRate       => SeriesSlot::InterestRate,
            Self::Gdp                => SeriesSlot::Gdp,
            Self::MoneySupply        => SeriesSlot::MoneySupply,
            Self::TransactionVolume  => SeriesSlot::TransactionVolume,
            Self::RegionalSnapshot   => SeriesSlot::RegionalSnapshot,
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for SeriesKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| format!("Unknown series: {s}"))
    }
}

/// One named index inside a series.
#[derive(Debug, Clone)]
pub struct DimensionSpec {
    pub name:        &'static str,
    pub base:        f64,
    /// Multiplier on the configured noise band. Volumes swing harder
    /// than price indices.
    pub noise_scale: f64,
    pub table:       RateTable,
}

#[derive(Debug, Clone)]
pub struct SeriesSpec {
    pub key:        SeriesKey,
    pub dimensions: Vec<DimensionSpec>,
}

impl SeriesSpec {
    /// Replace tables named in `overrides`. Keys are
    /// `"<series>.<dimension>"`, e.g. `"house_price_index.seoul"`.
    pub fn with_overrides(mut self, overrides: &HashMap<String, RateTable>) -> Self {
        for dim in &mut self.dimensions {
            let key = format!("{}.{}", self.key.name(), dim.name);
            if let Some(table) = overrides.get(&key) {
                log::debug!("rate table override applied: {key}");
                dim.table = table.clone();
            }
        }
        self
    }

    /// Whether `key` (`"<series>.<dimension>"`) names a built-in dimension.
    pub fn is_known_dimension(key: &str) -> bool {
        let Some((series, dimension)) = key.split_once('.') else {
            return false;
        };
        series
            .parse::<SeriesKey>()
            .map(|k| Self::builtin(k).dimensions.iter().any(|d| d.name == dimension))
            .unwrap_or(false)
    }

    pub fn builtin(key: SeriesKey) -> Self {
        let dimensions = match key {
            SeriesKey::HousePriceIndex => vec![
                dim("national", 45.0, 1.0, national_hpi()),
                dim("seoul", 38.0, 1.0, seoul_hpi()),
                dim("gangnam", 31.0, 1.2, gangnam_hpi()),
                dim("gyeonggi", 41.0, 1.0, gyeonggi_hpi()),
                dim("busan", 47.0, 1.0, busan_hpi()),
            ],
            SeriesKey::RentPriceIndex => vec![
                dim("jeonse_national", 48.0, 1.0, jeonse_national()),
                dim("jeonse_seoul", 43.0, 1.0, jeonse_seoul()),
                dim("wolse_national", 96.0, 0.5, wolse_national()),
            ],
            SeriesKey::ConsumerPriceIndex => vec![dim("cpi", 63.2, 0.5, cpi())],
            SeriesKey::InterestRate => vec![
                dim("base_rate", 5.0, 0.5, base_rate()),
                dim("mortgage_rate", 8.6, 0.5, mortgage_rate()),
            ],
            SeriesKey::Gdp => vec![dim("gdp", 162.0, 2.0, gdp())],
            SeriesKey::MoneySupply => vec![dim("m2", 708.0, 1.0, m2())],
            SeriesKey::TransactionVolume => vec![
                dim("national", 82.0, 8.0, national_volume()),
                dim("seoul", 16.0, 10.0, seoul_volume()),
            ],
            SeriesKey::RegionalSnapshot => regional(),
        };
        Self { key, dimensions }
    }
}

fn dim(name: &'static str, base: f64, noise_scale: f64, table: RateTable) -> DimensionSpec {
    DimensionSpec { name, base, noise_scale, table }
}

use crate::rate_table::RateBand as B;

fn national_hpi() -> RateTable {
    RateTable::new(
        vec![
            B::years(2000, 2000, 0.004),
            B::years(2001, 2001, 0.093),
            B::years(2002, 2002, 0.164),
            B::years(2003, 2003, 0.057),
            B::years(2004, 2004, -0.021),
            B::years(2005, 2005, 0.040),
            B::years(2006, 2006, 0.116),
            B::years(2007, 2007, 0.031),
            B::half(2008, Half::H1, 0.052),
            B::half(2008, Half::H2, -0.018),
            B::years(2009, 2010, 0.018),
            B::years(2011, 2011, 0.061),
            B::years(2012, 2013, 0.001),
            B::years(2014, 2015, 0.026),
            B::years(2016, 2018, 0.011),
            B::years(2019, 2019, -0.004),
            B::years(2020, 2020, 0.054),
            B::years(2021, 2021, 0.097),
            B::half(2022, Half::H1, 0.020),
            B::half(2022, Half::H2, -0.081),
            B::years(2023, 2023, -0.036),
            B::years(2024, 2025, 0.006),
        ],
        0.020,
    )
}

fn seoul_hpi() -> RateTable {
    RateTable::new(
        vec![
            B::years(2001, 2001, 0.121),
            B::years(2002, 2002, 0.222),
            B::years(2003, 2003, 0.102),
            B::years(2004, 2004, -0.010),
            B::years(2005, 2005, 0.061),
            B::years(2006, 2006, 0.182),
            B::years(2007, 2007, 0.054),
            B::half(2008, Half::H1, 0.071),
            B::half(2008, Half::H2, -0.034),
            B::years(2009, 2009, 0.027),
            B::years(2010, 2013, -0.014),
            B::years(2014, 2014, 0.011),
            B::years(2015, 2017, 0.048),
            B::years(2018, 2018, 0.062),
            B::years(2019, 2019, 0.011),
            B::years(2020, 2020, 0.046),
            B::years(2021, 2021, 0.080),
            B::half(2022, Half::H1, 0.010),
            B::half(2022, Half::H2, -0.092),
            B::years(2023, 2023, -0.021),
            B::years(2024, 2024, 0.032),
            B::years(2025, 2025, 0.045),
        ],
        0.020,
    )
}

fn gangnam_hpi() -> RateTable {
    RateTable::new(
        vec![
            B::years(2001, 2003, 0.190),
            B::years(2004, 2004, 0.005),
            B::years(2005, 2006, 0.160),
            B::years(2007, 2007, 0.010),
            B::half(2008, Half::H1, 0.020),
            B::half(2008, Half::H2, -0.080),
            B::years(2009, 2009, 0.060),
            B::years(2010, 2013, -0.022),
            B::years(2014, 2017, 0.055),
            B::years(2018, 2018, 0.085),
            B::years(2019, 2021, 0.070),
            B::years(2022, 2022, -0.065),
            B::years(2023, 2023, 0.010),
            B::years(2024, 2025, 0.068),
        ],
        0.025,
    )
}

fn gyeonggi_hpi() -> RateTable {
    RateTable::new(
        vec![
            B::years(2001, 2003, 0.110),
            B::years(2004, 2005, 0.010),
            B::years(2006, 2006, 0.170),
            B::years(2007, 2008, 0.010),
            B::years(2009, 2013, -0.008),
            B::years(2014, 2019, 0.018),
            B::years(2020, 2020, 0.082),
            B::years(2021, 2021, 0.136),
            B::years(2022, 2023, -0.068),
            B::years(2024, 2025, 0.008),
        ],
        0.020,
    )
}

fn busan_hpi() -> RateTable {
    RateTable::new(
        vec![
            B::years(2001, 2003, 0.060),
            B::years(2004, 2008, 0.012),
            B::years(2009, 2011, 0.110),
            B::years(2012, 2014, 0.004),
            B::years(2015, 2017, 0.038),
            B::years(2018, 2019, -0.030),
            B::years(2020, 2021, 0.076),
            B::years(2022, 2023, -0.055),
            B::years(2024, 2025, -0.012),
        ],
        0.015,
    )
}

fn jeonse_national() -> RateTable {
    RateTable::new(
        vec![
            B::years(2001, 2002, 0.120),
            B::years(2003, 2004, -0.030),
            B::years(2005, 2008, 0.025),
            B::years(2009, 2011, 0.080),
            B::years(2012, 2016, 0.045),
            B::years(2017, 2019, -0.006),
            B::years(2020, 2021, 0.065),
            B::years(2022, 2023, -0.070),
            B::years(2024, 2025, 0.012),
        ],
        0.020,
    )
}

fn jeonse_seoul() -> RateTable {
    RateTable::new(
        vec![
            B::years(2001, 2002, 0.140),
            B::years(2003, 2004, -0.040),
            B::years(2005, 2008, 0.030),
            B::years(2009, 2011, 0.090),
            B::years(2012, 2016, 0.058),
            B::years(2017, 2019, 0.005),
            B::years(2020, 2021, 0.072),
            B::years(2022, 2023, -0.085),
            B::years(2024, 2025, 0.030),
        ],
        0.020,
    )
}

fn wolse_national() -> RateTable {
    RateTable::new(
        vec![
            B::years(2001, 2014, 0.004),
            B::years(2015, 2019, -0.002),
            B::years(2020, 2021, 0.006),
            B::years(2022, 2025, 0.021),
        ],
        0.010,
    )
}

fn cpi() -> RateTable {
    RateTable::new(
        vec![
            B::years(2000, 2007, 0.028),
            B::years(2008, 2008, 0.047),
            B::years(2009, 2010, 0.029),
            B::years(2011, 2011, 0.040),
            B::years(2012, 2014, 0.016),
            B::years(2015, 2016, 0.008),
            B::years(2017, 2019, 0.012),
            B::years(2020, 2020, 0.005),
            B::years(2021, 2021, 0.025),
            B::years(2022, 2022, 0.051),
            B::years(2023, 2023, 0.036),
            B::years(2024, 2025, 0.022),
        ],
        0.020,
    )
}

fn base_rate() -> RateTable {
    RateTable::new(
        vec![
            B::years(2001, 2001, -0.210),
            B::years(2002, 2002, 0.000),
            B::years(2003, 2004, -0.130),
            B::years(2005, 2007, 0.130),
            B::half(2008, Half::H1, 0.040),
            B::half(2008, Half::H2, -0.640),
            B::years(2009, 2009, -0.100),
            B::years(2010, 2011, 0.140),
            B::years(2012, 2016, -0.170),
            B::years(2017, 2018, 0.150),
            B::years(2019, 2020, -0.400),
            B::years(2021, 2021, 0.500),
            B::years(2022, 2022, 1.200),
            B::years(2023, 2023, 0.060),
            B::years(2024, 2025, -0.120),
        ],
        0.000,
    )
}

fn mortgage_rate() -> RateTable {
    RateTable::new(
        vec![
            B::years(2001, 2004, -0.110),
            B::years(2005, 2007, 0.060),
            B::half(2008, Half::H1, 0.050),
            B::half(2008, Half::H2, -0.200),
            B::years(2009, 2011, 0.010),
            B::years(2012, 2016, -0.110),
            B::years(2017, 2018, 0.050),
            B::years(2019, 2020, -0.140),
            B::years(2021, 2021, 0.200),
            B::years(2022, 2022, 0.450),
            B::years(2023, 2023, -0.040),
            B::years(2024, 2025, -0.060),
        ],
        0.000,
    )
}

fn gdp() -> RateTable {
    RateTable::new(
        vec![
            B::years(2000, 2007, 0.065),
            B::half(2008, Half::H1, 0.060),
            B::half(2008, Half::H2, 0.010),
            B::years(2009, 2009, 0.035),
            B::years(2010, 2011, 0.080),
            B::years(2012, 2019, 0.045),
            B::years(2020, 2020, 0.010),
            B::years(2021, 2022, 0.060),
            B::years(2023, 2025, 0.040),
        ],
        0.040,
    )
}

fn m2() -> RateTable {
    RateTable::new(
        vec![
            B::years(2000, 2007, 0.085),
            B::years(2008, 2008, 0.140),
            B::years(2009, 2014, 0.065),
            B::years(2015, 2019, 0.075),
            B::years(2020, 2021, 0.115),
            B::years(2022, 2023, 0.035),
            B::years(2024, 2025, 0.060),
        ],
        0.060,
    )
}

fn national_volume() -> RateTable {
    RateTable::new(
        vec![
            B::years(2001, 2002, 0.150),
            B::years(2003, 2005, -0.080),
            B::years(2006, 2006, 0.250),
            B::years(2007, 2008, -0.180),
            B::years(2009, 2011, 0.060),
            B::years(2012, 2012, -0.150),
            B::years(2013, 2015, 0.120),
            B::years(2016, 2019, -0.060),
            B::years(2020, 2020, 0.450),
            B::years(2021, 2022, -0.380),
            B::years(2023, 2025, 0.110),
        ],
        0.000,
    )
}

fn seoul_volume() -> RateTable {
    RateTable::new(
        vec![
            B::years(2001, 2002, 0.200),
            B::years(2003, 2005, -0.120),
            B::years(2006, 2006, 0.350),
            B::years(2007, 2008, -0.250),
            B::years(2009, 2012, -0.050),
            B::years(2013, 2015, 0.180),
            B::years(2016, 2019, -0.080),
            B::years(2020, 2020, 0.400),
            B::years(2021, 2022, -0.500),
            B::years(2023, 2025, 0.250),
        ],
        0.000,
    )
}

fn regional() -> Vec<DimensionSpec> {
    let region = |name, base, boom: f64, bust: f64| {
        dim(
            name,
            base,
            1.0,
            RateTable::new(
                vec![
                    B::years(2001, 2007, boom),
                    B::years(2008, 2013, 0.02),
                    B::years(2014, 2019, 0.015),
                    B::years(2020, 2021, boom * 1.2),
                    B::years(2022, 2023, bust),
                    B::years(2024, 2025, 0.005),
                ],
                0.02,
            ),
        )
    };
    vec![
        region("seoul", 38.0, 0.095, -0.055),
        region("busan", 47.0, 0.035, -0.060),
        region("daegu", 49.0, 0.040, -0.090),
        region("incheon", 43.0, 0.070, -0.070),
        region("gwangju", 52.0, 0.030, -0.030),
        region("daejeon", 46.0, 0.055, -0.075),
        region("ulsan", 50.0, 0.035, -0.040),
        region("sejong", 40.0, 0.050, -0.120),
        region("gyeonggi", 41.0, 0.080, -0.068),
    ]
}
