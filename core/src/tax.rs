//! Simplified Korean property taxes: capital gains (양도소득세),
//! acquisition (취득세) and annual holding tax.

use serde::{Deserialize, Serialize};

/// Share of nominal appreciation that is taxable after deductions.
pub const TAXABLE_GAIN_SHARE: f64 = 0.85;

pub const SHORT_TERM_RATE: f64 = 0.50; // held < 1 year
pub const MID_TERM_RATE: f64 = 0.40;   // 1 ≤ years < 2
pub const LONG_TERM_RATE: f64 = 0.24;  // ≥ 2 years

/// 6억 and 9억 in 만원.
pub const ACQUISITION_LOW_BAND: f64 = 60_000.0;
pub const ACQUISITION_HIGH_BAND: f64 = 90_000.0;

/// Capital-gains rate by holding period. Boundaries are inclusive on the
/// long side: exactly 2.0 years is long-term.
pub fn capital_gains_rate(holding_years: f64) -> f64 {
    if holding_years >= 2.0 {
        LONG_TERM_RATE
    } else if holding_years >= 1.0 {
        MID_TERM_RATE
    } else {
        SHORT_TERM_RATE
    }
}

/// Tax on `gain`. Losses owe nothing.
pub fn capital_gains_tax(gain: f64, holding_years: f64) -> f64 {
    if gain <= 0.0 {
        return 0.0;
    }
    gain * TAXABLE_GAIN_SHARE * capital_gains_rate(holding_years)
}

/// Acquisition-tax rate as a fraction. First homes step from 1% to 3%
/// linearly between 6억 and 9억; additional homes pay surcharge rates.
pub fn acquisition_tax_rate(price: f64, homes_owned: u32) -> f64 {
    match homes_owned {
        0 | 1 => {
            if price <= ACQUISITION_LOW_BAND {
                0.01
            } else if price <= ACQUISITION_HIGH_BAND {
                (price * 2.0 / 30_000.0 - 3.0) / 100.0
            } else {
                0.03
            }
        }
        2 => 0.08,
        _ => 0.12,
    }
}

pub fn acquisition_tax(price: f64, homes_owned: u32) -> f64 {
    price.max(0.0) * acquisition_tax_rate(price, homes_owned)
}

/// Yearly holding tax at `rate_pct` percent of the assessed price.
pub fn annual_holding_tax(price: f64, rate_pct: f64) -> f64 {
    price.max(0.0) * rate_pct.max(0.0) / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxInput {
    pub purchase_price:    f64,
    pub sale_price:        f64,
    /// Homes owned after this purchase.
    pub homes_owned:       u32,
    pub holding_years:     f64,
    /// Percent of purchase price per year.
    pub property_tax_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub acquisition_tax:    f64,
    pub holding_tax_total:  f64,
    pub capital_gain:       f64,
    pub capital_gains_rate: f64,
    pub capital_gains_tax:  f64,
    pub total_tax:          f64,
}

impl TaxBreakdown {
    pub fn compute(input: &TaxInput) -> Self {
        let acquisition = acquisition_tax(input.purchase_price, input.homes_owned);
        let years = input.holding_years.max(0.0);
        let holding_total = annual_holding_tax(input.purchase_price, input.property_tax_rate) * years;
        let gain = input.sale_price - input.purchase_price;
        let cgt = capital_gains_tax(gain, years);
        Self {
            acquisition_tax:    acquisition,
            holding_tax_total:  holding_total,
            capital_gain:       gain,
            capital_gains_rate: capital_gains_rate(years),
            capital_gains_tax:  cgt,
            total_tax:          acquisition + holding_total + cgt,
        }
    }
}
