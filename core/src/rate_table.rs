//! Piecewise growth-rate tables keyed by year and, optionally, half-year.
//!
//! Bands are matched in order; the first band whose year range contains
//! the month (and whose half matches, if set) wins. Months no band covers
//! fall back to `fallback`.

use crate::{
    error::{DashError, DashResult},
    types::{Half, YearMonth},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    pub from_year:   i32,
    pub to_year:     i32,
    #[serde(default)]
    pub half:        Option<Half>,
    /// Annual growth rate as a fraction (0.05 = +5%/yr).
    pub annual_rate: f64,
}

impl RateBand {
    pub const fn years(from_year: i32, to_year: i32, annual_rate: f64) -> Self {
        Self { from_year, to_year, half: None, annual_rate }
    }

    pub const fn half(year: i32, half: Half, annual_rate: f64) -> Self {
        Self { from_year: year, to_year: year, half: Some(half), annual_rate }
    }

    fn covers(&self, at: YearMonth) -> bool {
        if at.year < self.from_year || at.year > self.to_year {
            return false;
        }
        match self.half {
            Some(h) => at.half() == h,
            None    => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub bands:    Vec<RateBand>,
    #[serde(default)]
    pub fallback: f64,
}

impl RateTable {
    /// Build a table from trusted constants. Use `validated` for
    /// tables that come from configuration.
    pub fn new(bands: Vec<RateBand>, fallback: f64) -> Self {
        Self { bands, fallback }
    }

    /// Check every band and the fallback before accepting a table.
    pub fn validated(self, dimension: &str) -> DashResult<Self> {
        let reject = |reason: String| DashError::InvalidRateTable {
            dimension: dimension.to_string(),
            reason,
        };
        if !self.fallback.is_finite() || self.fallback <= -1.0 {
            return Err(reject(format!("fallback rate {} out of range", self.fallback)));
        }
        for (i, band) in self.bands.iter().enumerate() {
            if band.from_year > band.to_year {
                return Err(reject(format!(
                    "band {i}: from_year {} after to_year {}",
                    band.from_year, band.to_year
                )));
            }
            if band.half.is_some() && band.from_year != band.to_year {
                return Err(reject(format!("band {i}: half-year band must cover a single year")));
            }
            if !band.annual_rate.is_finite() || band.annual_rate <= -1.0 {
                return Err(reject(format!("band {i}: rate {} out of range", band.annual_rate)));
            }
        }
        Ok(self)
    }

    /// Annual growth rate that applies at `at`.
    pub fn annual_rate(&self, at: YearMonth) -> f64 {
        self.bands
            .iter()
            .find(|b| b.covers(at))
            .map(|b| b.annual_rate)
            .unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RateTable {
        RateTable::new(
            vec![
                RateBand::half(2008, Half::H2, -0.04),
                RateBand::years(2006, 2008, 0.10),
                RateBand::years(2009, 2012, 0.01),
            ],
            0.03,
        )
    }

    #[test]
    fn half_year_band_takes_precedence() {
        let t = table();
        assert_eq!(t.annual_rate(YearMonth::new(2008, 3)), 0.10);
        assert_eq!(t.annual_rate(YearMonth::new(2008, 9)), -0.04);
    }

    #[test]
    fn uncovered_year_uses_fallback() {
        assert_eq!(table().annual_rate(YearMonth::new(1999, 1)), 0.03);
        assert_eq!(table().annual_rate(YearMonth::new(2030, 1)), 0.03);
    }

    #[test]
    fn inverted_band_is_rejected() {
        let bad = RateTable::new(vec![RateBand::years(2010, 2005, 0.02)], 0.0);
        let err = bad.validated("seoul").unwrap_err();
        assert!(matches!(err, DashError::InvalidRateTable { .. }));
    }

    #[test]
    fn total_collapse_rate_is_rejected() {
        let bad = RateTable::new(vec![RateBand::years(2010, 2010, -1.0)], 0.0);
        assert!(bad.validated("seoul").is_err());
    }
}
