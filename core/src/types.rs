//! Shared primitive types used across the entire crate.
//!
//! Monetary amounts are plain f64s in units of 10,000 KRW (만원).
//! Percent fields hold percent values: 4.5 means 4.5%.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month, used as the inclusive bounds of a generation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year:  i32,
    pub month: u32,
}

impl YearMonth {
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The following calendar month.
    pub fn next(self) -> Self {
        if self.month >= 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// Quarter (1..=4) this month falls in.
    pub fn quarter(self) -> u32 {
        (self.month.clamp(1, 12) - 1) / 3 + 1
    }

    pub fn half(self) -> Half {
        if self.month <= 6 { Half::H1 } else { Half::H2 }
    }

    pub fn is_valid(self) -> bool {
        (1..=12).contains(&self.month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Half of a calendar year. H1 = Jan–Jun, H2 = Jul–Dec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    H1,
    H2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            Self::Monthly   => 12,
            Self::Quarterly => 4,
            Self::Yearly    => 1,
        }
    }
}

/// One calendar period of a time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "freq", rename_all = "snake_case")]
pub enum Period {
    Month { year: i32, month: u32 },
    Quarter { year: i32, quarter: u32 },
    Year { year: i32 },
}

impl Period {
    pub fn year(&self) -> i32 {
        match *self {
            Self::Month { year, .. } | Self::Quarter { year, .. } | Self::Year { year } => year,
        }
    }

    /// First month covered by this period. Rate tables are keyed by month,
    /// so quarters and years look up their bias at their opening month.
    pub fn first_month(&self) -> YearMonth {
        match *self {
            Self::Month { year, month }     => YearMonth::new(year, month),
            Self::Quarter { year, quarter } => YearMonth::new(year, (quarter - 1) * 3 + 1),
            Self::Year { year }             => YearMonth::new(year, 1),
        }
    }

    /// The same period one year earlier.
    pub fn prior_year(&self) -> Self {
        match *self {
            Self::Month { year, month }     => Self::Month { year: year - 1, month },
            Self::Quarter { year, quarter } => Self::Quarter { year: year - 1, quarter },
            Self::Year { year }             => Self::Year { year: year - 1 },
        }
    }

    /// Every period of `frequency` from the one containing `start` through
    /// the one containing `end`, inclusive. Empty when `start > end`.
    pub fn range(frequency: Frequency, start: YearMonth, end: YearMonth) -> Vec<Period> {
        if start > end {
            return Vec::new();
        }
        match frequency {
            Frequency::Monthly => {
                let mut out = Vec::new();
                let mut cursor = start;
                while cursor <= end {
                    out.push(Self::Month { year: cursor.year, month: cursor.month });
                    cursor = cursor.next();
                }
                out
            }
            Frequency::Quarterly => {
                let first = (start.year, start.quarter());
                let last = (end.year, end.quarter());
                let mut out = Vec::new();
                let (mut year, mut quarter) = first;
                while (year, quarter) <= last {
                    out.push(Self::Quarter { year, quarter });
                    if quarter == 4 {
                        year += 1;
                        quarter = 1;
                    } else {
                        quarter += 1;
                    }
                }
                out
            }
            Frequency::Yearly => (start.year..=end.year).map(|year| Self::Year { year }).collect(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month { year, month }     => write!(f, "{year:04}-{month:02}"),
            Self::Quarter { year, quarter } => write!(f, "{year:04}-Q{quarter}"),
            Self::Year { year }             => write!(f, "{year:04}"),
        }
    }
}
