//! Mortgage calculator: repayment schedules for the three common
//! Korean repayment methods.

use serde::{Deserialize, Serialize};

/// Longest loan the calculators schedule. Longer terms are clamped.
pub const MAX_TERM_YEARS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentMethod {
    /// 원리금균등: constant total payment.
    EqualInstallment,
    /// 원금균등: constant principal, falling interest.
    EqualPrincipal,
    /// 만기일시: interest only, principal at maturity.
    Bullet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal:   f64,
    /// Percent per year.
    pub annual_rate: f64,
    pub term_years:  u32,
    pub method:      RepaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month:     u32,
    pub payment:   f64,
    pub principal: f64,
    pub interest:  f64,
    pub balance:   f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub months:          u32,
    pub total_payment:   f64,
    pub total_interest:  f64,
    pub first_payment:   f64,
    pub last_payment:    f64,
}

/// Equal-installment monthly payment:
/// M = L·r(1+r)^n / ((1+r)^n − 1), r = annual_rate/100/12, n = years·12.
///
/// Zero loan or zero term pays nothing; a zero rate spreads the loan evenly.
/// Terms beyond `MAX_TERM_YEARS` are clamped.
pub fn monthly_payment(principal: f64, annual_rate: f64, term_years: u32) -> f64 {
    let n = term_years.min(MAX_TERM_YEARS) * 12;
    if principal <= 0.0 || n == 0 {
        return 0.0;
    }
    let r = annual_rate / 100.0 / 12.0;
    if r == 0.0 {
        return principal / f64::from(n);
    }
    let growth = (1.0 + r).powi(n as i32);
    principal * r * growth / (growth - 1.0)
}

/// Month-by-month repayment schedule. The final row always clears the
/// balance, absorbing floating-point drift.
pub fn amortization_schedule(terms: &LoanTerms) -> Vec<ScheduleRow> {
    let months = terms.term_years.min(MAX_TERM_YEARS) * 12;
    if terms.principal <= 0.0 || months == 0 {
        return Vec::new();
    }

    let r = terms.annual_rate.max(0.0) / 100.0 / 12.0;
    let level_payment = monthly_payment(terms.principal, terms.annual_rate.max(0.0), terms.term_years);
    let level_principal = terms.principal / f64::from(months);

    let mut balance = terms.principal;
    let mut rows = Vec::with_capacity(months as usize);

    for month in 1..=months {
        let interest = balance * r;
        let principal = if month == months {
            balance
        } else {
            match terms.method {
                RepaymentMethod::EqualInstallment => (level_payment - interest).min(balance),
                RepaymentMethod::EqualPrincipal   => level_principal.min(balance),
                RepaymentMethod::Bullet           => 0.0,
            }
        };
        balance -= principal;
        rows.push(ScheduleRow {
            month,
            payment: principal + interest,
            principal,
            interest,
            balance: balance.max(0.0),
        });
    }

    rows
}

pub fn summarize(schedule: &[ScheduleRow]) -> LoanSummary {
    let total_payment: f64 = schedule.iter().map(|r| r.payment).sum();
    let total_interest: f64 = schedule.iter().map(|r| r.interest).sum();
    LoanSummary {
        months: schedule.len() as u32,
        total_payment,
        total_interest,
        first_payment: schedule.first().map(|r| r.payment).unwrap_or(0.0),
        last_payment: schedule.last().map(|r| r.payment).unwrap_or(0.0),
    }
}
