//! Investment simulation: the dashboard's ROI calculator.
//!
//! The engine is stateless: every call recomputes the whole projection
//! from the input. Validation is advisory. simulate() always returns a
//! result, and every division has a defined fallback so no field is NaN
//! for finite inputs.

use crate::{
    analytics,
    mortgage::monthly_payment,
    tax::{capital_gains_rate, capital_gains_tax},
};
use serde::{Deserialize, Serialize};

pub use crate::mortgage::MAX_TERM_YEARS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentType {
    /// Monthly rent (월세) on top of a deposit.
    Rental,
    /// Deposit-only lease (전세). Rent is ignored.
    Jeonse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    pub investment_type:       InvestmentType,
    pub purchase_price:        f64,
    /// Percent of price paid in cash.
    pub equity_ratio:          f64,
    /// Percent per year.
    pub loan_rate:             f64,
    pub loan_term_years:       u32,
    pub monthly_rent:          f64,
    /// Tenant deposit held by the owner.
    #[serde(default)]
    pub deposit:               f64,
    /// Percent per year earned on the deposit.
    #[serde(default)]
    pub deposit_interest_rate: f64,
    /// Per month.
    pub maintenance_cost:      f64,
    /// Percent of purchase price per year.
    pub property_tax_rate:     f64,
    /// Percent per year.
    pub expected_appreciation: f64,
    pub holding_period:        u32,
    /// Percent of the year the unit sits empty.
    pub vacancy_rate:          f64,
}

impl Default for SimulationInput {
    fn default() -> Self {
        Self {
            investment_type:       InvestmentType::Rental,
            purchase_price:        100_000.0,
            equity_ratio:          40.0,
            loan_rate:             4.5,
            loan_term_years:       30,
            monthly_rent:          250.0,
            deposit:               5_000.0,
            deposit_interest_rate: 3.0,
            maintenance_cost:      20.0,
            property_tax_rate:     0.2,
            expected_appreciation: 3.0,
            holding_period:        10,
            vacancy_rate:          5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub field:   &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyProjection {
    pub year:                 u32,
    pub property_value:       f64,
    pub remaining_loan:       f64,
    pub equity:               f64,
    pub cumulative_cash_flow: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub equity_amount:      f64,
    pub loan_amount:        f64,
    pub monthly_payment:    f64,
    pub annual_net_income:  f64,
    pub cash_on_cash_yield: f64,
    pub yearly:             Vec<YearlyProjection>,
    pub sale_value:         f64,
    pub capital_gain:       f64,
    pub capital_gains_tax:  f64,
    pub total_profit:       f64,
    /// Percent.
    pub total_roi:          f64,
    /// Percent per year.
    pub annualized_roi:     f64,
}

/// Field-level problems with `input`. An empty vec means the input is sane.
pub fn validate(input: &SimulationInput) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let amounts = [
        ("purchase_price", input.purchase_price),
        ("monthly_rent", input.monthly_rent),
        ("deposit", input.deposit),
        ("maintenance_cost", input.maintenance_cost),
    ];
    for (field, value) in amounts {
        if !value.is_finite() {
            issues.push(issue(field, "must be a finite number"));
        } else if value < 0.0 {
            issues.push(issue(field, "must not be negative"));
        }
    }

    let percents = [
        ("equity_ratio", input.equity_ratio),
        ("loan_rate", input.loan_rate),
        ("deposit_interest_rate", input.deposit_interest_rate),
        ("property_tax_rate", input.property_tax_rate),
        ("expected_appreciation", input.expected_appreciation),
        ("vacancy_rate", input.vacancy_rate),
    ];
    for (field, value) in percents {
        if !value.is_finite() {
            issues.push(issue(field, "must be a finite number"));
        } else if value < 0.0 {
            issues.push(issue(field, "must not be negative"));
        } else if value > 100.0 {
            issues.push(issue(field, "must be between 0 and 100"));
        }
    }

    let durations = [
        ("loan_term_years", input.loan_term_years),
        ("holding_period", input.holding_period),
    ];
    for (field, value) in durations {
        if !(1..=MAX_TERM_YEARS).contains(&value) {
            issues.push(issue(field, &format!("must be between 1 and {MAX_TERM_YEARS} years")));
        }
    }

    issues
}

fn issue(field: &'static str, message: &str) -> ValidationIssue {
    ValidationIssue { field, message: message.to_string() }
}

/// Yearly net cash income after vacancy, carrying costs and debt service.
pub fn annual_net_income(input: &SimulationInput, monthly_payment: f64) -> f64 {
    let rent_income = match input.investment_type {
        InvestmentType::Rental => input.monthly_rent * 12.0 * (1.0 - input.vacancy_rate / 100.0),
        InvestmentType::Jeonse => 0.0,
    };
    let deposit_income = input.deposit * input.deposit_interest_rate / 100.0;
    let maintenance = input.maintenance_cost * 12.0;
    let property_tax = input.property_tax_rate / 100.0 * input.purchase_price;
    rent_income + deposit_income - maintenance - property_tax - monthly_payment * 12.0
}

/// Annualized return in percent. Zero holding period reports 0; a total
/// loss (or worse) reports -100.
pub fn annualized_roi(total_roi: f64, holding_period: u32) -> f64 {
    if holding_period == 0 {
        return 0.0;
    }
    let growth = 1.0 + total_roi / 100.0;
    if growth <= 0.0 {
        return -100.0;
    }
    (growth.powf(1.0 / f64::from(holding_period)) - 1.0) * 100.0
}

pub fn simulate(input: &SimulationInput) -> SimulationResult {
    let equity_amount = input.purchase_price * input.equity_ratio / 100.0;
    let loan_amount = input.purchase_price - equity_amount;
    // Out-of-range durations are flagged by validate() and clamped here.
    let loan_term = input.loan_term_years.min(MAX_TERM_YEARS);
    let holding_period = input.holding_period.min(MAX_TERM_YEARS);
    let payment = if loan_amount > 0.0 {
        monthly_payment(loan_amount, input.loan_rate, loan_term)
    } else {
        0.0
    };
    let net_income = annual_net_income(input, payment);

    // Straight-line principal share. A zero term is treated as repaid
    // in full after the first year.
    let principal_per_year = if loan_term == 0 {
        loan_amount
    } else {
        loan_amount / f64::from(loan_term)
    };
    let growth = 1.0 + input.expected_appreciation / 100.0;

    let yearly: Vec<YearlyProjection> = (0..=holding_period)
        .map(|year| {
            let property_value = input.purchase_price * growth.powi(year as i32);
            let remaining_loan = (loan_amount - principal_per_year * f64::from(year)).max(0.0);
            YearlyProjection {
                year,
                property_value,
                remaining_loan,
                equity: property_value - remaining_loan,
                cumulative_cash_flow: -equity_amount + net_income * f64::from(year),
            }
        })
        .collect();

    let (sale_value, final_equity) = yearly
        .last()
        .map(|y| (y.property_value, y.equity))
        .unwrap_or((input.purchase_price, equity_amount));

    let holding_years = f64::from(holding_period);
    let capital_gain = sale_value - input.purchase_price;
    let cgt = capital_gains_tax(capital_gain, holding_years);
    let cumulative_income = net_income * holding_years;
    let total_profit = final_equity - equity_amount + cumulative_income - cgt;

    let (total_roi, cash_on_cash_yield) = if equity_amount > 0.0 {
        (total_profit / equity_amount * 100.0, net_income / equity_amount * 100.0)
    } else {
        (0.0, 0.0)
    };

    log::debug!(
        "simulated {:?}: price={:.0} loan={:.0} payment={:.2} roi={:.2}% cgt_rate={:.2}",
        input.investment_type,
        input.purchase_price,
        loan_amount,
        payment,
        total_roi,
        capital_gains_rate(holding_years)
    );

    SimulationResult {
        equity_amount,
        loan_amount,
        monthly_payment: payment,
        annual_net_income: net_income,
        cash_on_cash_yield,
        yearly,
        sale_value,
        capital_gain,
        capital_gains_tax: cgt,
        total_profit,
        total_roi,
        annualized_roi: annualized_roi(total_roi, holding_period),
    }
}

/// Compound growth of the property value alone, as a fraction per year.
/// Cross-checks the projection against the appreciation input.
pub fn realized_appreciation(result: &SimulationResult) -> f64 {
    match (result.yearly.first(), result.yearly.last()) {
        (Some(first), Some(last)) if last.year > 0 => {
            analytics::cagr(first.property_value, last.property_value, f64::from(last.year))
        }
        _ => 0.0,
    }
}
