//! Mortgage calculator tests.

use realty_core::mortgage::{
    amortization_schedule, monthly_payment, summarize, LoanTerms, RepaymentMethod, MAX_TERM_YEARS,
};

fn terms(method: RepaymentMethod) -> LoanTerms {
    LoanTerms {
        principal: 30_000.0,
        annual_rate: 4.0,
        term_years: 20,
        method,
    }
}

#[test]
fn zero_loan_or_term_pays_nothing() {
    assert_eq!(monthly_payment(0.0, 4.5, 30), 0.0);
    assert_eq!(monthly_payment(10_000.0, 4.5, 0), 0.0);
}

#[test]
fn every_method_ends_at_zero_balance() {
    for method in [
        RepaymentMethod::EqualInstallment,
        RepaymentMethod::EqualPrincipal,
        RepaymentMethod::Bullet,
    ] {
        let schedule = amortization_schedule(&terms(method));
        assert_eq!(schedule.len(), 240, "{method:?}");
        assert_eq!(schedule.last().unwrap().balance, 0.0, "{method:?} should clear the balance");

        let principal_paid: f64 = schedule.iter().map(|r| r.principal).sum();
        assert!(
            (principal_paid - 30_000.0).abs() < 1e-6,
            "{method:?}: principal sums to {principal_paid}"
        );
    }
}

#[test]
fn equal_installment_payment_is_constant() {
    let schedule = amortization_schedule(&terms(RepaymentMethod::EqualInstallment));
    let level = monthly_payment(30_000.0, 4.0, 20);
    for row in &schedule {
        assert!(
            (row.payment - level).abs() < 1e-6,
            "month {} paid {} instead of {level}",
            row.month,
            row.payment
        );
    }
}

#[test]
fn equal_principal_payments_decline() {
    let schedule = amortization_schedule(&terms(RepaymentMethod::EqualPrincipal));
    assert!((schedule[0].principal - 125.0).abs() < 1e-9);
    assert!(schedule[0].payment > schedule[239].payment);
    assert!(schedule.windows(2).all(|w| w[1].payment <= w[0].payment + 1e-9));
}

#[test]
fn bullet_pays_interest_then_principal_at_maturity() {
    let schedule = amortization_schedule(&terms(RepaymentMethod::Bullet));
    let monthly_interest = 30_000.0 * 0.04 / 12.0;

    assert!((schedule[0].payment - monthly_interest).abs() < 1e-9);
    assert_eq!(schedule[0].principal, 0.0);
    assert!((schedule[239].principal - 30_000.0).abs() < 1e-9);
}

#[test]
fn equal_principal_costs_less_interest_than_equal_installment() {
    let installment = summarize(&amortization_schedule(&terms(RepaymentMethod::EqualInstallment)));
    let principal = summarize(&amortization_schedule(&terms(RepaymentMethod::EqualPrincipal)));
    let bullet = summarize(&amortization_schedule(&terms(RepaymentMethod::Bullet)));

    assert!(principal.total_interest < installment.total_interest);
    assert!(installment.total_interest < bullet.total_interest);
}

#[test]
fn summary_totals_add_up() {
    let schedule = amortization_schedule(&terms(RepaymentMethod::EqualInstallment));
    let summary = summarize(&schedule);

    assert_eq!(summary.months, 240);
    assert!((summary.total_payment - summary.total_interest - 30_000.0).abs() < 1e-6);
    assert_eq!(summary.first_payment, schedule[0].payment);
}

#[test]
fn empty_schedule_summarizes_to_zero() {
    let schedule = amortization_schedule(&LoanTerms { principal: 0.0, ..terms(RepaymentMethod::Bullet) });
    assert!(schedule.is_empty());
    let summary = summarize(&schedule);
    assert_eq!(summary.total_payment, 0.0);
    assert_eq!(summary.months, 0);
}

#[test]
fn terms_beyond_the_longest_loan_are_clamped() {
    let huge = LoanTerms { term_years: u32::MAX, ..terms(RepaymentMethod::EqualInstallment) };
    let schedule = amortization_schedule(&huge);

    assert_eq!(schedule.len(), (MAX_TERM_YEARS * 12) as usize);
    assert_eq!(
        monthly_payment(30_000.0, 4.0, u32::MAX),
        monthly_payment(30_000.0, 4.0, MAX_TERM_YEARS)
    );
    assert!(schedule.last().unwrap().balance.abs() < 1e-6);
}
