// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Korean payroll and financial-income tax estimation (2024 rates).
//!
//! All figures are estimates based on the simplified withholding table and
//! the four social-insurance rates; every percentage result is truncated
//! down to the nearest 10 won, matching the published bracket tables.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Monthly income cap for the national pension contribution.
static PENSION_INCOME_CAP: Lazy<Decimal> = Lazy::new(|| Decimal::from(6_170_000));

/// Per-dependent basic personal deduction (annual).
static DEPENDENT_DEDUCTION: Lazy<Decimal> = Lazy::new(|| Decimal::from(1_500_000));

struct Bracket {
    floor: Decimal,
    base: Decimal,
    rate: Decimal,
}

fn bracket(floor: i64, base: i64, rate_num: i64, rate_scale: u32) -> Bracket {
    Bracket {
        floor: Decimal::from(floor),
        base: Decimal::from(base),
        rate: Decimal::new(rate_num, rate_scale),
    }
}

/// Earned-income deduction schedule, highest floor first.
static EARNED_INCOME_DEDUCTION: Lazy<Vec<Bracket>> = Lazy::new(|| {
    vec![
        bracket(100_000_000, 14_750_000, 2, 2),
        bracket(45_000_000, 12_000_000, 5, 2),
        bracket(15_000_000, 7_500_000, 15, 2),
        bracket(5_000_000, 3_500_000, 40, 2),
        bracket(0, 0, 70, 2),
    ]
});

/// Basic progressive income-tax schedule, highest floor first.
static INCOME_TAX_BRACKETS: Lazy<Vec<Bracket>> = Lazy::new(|| {
    vec![
        bracket(1_000_000_000, 384_060_000, 45, 2),
        bracket(500_000_000, 174_060_000, 42, 2),
        bracket(300_000_000, 94_060_000, 40, 2),
        bracket(150_000_000, 37_060_000, 38, 2),
        bracket(88_000_000, 15_360_000, 35, 2),
        bracket(50_000_000, 6_240_000, 24, 2),
        bracket(14_000_000, 840_000, 15, 2),
        bracket(0, 0, 6, 2),
    ]
});

#[derive(Debug, Clone, Serialize)]
pub struct TaxResult {
    pub gross_amount: Decimal,
    pub net_amount: Decimal,
    pub deductions: BTreeMap<String, Decimal>,
    pub details: BTreeMap<String, String>,
}

/// Truncate down to the nearest 10 won: integer-divide by 10, discard the
/// remainder, multiply back. Never rounds to nearest.
pub fn trunc_to_ten(d: Decimal) -> Decimal {
    let ten = Decimal::from(10);
    (d / ten).trunc() * ten
}

fn progressive(table: &[Bracket], amount: Decimal) -> Decimal {
    for b in table {
        if amount > b.floor {
            return b.base + (amount - b.floor) * b.rate;
        }
    }
    // amount <= 0 lands here; the bottom bracket has floor 0.
    let bottom = table.last().expect("bracket tables are non-empty");
    bottom.base + (amount - bottom.floor).max(Decimal::ZERO) * bottom.rate
}

/// Net monthly pay from a gross monthly salary.
///
/// Inputs are clamped rather than rejected: a zero or negative gross yields
/// a degenerate but non-failing result. The CLI validates positivity before
/// calling in; library callers are expected to do the same.
pub fn salary(gross_monthly: Decimal, dependents: u32) -> TaxResult {
    // Four social insurances, employee share.
    let pension_income = gross_monthly.min(*PENSION_INCOME_CAP);
    let national_pension = trunc_to_ten(pension_income * Decimal::new(45, 3));
    let health_insurance = trunc_to_ten(gross_monthly * Decimal::new(3545, 5));
    let long_term_care = trunc_to_ten(health_insurance * Decimal::new(1295, 4));
    let employment_insurance = trunc_to_ten(gross_monthly * Decimal::new(9, 3));
    let total_insurance =
        national_pension + health_insurance + long_term_care + employment_insurance;

    // Annualize, apply the earned-income deduction and the per-dependent
    // personal deduction, floor at zero.
    let annual_salary = gross_monthly * Decimal::from(12);
    let earned_deduction = progressive(&EARNED_INCOME_DEDUCTION, annual_salary);
    let tax_base = (annual_salary - earned_deduction
        - *DEPENDENT_DEDUCTION * Decimal::from(dependents))
    .max(Decimal::ZERO);

    let annual_tax = progressive(&INCOME_TAX_BRACKETS, tax_base);
    let income_tax = trunc_to_ten(annual_tax / Decimal::from(12));
    let local_income_tax = trunc_to_ten(income_tax * Decimal::new(1, 1));

    let total_deduction = total_insurance + income_tax + local_income_tax;
    let net_amount = gross_monthly - total_deduction;

    let mut deductions = BTreeMap::new();
    deductions.insert("national_pension".into(), national_pension);
    deductions.insert("health_insurance".into(), health_insurance);
    deductions.insert("long_term_care".into(), long_term_care);
    deductions.insert("employment_insurance".into(), employment_insurance);
    deductions.insert("income_tax".into(), income_tax);
    deductions.insert("local_income_tax".into(), local_income_tax);
    deductions.insert("total_deduction".into(), total_deduction);

    let mut details = BTreeMap::new();
    details.insert(
        "note".into(),
        "본 계산은 간이세액표 및 4대보험 요율을 적용한 예상치이며, 실제와 차이가 있을 수 있습니다."
            .into(),
    );

    TaxResult {
        gross_amount: gross_monthly,
        net_amount,
        deductions,
        details,
    }
}

/// Flat-rate tax on interest/dividend income: 14% income tax plus 10% of
/// that as local tax (15.4% combined).
pub fn financial(income: Decimal) -> TaxResult {
    let income_tax = trunc_to_ten(income * Decimal::new(14, 2));
    let local_income_tax = trunc_to_ten(income_tax * Decimal::new(1, 1));
    let total_deduction = income_tax + local_income_tax;
    let net_amount = income - total_deduction;

    let mut deductions = BTreeMap::new();
    deductions.insert("income_tax".into(), income_tax);
    deductions.insert("local_income_tax".into(), local_income_tax);
    deductions.insert("total_deduction".into(), total_deduction);

    let mut details = BTreeMap::new();
    details.insert("rate".into(), "15.4% (소득세 14% + 지방세 1.4%)".into());

    TaxResult {
        gross_amount: income,
        net_amount,
        deductions,
        details,
    }
}
