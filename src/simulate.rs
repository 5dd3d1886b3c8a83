// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Asset-goal feasibility analysis: projects the balance forward month by
//! month against the net of the regular (recurring) transactions.

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

use crate::error::Error;
use crate::models::{AssetGoal, Frequency, RegularTransaction, TransactionType};
use crate::utils::{month_label, months_between, parse_date};

#[derive(Debug, Clone, Serialize)]
pub struct SimulationPoint {
    /// "YYYY-MM"
    pub date: String,
    pub projected_amount: Decimal,
    /// Constant target amount, repeated per point for chart comparison.
    pub target_line: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub monthly_data: Vec<SimulationPoint>,
    pub final_amount: Decimal,
    pub is_achievable: bool,
    pub shortfall: Decimal,
    pub monthly_saving_needed: Decimal,
}

/// Analyze whether the stored goal is reachable by its target date.
/// Fails only when the goal id does not exist.
pub fn analyze(conn: &Connection, goal_id: i64, today: NaiveDate) -> Result<SimulationResult> {
    let goal = load_goal(conn, goal_id)?;
    let regulars = load_regulars(conn)?;
    Ok(project(&goal, &regulars, today))
}

/// Project the savings trajectory from `today` to the goal's target date.
///
/// Every regular transaction contributes its full amount once per simulated
/// month, whatever its frequency field says; that simplification is
/// deliberate and preserved as-is (see DESIGN.md). The series always has
/// `months_remaining + 1` points, starting at the goal's current amount.
pub fn project(
    goal: &AssetGoal,
    regulars: &[RegularTransaction],
    today: NaiveDate,
) -> SimulationResult {
    // Whole months to the target date, never less than one step even when
    // the date has passed.
    let months_remaining = months_between(today, goal.target_date).max(1);

    let mut monthly_net = Decimal::ZERO;
    for r in regulars {
        match r.r#type {
            TransactionType::Income => monthly_net += r.amount,
            TransactionType::Expense => monthly_net -= r.amount,
        }
    }

    let mut monthly_data = Vec::with_capacity(months_remaining as usize + 1);
    let mut balance = goal.current_amount;
    for i in 0..=months_remaining {
        monthly_data.push(SimulationPoint {
            date: month_label(today, i as u32),
            projected_amount: balance,
            target_line: goal.target_amount,
        });
        balance += monthly_net;
    }

    let final_amount = monthly_data
        .last()
        .expect("at least two points simulated")
        .projected_amount;
    let is_achievable = final_amount >= goal.target_amount;
    let shortfall = goal.target_amount - final_amount;
    let monthly_saving_needed = if shortfall > Decimal::ZERO {
        shortfall / Decimal::from(months_remaining)
    } else {
        Decimal::ZERO
    };

    SimulationResult {
        monthly_data,
        final_amount,
        is_achievable,
        shortfall,
        monthly_saving_needed,
    }
}

fn parse_stored_decimal(s: &str, what: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .map_err(|_| Error::Aggregation(format!("non-numeric {} '{}'", what, s)).into())
}

fn load_goal(conn: &Connection, goal_id: i64) -> Result<AssetGoal> {
    let row: Option<(String, String, String, String, Option<String>)> = conn
        .query_row(
            "SELECT title, target_amount, target_date, current_amount, description
             FROM asset_goals WHERE id=?1",
            [goal_id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?)),
        )
        .optional()?;
    let (title, target_s, target_date_s, current_s, description) =
        row.ok_or_else(|| Error::not_found("asset goal", goal_id))?;

    Ok(AssetGoal {
        id: goal_id,
        title,
        target_amount: parse_stored_decimal(&target_s, "target amount")?,
        target_date: parse_date(&target_date_s[..10.min(target_date_s.len())])?,
        current_amount: parse_stored_decimal(&current_s, "current amount")?,
        description,
    })
}

fn load_regulars(conn: &Connection) -> Result<Vec<RegularTransaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, description, amount, category, type, frequency, day_of_month, start_date, end_date
         FROM regular_transactions",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let amount_s: String = r.get(2)?;
        let type_s: String = r.get(4)?;
        let frequency_s: String = r.get(5)?;
        let start_s: String = r.get(7)?;
        let end_s: Option<String> = r.get(8)?;
        out.push(RegularTransaction {
            id: r.get(0)?,
            description: r.get(1)?,
            amount: parse_stored_decimal(&amount_s, "regular amount")?,
            category: r.get(3)?,
            r#type: TransactionType::from_str(&type_s)?,
            frequency: Frequency::from_str(&frequency_s)?,
            day_of_month: r.get(6)?,
            start_date: parse_date(&start_s[..10.min(start_s.len())])?,
            end_date: end_s
                .map(|s| parse_date(&s[..10.min(s.len())]))
                .transpose()?,
        });
    }
    Ok(out)
}
