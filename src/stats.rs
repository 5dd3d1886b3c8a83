// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregation queries over the transaction ledger. Sums are accumulated in
//! `Decimal` from the TEXT-stored amounts; SQLite never does float math here.

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::Error;
use crate::models::TransactionType;

#[derive(Debug, Clone, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_amount: Decimal,
    pub transaction_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryStat {
    pub category: String,
    pub total_amount: Decimal,
    pub transaction_count: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummaryRow {
    pub category: String,
    pub total_amount: Decimal,
    pub transaction_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_amount: Decimal,
    pub transaction_count: i64,
}

fn parse_amount(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .map_err(|_| Error::Aggregation(format!("non-numeric amount '{}' in ledger", s)).into())
}

/// Income/expense/net totals and transaction count for one calendar month.
/// Completed transactions only; cancelled rows are excluded.
pub fn monthly_summary(conn: &Connection, year: i32, month: u32) -> Result<MonthlySummary> {
    let prefix = format!("{:04}-{:02}", year, month);
    let mut stmt = conn.prepare(
        "SELECT amount, type FROM transactions
         WHERE substr(date,1,7)=?1 AND status='completed'",
    )?;
    let mut rows = stmt.query([&prefix])?;

    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    let mut transaction_count = 0i64;
    while let Some(r) = rows.next()? {
        let amount_s: String = r.get(0)?;
        let ty: String = r.get(1)?;
        let amount = parse_amount(&amount_s)?;
        if ty == "income" {
            total_income += amount;
        } else {
            total_expense += amount;
        }
        transaction_count += 1;
    }

    Ok(MonthlySummary {
        year,
        month,
        total_income,
        total_expense,
        net_amount: total_income - total_expense,
        transaction_count,
    })
}

/// Per-category totals with percentage share for one (year, month, type).
/// Completed, categorized transactions only; ordered by descending total
/// (ties broken by category name) so output is deterministic.
pub fn category_breakdown(
    conn: &Connection,
    year: i32,
    month: u32,
    ty: TransactionType,
) -> Result<Vec<CategoryStat>> {
    let prefix = format!("{:04}-{:02}", year, month);
    let mut stmt = conn.prepare(
        "SELECT category, amount FROM transactions
         WHERE substr(date,1,7)=?1 AND status='completed' AND type=?2 AND category IS NOT NULL",
    )?;
    let mut rows = stmt.query(rusqlite::params![prefix, ty.as_str()])?;

    let mut groups: BTreeMap<String, (Decimal, i64)> = BTreeMap::new();
    while let Some(r) = rows.next()? {
        let category: String = r.get(0)?;
        let amount_s: String = r.get(1)?;
        let amount = parse_amount(&amount_s)?;
        let entry = groups.entry(category).or_insert((Decimal::ZERO, 0));
        entry.0 += amount;
        entry.1 += 1;
    }

    let total: Decimal = groups.values().map(|(t, _)| *t).sum();
    // Degenerate all-zero month: divide by 1 so every share reads 0.
    let denom = if total.is_zero() { Decimal::ONE } else { total };

    let mut out: Vec<CategoryStat> = groups
        .into_iter()
        .map(|(category, (total_amount, transaction_count))| CategoryStat {
            category,
            total_amount,
            transaction_count,
            percentage: (total_amount / denom * Decimal::from(100))
                .to_f64()
                .unwrap_or(0.0),
        })
        .collect();
    out.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    Ok(out)
}

/// Month-over-month income/expense/net series, newest first, truncated to
/// `months` entries.
///
/// Unlike `monthly_summary`, this path aggregates ALL transactions
/// including cancelled ones — kept for parity with the historical
/// behaviour rather than unified; see DESIGN.md.
pub fn monthly_trend(conn: &Connection, months: usize) -> Result<Vec<TrendPoint>> {
    let mut stmt = conn.prepare("SELECT substr(date,1,7), type, amount FROM transactions")?;
    let mut rows = stmt.query([])?;

    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    while let Some(r) = rows.next()? {
        let month: String = r.get(0)?;
        let ty: String = r.get(1)?;
        let amount_s: String = r.get(2)?;
        let amount = parse_amount(&amount_s)?;
        let entry = map.entry(month).or_insert((Decimal::ZERO, Decimal::ZERO));
        if ty == "income" {
            entry.0 += amount;
        } else {
            entry.1 += amount;
        }
    }

    Ok(map
        .into_iter()
        .rev()
        .take(months)
        .map(|(month, (income, expense))| TrendPoint {
            month,
            income,
            expense,
            net: income - expense,
        })
        .collect())
}

/// Per-category totals over an arbitrary date range. Same filtering as
/// `category_breakdown` minus the fixed month and the percentage column.
pub fn category_summary(
    conn: &Connection,
    ty: Option<TransactionType>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<Vec<CategorySummaryRow>> {
    let mut sql = String::from(
        "SELECT category, amount FROM transactions
         WHERE status='completed' AND category IS NOT NULL",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(t) = ty {
        sql.push_str(" AND type=?");
        params_vec.push(t.as_str().to_string());
    }
    if let Some(d) = start_date {
        sql.push_str(" AND substr(date,1,10)>=?");
        params_vec.push(d.to_string());
    }
    if let Some(d) = end_date {
        sql.push_str(" AND substr(date,1,10)<=?");
        params_vec.push(d.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut groups: BTreeMap<String, (Decimal, i64)> = BTreeMap::new();
    while let Some(r) = rows.next()? {
        let category: String = r.get(0)?;
        let amount_s: String = r.get(1)?;
        let amount = parse_amount(&amount_s)?;
        let entry = groups.entry(category).or_insert((Decimal::ZERO, 0));
        entry.0 += amount;
        entry.1 += 1;
    }

    let mut out: Vec<CategorySummaryRow> = groups
        .into_iter()
        .map(|(category, (total_amount, transaction_count))| CategorySummaryRow {
            category,
            total_amount,
            transaction_count,
        })
        .collect();
    out.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    Ok(out)
}

/// Overall totals over an arbitrary date range, all statuses included.
pub fn range_summary(
    conn: &Connection,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<RangeSummary> {
    let mut sql = String::from("SELECT amount, type FROM transactions WHERE 1=1");
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(d) = start_date {
        sql.push_str(" AND substr(date,1,10)>=?");
        params_vec.push(d.to_string());
    }
    if let Some(d) = end_date {
        sql.push_str(" AND substr(date,1,10)<=?");
        params_vec.push(d.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    let mut transaction_count = 0i64;
    while let Some(r) = rows.next()? {
        let amount_s: String = r.get(0)?;
        let ty: String = r.get(1)?;
        let amount = parse_amount(&amount_s)?;
        if ty == "income" {
            total_income += amount;
        } else {
            total_expense += amount;
        }
        transaction_count += 1;
    }

    Ok(RangeSummary {
        total_income,
        total_expense,
        net_amount: total_income - total_expense,
        transaction_count,
    })
}
