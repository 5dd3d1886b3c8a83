// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionType;
use crate::stats;
use crate::utils::{maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("category", sub)) => category(conn, sub)?,
        Some(("trend", sub)) => trend(conn, sub)?,
        Some(("category-range", sub)) => category_range(conn, sub)?,
        Some(("range", sub)) => range(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = *sub.get_one::<i32>("year").unwrap();
    let month = *sub.get_one::<u32>("month").unwrap();

    let s = stats::monthly_summary(conn, year, month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let rows = vec![vec![
            format!("{:04}-{:02}", s.year, s.month),
            s.total_income.to_string(),
            s.total_expense.to_string(),
            s.net_amount.to_string(),
            s.transaction_count.to_string(),
        ]];
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Net", "Count"], rows)
        );
    }
    Ok(())
}

fn category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = *sub.get_one::<i32>("year").unwrap();
    let month = *sub.get_one::<u32>("month").unwrap();
    let ty: TransactionType = sub.get_one::<String>("type").unwrap().parse()?;

    let data = stats::category_breakdown(conn, year, month, ty)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    c.total_amount.to_string(),
                    c.transaction_count.to_string(),
                    format!("{:.1}%", c.percentage),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Total", "Count", "Share"], rows)
        );
    }
    Ok(())
}

fn trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);

    let data = stats::monthly_trend(conn, months)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|p| {
                vec![
                    p.month.clone(),
                    p.income.to_string(),
                    p.expense.to_string(),
                    p.net.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Net"], rows)
        );
    }
    Ok(())
}

fn category_range(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ty = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>())
        .transpose()?;
    let from = sub
        .get_one::<String>("from")
        .map(|s| parse_date(s))
        .transpose()?;
    let to = sub
        .get_one::<String>("to")
        .map(|s| parse_date(s))
        .transpose()?;

    let data = stats::category_summary(conn, ty, from, to)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    c.total_amount.to_string(),
                    c.transaction_count.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Total", "Count"], rows));
    }
    Ok(())
}

fn range(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let from = sub
        .get_one::<String>("from")
        .map(|s| parse_date(s))
        .transpose()?;
    let to = sub
        .get_one::<String>("to")
        .map(|s| parse_date(s))
        .transpose()?;

    let s = stats::range_summary(conn, from, to)?;
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let rows = vec![vec![
            s.total_income.to_string(),
            s.total_expense.to_string(),
            s.net_amount.to_string(),
            s.transaction_count.to_string(),
        ]];
        println!(
            "{}",
            pretty_table(&["Income", "Expense", "Net", "Count"], rows)
        );
    }
    Ok(())
}
