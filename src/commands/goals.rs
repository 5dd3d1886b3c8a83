// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use crate::simulate;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, parse_positive_decimal, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("analyze", sub)) => analyze(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").unwrap();
    let target_amount = parse_positive_decimal(sub.get_one::<String>("amount").unwrap())?;
    let target_date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let current = parse_decimal(sub.get_one::<String>("current").unwrap())?;
    if current < Decimal::ZERO {
        return Err(Error::InvalidInput("current amount must not be negative".into()).into());
    }
    let description = sub.get_one::<String>("description").map(|s| s.to_string());

    conn.execute(
        "INSERT INTO asset_goals(title, target_amount, target_date, current_amount, description)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            title,
            target_amount.to_string(),
            target_date.to_string(),
            current.to_string(),
            description
        ],
    )?;
    println!("Added goal '{}': {} by {}", title, target_amount, target_date);
    Ok(())
}

#[derive(Serialize)]
struct GoalRow {
    id: i64,
    title: String,
    target_amount: String,
    target_date: String,
    current_amount: String,
    description: Option<String>,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut stmt = conn.prepare(
        "SELECT id, title, target_amount, target_date, current_amount, description
         FROM asset_goals ORDER BY id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(GoalRow {
            id: r.get(0)?,
            title: r.get(1)?,
            target_amount: r.get(2)?,
            target_date: r.get(3)?,
            current_amount: r.get(4)?,
            description: r.get(5)?,
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let table_rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.title.clone(),
                    r.target_amount.clone(),
                    r.target_date.clone(),
                    r.current_amount.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Title", "Target", "By", "Current"], table_rows)
        );
    }
    Ok(())
}

fn analyze(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let id = *sub.get_one::<i64>("id").unwrap();

    let today = chrono::Utc::now().date_naive();
    let result = simulate::analyze(conn, id, today)?;

    if !maybe_print_json(json_flag, jsonl_flag, &result)? {
        let table_rows: Vec<Vec<String>> = result
            .monthly_data
            .iter()
            .map(|p| {
                vec![
                    p.date.clone(),
                    p.projected_amount.to_string(),
                    p.target_line.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Projected", "Target"], table_rows));
        println!(
            "final: {}  achievable: {}  shortfall: {}  monthly saving needed: {}",
            result.final_amount,
            result.is_achievable,
            result.shortfall,
            result.monthly_saving_needed.round_dp(0)
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let changed = conn.execute("DELETE FROM asset_goals WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(Error::not_found("asset goal", id).into());
    }
    println!("Removed asset goal {}", id);
    Ok(())
}
