// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use crate::utils::{maybe_print_json, parse_positive_decimal, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let year = *sub.get_one::<i32>("year").unwrap();
    let month = *sub.get_one::<u32>("month").unwrap();
    let category = sub.get_one::<String>("category").unwrap();
    let amount = parse_positive_decimal(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").map(|s| s.to_string());

    conn.execute(
        "INSERT INTO budget_plans(year, month, category, planned_amount, description)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(year, month, category) DO UPDATE SET
             planned_amount=excluded.planned_amount,
             description=excluded.description",
        params![year, month, category, amount.to_string(), description],
    )?;
    println!("Plan set for {:04}-{:02} / {} = {}", year, month, category, amount);
    Ok(())
}

#[derive(Serialize)]
struct PlanRow {
    id: i64,
    year: i32,
    month: u32,
    category: String,
    planned_amount: String,
    description: Option<String>,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let mut sql = String::from(
        "SELECT id, year, month, category, planned_amount, description FROM budget_plans WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(year) = sub.get_one::<i32>("year") {
        sql.push_str(" AND year=?");
        params_vec.push(year.to_string());
    }
    if let Some(month) = sub.get_one::<u32>("month") {
        sql.push_str(" AND month=?");
        params_vec.push(month.to_string());
    }
    sql.push_str(" ORDER BY year DESC, month DESC, category");

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(PlanRow {
            id: r.get(0)?,
            year: r.get(1)?,
            month: r.get(2)?,
            category: r.get(3)?,
            planned_amount: r.get(4)?,
            description: r.get(5)?,
        });
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let table_rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    format!("{:04}-{:02}", r.year, r.month),
                    r.category.clone(),
                    r.planned_amount.clone(),
                    r.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Month", "Category", "Planned", "Description"], table_rows)
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let changed = conn.execute("DELETE FROM budget_plans WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(Error::not_found("budget plan", id).into());
    }
    println!("Removed budget plan {}", id);
    Ok(())
}
