// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use crate::models::{Frequency, TransactionType};
use crate::utils::{maybe_print_json, parse_date, parse_positive_decimal, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let description = sub.get_one::<String>("description").unwrap();
    let amount = parse_positive_decimal(sub.get_one::<String>("amount").unwrap())?;
    let ty: TransactionType = sub.get_one::<String>("type").unwrap().parse()?;
    let frequency: Frequency = sub.get_one::<String>("frequency").unwrap().parse()?;
    let day = sub.get_one::<u32>("day").copied();
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let end = sub
        .get_one::<String>("end")
        .map(|s| parse_date(s))
        .transpose()?;
    let category = sub.get_one::<String>("category").map(|s| s.to_string());

    conn.execute(
        "INSERT INTO regular_transactions(description, amount, category, type, frequency, day_of_month, start_date, end_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            description,
            amount.to_string(),
            category,
            ty.as_str(),
            frequency.as_str(),
            day,
            start.to_string(),
            end.map(|d| d.to_string())
        ],
    )?;
    println!("Added regular {} {} '{}'", frequency.as_str(), amount, description);
    Ok(())
}

#[derive(Serialize)]
struct RegularRow {
    id: i64,
    description: String,
    amount: String,
    r#type: String,
    frequency: String,
    day_of_month: Option<u32>,
    start_date: String,
    end_date: Option<String>,
    category: Option<String>,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut stmt = conn.prepare(
        "SELECT id, description, amount, type, frequency, day_of_month, start_date, end_date, category
         FROM regular_transactions ORDER BY id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(RegularRow {
            id: r.get(0)?,
            description: r.get(1)?,
            amount: r.get(2)?,
            r#type: r.get(3)?,
            frequency: r.get(4)?,
            day_of_month: r.get(5)?,
            start_date: r.get(6)?,
            end_date: r.get(7)?,
            category: r.get(8)?,
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
                    r.description.clone(),
                    r.amount.clone(),
                    r.r#type.clone(),
                    r.frequency.clone(),
                    r.day_of_month.map(|d| d.to_string()).unwrap_or_default(),
                    r.start_date.clone(),
                    r.end_date.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Description", "Amount", "Type", "Frequency", "Day", "Start", "End"],
                table_rows,
            )
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let changed = conn.execute("DELETE FROM regular_transactions WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(Error::not_found("regular transaction", id).into());
    }
    println!("Removed regular transaction {}", id);
    Ok(())
}
