// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use crate::models::TransactionType;
use crate::utils::{maybe_print_json, parse_datetime, parse_month, parse_positive_decimal, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("cancel", sub)) => cancel(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_datetime(sub.get_one::<String>("date").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap();
    let amount = parse_positive_decimal(sub.get_one::<String>("amount").unwrap())?;
    let ty: TransactionType = sub.get_one::<String>("type").unwrap().parse()?;
    let category = sub.get_one::<String>("category").map(|s| s.to_string());
    let note = sub.get_one::<String>("note").map(|s| s.to_string());
    let source = sub.get_one::<String>("source").map(|s| s.to_string());

    conn.execute(
        "INSERT INTO transactions(date, description, amount, category, type, status, note, source)
         VALUES (?1, ?2, ?3, ?4, ?5, 'completed', ?6, ?7)",
        params![
            date.format("%Y-%m-%d %H:%M:%S").to_string(),
            description,
            amount.to_string(),
            category,
            ty.as_str(),
            note,
            source
        ],
    )?;
    println!("Recorded {} {} '{}' on {}", ty, amount, description, date.date());
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.r#type.clone(),
                    r.status.clone(),
                    r.category.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Amount", "Type", "Status", "Category", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub r#type: String,
    pub status: String,
    pub category: String,
    pub note: String,
    pub source: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT id, date, description, amount, type, status, category, note, source
         FROM transactions WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(parse_month(month)?);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND category=?");
        params_vec.push(cat.into());
    }
    if let Some(ty) = sub.get_one::<String>("type") {
        sql.push_str(" AND type=?");
        params_vec.push(ty.into());
    }
    if let Some(status) = sub.get_one::<String>("status") {
        sql.push_str(" AND status=?");
        params_vec.push(status.into());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(&format!(" LIMIT {}", limit));
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let category: Option<String> = r.get(6)?;
        let note: Option<String> = r.get(7)?;
        let source: Option<String> = r.get(8)?;
        data.push(TransactionRow {
            id: r.get(0)?,
            date: r.get(1)?,
            description: r.get(2)?,
            amount: r.get(3)?,
            r#type: r.get(4)?,
            status: r.get(5)?,
            category: category.unwrap_or_default(),
            note: note.unwrap_or_default(),
            source: source.unwrap_or_default(),
        });
    }
    Ok(data)
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut sets: Vec<&str> = Vec::new();
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(d) = sub.get_one::<String>("description") {
        sets.push("description=?");
        params_vec.push(d.into());
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        sets.push("amount=?");
        params_vec.push(parse_positive_decimal(a)?.to_string());
    }
    if let Some(c) = sub.get_one::<String>("category") {
        sets.push("category=?");
        params_vec.push(c.into());
    }
    if let Some(n) = sub.get_one::<String>("note") {
        sets.push("note=?");
        params_vec.push(n.into());
    }
    if sets.is_empty() {
        println!("Nothing to update");
        return Ok(());
    }

    let sql = format!("UPDATE transactions SET {} WHERE id=?", sets.join(", "));
    params_vec.push(id.to_string());
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let changed = conn.execute(&sql, rusqlite::params_from_iter(params))?;
    if changed == 0 {
        return Err(Error::not_found("transaction", id).into());
    }
    println!("Updated transaction {}", id);
    Ok(())
}

fn cancel(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let changed = conn.execute(
        "UPDATE transactions SET status='cancelled' WHERE id=?1",
        params![id],
    )?;
    if changed == 0 {
        return Err(Error::not_found("transaction", id).into());
    }
    println!("Cancelled transaction {}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let changed = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(Error::not_found("transaction", id).into());
    }
    println!("Removed transaction {}", id);
    Ok(())
}
