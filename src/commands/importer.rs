// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! KakaoPay CSV import. Every row is parsed to its own `Result`; failures
//! are collected into the report instead of aborting the batch, so partial
//! success is the normal outcome for messy exports.

use crate::error::Error;
use crate::models::{TransactionStatus, TransactionType};
use crate::utils::parse_kakao_amount;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection};
use serde::Serialize;

/// Keyword-to-category rule table applied to the lowercased description.
/// First match wins; unmatched descriptions fall through to 기타.
static CATEGORY_RULES: Lazy<Vec<(&[&str], &str)>> = Lazy::new(|| {
    vec![
        (&["마트", "편의점", "스팟"][..], "식비/생필품"),
        (&["치킨", "맥도날드", "bhc", "음식"][..], "외식"),
        (&["카드", "은행", "이자"][..], "금융"),
        (&["주유", "석유", "도로공사"][..], "교통"),
        (&["steam", "게임", "game"][..], "엔터테인먼트"),
        (&["저금통", "모으기"][..], "저축"),
        (&["주식", "삼성", "현대", "브로드컴"][..], "투자"),
    ]
});

const FALLBACK_CATEGORY: &str = "기타";
const IMPORT_NOTE: &str = "Imported from KakaoPay CSV";

pub fn classify(description: &str) -> &'static str {
    let lower = description.to_lowercase();
    for &(keywords, category) in CATEGORY_RULES.iter() {
        if keywords.iter().any(|k| lower.contains(*k)) {
            return category;
        }
    }
    FALLBACK_CATEGORY
}

#[derive(Debug, Serialize)]
pub struct RowError {
    /// 1-based data row number (header excluded).
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub errors: Vec<RowError>,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("kakaopay", sub)) => {
            let path = sub.get_one::<String>("path").unwrap().trim();
            let report = import_file(conn, path)?;
            println!("Imported {} transactions from {}", report.imported, path);
            for e in &report.errors {
                eprintln!("row {}: {}", e.line, e.reason);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

pub fn import_file(conn: &Connection, path: &str) -> Result<ImportReport> {
    if !path.to_lowercase().ends_with(".csv") {
        return Err(Error::InvalidInput(format!(
            "unsupported file type '{}', only .csv is supported",
            path
        ))
        .into());
    }

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let headers = rdr.headers()?.clone();
    let col = |name: &str| headers.iter().position(|h| h.trim() == name);
    let date_col = col("날짜")
        .ok_or_else(|| Error::InvalidInput("missing required column '날짜'".into()))?;
    let desc_col = col("사용처")
        .ok_or_else(|| Error::InvalidInput("missing required column '사용처'".into()))?;
    let amount_col = col("금액")
        .ok_or_else(|| Error::InvalidInput("missing required column '금액'".into()))?;
    let status_col = col("상태");

    let mut report = ImportReport {
        imported: 0,
        errors: Vec::new(),
    };

    for (idx, result) in rdr.records().enumerate() {
        let line = idx + 1;
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                report.errors.push(RowError {
                    line,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        match import_record(conn, &rec, date_col, desc_col, amount_col, status_col) {
            Ok(()) => report.imported += 1,
            Err(e) => report.errors.push(RowError {
                line,
                reason: e.to_string(),
            }),
        }
    }
    Ok(report)
}

fn import_record(
    conn: &Connection,
    rec: &csv::StringRecord,
    date_col: usize,
    desc_col: usize,
    amount_col: usize,
    status_col: Option<usize>,
) -> Result<()> {
    let date_raw = rec
        .get(date_col)
        .ok_or_else(|| Error::InvalidInput("date cell missing".into()))?
        .trim();
    let date = NaiveDateTime::parse_from_str(date_raw, "%Y-%m-%d %H:%M:%S")
        .map_err(|_| Error::InvalidInput(format!("malformed date '{}'", date_raw)))?;

    let description = rec
        .get(desc_col)
        .ok_or_else(|| Error::InvalidInput("description cell missing".into()))?
        .trim()
        .to_string();

    let amount_raw = rec
        .get(amount_col)
        .ok_or_else(|| Error::InvalidInput("amount cell missing".into()))?;
    let (amount, ty) = parse_kakao_amount(amount_raw)?;

    let status = match status_col.and_then(|i| rec.get(i)).map(str::trim) {
        Some("취소") => TransactionStatus::Cancelled,
        _ => TransactionStatus::Completed,
    };

    let category = classify(&description);

    conn.execute(
        "INSERT INTO transactions(date, description, amount, category, type, status, note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            date.format("%Y-%m-%d %H:%M:%S").to_string(),
            description,
            amount.to_string(),
            category,
            match ty {
                TransactionType::Income => "income",
                TransactionType::Expense => "expense",
            },
            status.as_str(),
            IMPORT_NOTE
        ],
    )?;
    Ok(())
}
