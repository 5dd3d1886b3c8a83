// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::Error;
use crate::models::TransactionType;

const UA: &str = concat!(
    "gagyebu/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/jihoonkang/gagyebu)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Transaction timestamps accept a full datetime or a bare date (midnight).
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid datetime '{}', expected YYYY-MM-DD [HH:MM:SS]", s))?;
    Ok(d.and_hms_opt(0, 0, 0).expect("midnight is always valid"))
}

pub fn parse_month(s: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Ledger amounts are magnitudes; zero and negative values are rejected at
/// the CLI edge before any arithmetic sees them.
pub fn parse_positive_decimal(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d <= Decimal::ZERO {
        return Err(Error::InvalidInput(format!("amount '{}' must be positive", s)).into());
    }
    Ok(d)
}

static KAKAO_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?)\s*([0-9][0-9,]*)\s*원?\s*$").expect("static regex"));

/// Parse a KakaoPay amount string such as "+448,300원" or "-12,000원" into a
/// positive magnitude and a direction ('+' means income, anything else expense).
pub fn parse_kakao_amount(s: &str) -> Result<(Decimal, TransactionType)> {
    let caps = KAKAO_AMOUNT
        .captures(s)
        .ok_or_else(|| Error::InvalidInput(format!("unparseable amount '{}'", s)))?;
    let ty = if &caps[1] == "+" {
        TransactionType::Income
    } else {
        TransactionType::Expense
    };
    let digits = caps[2].replace(',', "");
    let amount = digits
        .parse::<Decimal>()
        .map_err(|_| Error::InvalidInput(format!("unparseable amount '{}'", s)))?;
    Ok((amount, ty))
}

/// Whole calendar months from `from` to `to`, floored (a partial trailing
/// month does not count).
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    use chrono::Datelike;
    let mut months =
        (to.year() as i64 - from.year() as i64) * 12 + (to.month() as i64 - from.month() as i64);
    if to.day() < from.day() {
        months -= 1;
    }
    months
}

/// "YYYY-MM" label for `date` shifted forward by `offset` months.
pub fn month_label(date: NaiveDate, offset: u32) -> String {
    use chrono::Datelike;
    let total = date.year() as i64 * 12 + (date.month() as i64 - 1) + offset as i64;
    format!("{:04}-{:02}", total / 12, total % 12 + 1)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
