// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::bank::{self, BankClient};
use anyhow::Result;
use chrono::{Duration, Utc};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("status", _)) => {
            let client = BankClient::from_env();
            println!(
                "configured: {}\napi_url: {}",
                client.is_configured(),
                client.base_url()
            );
            Ok(())
        }
        Some(("bank", sub)) => sync_bank(conn, sub),
        _ => Ok(()),
    }
}

fn sync_bank(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let account = sub.get_one::<String>("account").unwrap();
    let days: i64 = *sub.get_one::<i64>("days").unwrap_or(&30);

    let client = BankClient::from_env();
    let to = Utc::now().date_naive();
    let from = to - Duration::days(days);

    let rows = client.fetch_transactions(account, from, to)?;
    let report = bank::apply_rows(conn, &rows)?;

    println!(
        "Synced {}: added {}, skipped {} of {} fetched",
        account, report.added, report.skipped, report.total_fetched
    );
    for e in &report.errors {
        eprintln!("{}", e);
    }
    Ok(())
}
