// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Open-banking transaction sync. The upstream API contract is only
//! sketched here: no OAuth flow is implemented and the default base URL is
//! a placeholder, so every call fails fast with `NotConfigured` until real
//! credentials are supplied via the environment.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::utils::http_client;

pub const API_KEY_ENV: &str = "GAGYEBU_BANK_API_KEY";
pub const BASE_URL_ENV: &str = "GAGYEBU_BANK_API_URL";
const DEFAULT_BASE_URL: &str = "https://api.example.com";

/// Category stamped on synced rows until real classification exists.
const SYNC_CATEGORY: &str = "자동수집";

#[derive(Debug, Clone)]
pub struct BankClient {
    api_key: String,
    base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BankTransaction {
    /// "YYYYMMDD"
    pub tran_date: String,
    /// "1" deposit, "2" withdrawal; anything else is skipped.
    pub tran_type: String,
    pub tran_amt: String,
    #[serde(default)]
    pub print_content: String,
    #[serde(default)]
    pub branch_name: String,
}

#[derive(Debug, Deserialize)]
struct TransactionListResponse {
    #[serde(default)]
    res_list: Vec<BankTransaction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub added: usize,
    pub skipped: usize,
    pub total_fetched: usize,
    pub errors: Vec<String>,
}

impl BankClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        BankClient {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Self {
        BankClient::new(
            std::env::var(API_KEY_ENV).unwrap_or_default(),
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        )
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch raw transactions for one registered account. No retries, no
    /// backoff; the first failure propagates.
    pub fn fetch_transactions(
        &self,
        account_id: &str,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Vec<BankTransaction>> {
        if !self.is_configured() {
            return Err(Error::NotConfigured(format!("set {} to enable sync", API_KEY_ENV)).into());
        }
        let endpoint = format!("{}/v2.0/account/transaction_list/fin_num", self.base_url);
        let bank_tran_id = format!("T{}", Utc::now().format("%Y%m%d%H%M%S"));
        let from_s = from_date.format("%Y%m%d").to_string();
        let to_s = to_date.format("%Y%m%d").to_string();
        let client = http_client()?;
        let resp = client
            .get(&endpoint)
            .bearer_auth(&self.api_key)
            .query(&[
                ("bank_tran_id", bank_tran_id.as_str()),
                ("fintech_use_num", account_id),
                ("inquiry_type", "A"),
                ("from_date", from_s.as_str()),
                ("to_date", to_s.as_str()),
                ("sort_order", "D"),
            ])
            .send()
            .map_err(|e| Error::ExternalService(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Error::ExternalService(format!("HTTP {}", resp.status())).into());
        }
        let body: TransactionListResponse = resp
            .json()
            .map_err(|e| Error::ExternalService(format!("bad response body: {}", e)))?;
        Ok(body.res_list)
    }
}

/// Insert fetched rows into the ledger, skipping duplicates (same date,
/// amount, and description). Row-level failures are collected into the
/// report, never aborting the batch.
pub fn apply_rows(conn: &Connection, rows: &[BankTransaction]) -> Result<SyncReport> {
    let mut report = SyncReport {
        added: 0,
        skipped: 0,
        total_fetched: rows.len(),
        errors: Vec::new(),
    };

    for row in rows {
        let ty = match row.tran_type.as_str() {
            "1" => "income",
            "2" => "expense",
            _ => continue,
        };
        match apply_row(conn, row, ty) {
            Ok(true) => report.added += 1,
            Ok(false) => report.skipped += 1,
            Err(e) => report.errors.push(format!("row {}: {}", row.tran_date, e)),
        }
    }
    Ok(report)
}

fn apply_row(conn: &Connection, row: &BankTransaction, ty: &str) -> Result<bool> {
    let date = NaiveDate::parse_from_str(&row.tran_date, "%Y%m%d")
        .map_err(|_| Error::InvalidInput(format!("bad tran_date '{}'", row.tran_date)))?;
    let amount = row
        .tran_amt
        .parse::<Decimal>()
        .map_err(|_| Error::InvalidInput(format!("bad tran_amt '{}'", row.tran_amt)))?;
    let date_s = format!("{} 00:00:00", date);

    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM transactions WHERE date=?1 AND amount=?2 AND description=?3",
            rusqlite::params![date_s, amount.to_string(), row.print_content],
            |r| r.get(0),
        )
        .optional()?;
    if existing.is_some() {
        return Ok(false);
    }

    let source = if row.branch_name.is_empty() {
        "은행"
    } else {
        row.branch_name.as_str()
    };
    conn.execute(
        "INSERT INTO transactions(date, description, amount, category, type, status, source)
         VALUES (?1, ?2, ?3, ?4, ?5, 'completed', ?6)",
        rusqlite::params![
            date_s,
            row.print_content,
            amount.to_string(),
            SYNC_CATEGORY,
            ty,
            source
        ],
    )?;
    Ok(true)
}
