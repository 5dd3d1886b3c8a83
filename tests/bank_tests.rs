// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use gagyebu::bank::{self, BankClient, BankTransaction};
use gagyebu::db;
use gagyebu::error::Error;
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn row(date: &str, ty: &str, amt: &str, desc: &str) -> BankTransaction {
    BankTransaction {
        tran_date: date.to_string(),
        tran_type: ty.to_string(),
        tran_amt: amt.to_string(),
        print_content: desc.to_string(),
        branch_name: "테스트지점".to_string(),
    }
}

#[test]
fn unconfigured_client_fails_fast() {
    let client = BankClient::new("", "https://api.example.com");
    assert!(!client.is_configured());
    let err = client
        .fetch_transactions("1234", "2025-01-01".parse().unwrap(), "2025-01-31".parse().unwrap())
        .unwrap_err();
    match err.downcast_ref::<Error>() {
        Some(Error::NotConfigured(_)) => {}
        other => panic!("expected NotConfigured, got {:?}", other),
    }
}

#[test]
fn apply_rows_inserts_and_maps_types() {
    let conn = setup();
    let rows = vec![
        row("20250310", "1", "500000", "월급"),
        row("20250311", "2", "8000", "편의점"),
    ];
    let report = bank::apply_rows(&conn, &rows).unwrap();
    assert_eq!(report.added, 2);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.total_fetched, 2);
    assert!(report.errors.is_empty());

    let (ty, source, category): (String, String, String) = conn
        .query_row(
            "SELECT type, source, category FROM transactions WHERE description='월급'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!(ty, "income");
    assert_eq!(source, "테스트지점");
    assert_eq!(category, "자동수집");
}

#[test]
fn apply_rows_skips_duplicates() {
    let conn = setup();
    let rows = vec![row("20250310", "2", "8000", "편의점")];
    bank::apply_rows(&conn, &rows).unwrap();
    let report = bank::apply_rows(&conn, &rows).unwrap();
    assert_eq!(report.added, 0);
    assert_eq!(report.skipped, 1);
}

#[test]
fn apply_rows_collects_row_errors_and_ignores_unknown_types() {
    let conn = setup();
    let rows = vec![
        row("not-a-date", "1", "100", "bad"),
        row("20250310", "9", "100", "neither deposit nor withdrawal"),
        row("20250311", "2", "100", "ok"),
    ];
    let report = bank::apply_rows(&conn, &rows).unwrap();
    assert_eq!(report.added, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("not-a-date"));
    assert_eq!(report.total_fetched, 3);
}
