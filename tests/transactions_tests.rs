// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use gagyebu::commands::transactions;
use gagyebu::{cli, db};
use rusqlite::{params, Connection};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    for i in 1..=3 {
        conn.execute(
            "INSERT INTO transactions(date, description, amount, type, status)
             VALUES (?1, 'P', '10000', 'expense', 'completed')",
            params![format!("2025-01-0{} 10:00:00", i)],
        )
        .unwrap();
    }
    conn
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let cli = cli::build_cli();
    let mut full = vec!["gagyebu", "tx", "list"];
    full.extend_from_slice(args);
    let matches = cli.get_matches_from(full);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_limit_respected_newest_first() {
    let conn = setup();
    let rows = transactions::query_rows(&conn, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03 10:00:00");
}

#[test]
fn list_filters_by_status() {
    let conn = setup();
    conn.execute("UPDATE transactions SET status='cancelled' WHERE id=2", [])
        .unwrap();
    let rows = transactions::query_rows(&conn, &list_matches(&["--status", "cancelled"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 2);
}

#[test]
fn list_filters_by_month_and_type() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(date, description, amount, type, status)
         VALUES ('2025-02-01 10:00:00', 'salary', '3000000', 'income', 'completed')",
        [],
    )
    .unwrap();
    let rows =
        transactions::query_rows(&conn, &list_matches(&["--month", "2025-01", "--type", "expense"]))
            .unwrap();
    assert_eq!(rows.len(), 3);

    let rows = transactions::query_rows(&conn, &list_matches(&["--type", "income"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "salary");
}

#[test]
fn list_rejects_malformed_month() {
    let conn = setup();
    let err = transactions::query_rows(&conn, &list_matches(&["--month", "garbage"])).unwrap_err();
    assert!(err.to_string().contains("Invalid month"));

    let err = transactions::query_rows(&conn, &list_matches(&["--month", "2025-13"])).unwrap_err();
    assert!(err.to_string().contains("Invalid month"));
}

#[test]
fn cancel_keeps_row_but_flips_status() {
    let conn = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["gagyebu", "tx", "cancel", "1"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(&conn, tx_m).unwrap();
    } else {
        panic!("no tx subcommand");
    }

    let status: String = conn
        .query_row("SELECT status FROM transactions WHERE id=1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(status, "cancelled");
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 3);
}

#[test]
fn cancel_missing_id_errors() {
    let conn = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["gagyebu", "tx", "cancel", "99"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let err = transactions::handle(&conn, tx_m).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn add_rejects_non_positive_amount() {
    let conn = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "gagyebu", "tx", "add", "--date", "2025-01-05", "--description", "bad",
        "--amount=-100", "--type", "expense",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let err = transactions::handle(&conn, tx_m).unwrap_err();
    assert!(err.to_string().contains("must be positive"));
}
