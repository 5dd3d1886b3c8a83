// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use gagyebu::commands::exporter;
use gagyebu::{cli, db};
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO transactions(date, description, amount, category, type, status, note)
        VALUES ('2025-02-01 10:00:00', '급여', '3000000', '급여', 'income', 'completed', NULL);
        INSERT INTO transactions(date, description, amount, category, type, status, note)
        VALUES ('2025-01-15 19:00:00', 'BHC치킨', '23000', '외식', 'expense', 'cancelled', 'x');
        "#,
    )
    .unwrap();
    conn
}

fn run_export(conn: &Connection, fmt: &str, out: &str) {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "gagyebu",
        "export",
        "transactions",
        "--format",
        fmt,
        "--out",
        out,
    ]);
    let Some(("export", export_m)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    exporter::handle(conn, export_m).unwrap();
}

#[test]
fn csv_export_orders_by_date_and_keeps_cancelled() {
    let conn = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tx.csv");
    run_export(&conn, "csv", out.to_str().unwrap());

    let content = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "date,description,amount,category,type,status,note,source"
    );
    assert_eq!(lines.len(), 3);
    // Oldest first, cancelled rows included in the audit dump.
    assert!(lines[1].starts_with("2025-01-15 19:00:00,BHC치킨,23000,외식,expense,cancelled"));
    assert!(lines[2].starts_with("2025-02-01 10:00:00,급여,3000000,급여,income,completed"));
}

#[test]
fn json_export_is_an_array_of_objects() {
    let conn = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tx.json");
    run_export(&conn, "json", out.to_str().unwrap());

    let content = std::fs::read_to_string(&out).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["description"], "BHC치킨");
    assert_eq!(arr[1]["amount"], "3000000");
    assert_eq!(arr[1]["status"], "completed");
}
