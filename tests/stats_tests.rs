// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use gagyebu::models::TransactionType;
use gagyebu::{cli, db, stats};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn insert_tx(
    conn: &Connection,
    date: &str,
    amount: &str,
    category: Option<&str>,
    ty: &str,
    status: &str,
) {
    conn.execute(
        "INSERT INTO transactions(date, description, amount, category, type, status)
         VALUES (?1, 'fixture', ?2, ?3, ?4, ?5)",
        params![format!("{} 12:00:00", date), amount, category, ty, status],
    )
    .unwrap();
}

#[test]
fn monthly_summary_counts_completed_only() {
    let conn = setup();
    insert_tx(&conn, "2025-03-01", "3000000", Some("급여"), "income", "completed");
    insert_tx(&conn, "2025-03-10", "50000", Some("외식"), "expense", "completed");
    insert_tx(&conn, "2025-03-15", "999999", Some("외식"), "expense", "cancelled");
    insert_tx(&conn, "2025-04-01", "70000", Some("외식"), "expense", "completed");

    let s = stats::monthly_summary(&conn, 2025, 3).unwrap();
    assert_eq!(s.total_income, Decimal::from(3_000_000));
    assert_eq!(s.total_expense, Decimal::from(50_000));
    assert_eq!(s.net_amount, Decimal::from(2_950_000));
    assert_eq!(s.transaction_count, 2);
}

#[test]
fn monthly_summary_empty_month_is_all_zero() {
    let conn = setup();
    let s = stats::monthly_summary(&conn, 2025, 1).unwrap();
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.total_expense, Decimal::ZERO);
    assert_eq!(s.net_amount, Decimal::ZERO);
    assert_eq!(s.transaction_count, 0);
}

#[test]
fn category_breakdown_percentages_sum_to_hundred() {
    let conn = setup();
    insert_tx(&conn, "2025-03-02", "30000", Some("외식"), "expense", "completed");
    insert_tx(&conn, "2025-03-05", "50000", Some("교통"), "expense", "completed");
    insert_tx(&conn, "2025-03-08", "20000", Some("외식"), "expense", "completed");

    let data = stats::category_breakdown(&conn, 2025, 3, TransactionType::Expense).unwrap();
    assert_eq!(data.len(), 2);
    // Descending by total: 교통 50000, 외식 50000 -> tie broken by name.
    let total_pct: f64 = data.iter().map(|c| c.percentage).sum();
    assert!((total_pct - 100.0).abs() < 1e-9);

    let dining = data.iter().find(|c| c.category == "외식").unwrap();
    assert_eq!(dining.total_amount, Decimal::from(50_000));
    assert_eq!(dining.transaction_count, 2);
    assert!((dining.percentage - 50.0).abs() < 1e-9);
}

#[test]
fn category_breakdown_excludes_cancelled_other_type_and_uncategorized() {
    let conn = setup();
    insert_tx(&conn, "2025-03-02", "10000", Some("외식"), "expense", "completed");
    insert_tx(&conn, "2025-03-03", "10000", Some("외식"), "expense", "cancelled");
    insert_tx(&conn, "2025-03-04", "10000", Some("급여"), "income", "completed");
    insert_tx(&conn, "2025-03-05", "10000", None, "expense", "completed");

    let data = stats::category_breakdown(&conn, 2025, 3, TransactionType::Expense).unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].category, "외식");
    assert_eq!(data[0].total_amount, Decimal::from(10_000));
}

#[test]
fn category_breakdown_empty_month_is_empty_list() {
    let conn = setup();
    let data = stats::category_breakdown(&conn, 2030, 12, TransactionType::Income).unwrap();
    assert!(data.is_empty());
}

#[test]
fn category_breakdown_zero_total_gives_zero_percentages() {
    let conn = setup();
    insert_tx(&conn, "2025-03-02", "0", Some("외식"), "expense", "completed");
    insert_tx(&conn, "2025-03-03", "0", Some("교통"), "expense", "completed");

    let data = stats::category_breakdown(&conn, 2025, 3, TransactionType::Expense).unwrap();
    assert_eq!(data.len(), 2);
    for c in &data {
        assert_eq!(c.percentage, 0.0);
    }
}

#[test]
fn monthly_trend_is_newest_first_with_exact_net() {
    let conn = setup();
    insert_tx(&conn, "2025-01-05", "100", Some("급여"), "income", "completed");
    insert_tx(&conn, "2025-02-05", "200", Some("급여"), "income", "completed");
    insert_tx(&conn, "2025-02-20", "80", Some("외식"), "expense", "completed");
    insert_tx(&conn, "2025-03-05", "300", Some("급여"), "income", "completed");

    let data = stats::monthly_trend(&conn, 12).unwrap();
    let months: Vec<&str> = data.iter().map(|p| p.month.as_str()).collect();
    assert_eq!(months, vec!["2025-03", "2025-02", "2025-01"]);
    for p in &data {
        assert!(p.income >= Decimal::ZERO && p.expense >= Decimal::ZERO);
        assert_eq!(p.net, p.income - p.expense);
    }
    assert_eq!(data[1].income, Decimal::from(200));
    assert_eq!(data[1].expense, Decimal::from(80));
    assert_eq!(data[1].net, Decimal::from(120));
}

#[test]
fn monthly_trend_truncates_to_window() {
    let conn = setup();
    for m in 1..=6 {
        insert_tx(
            &conn,
            &format!("2025-{:02}-01", m),
            "10",
            None,
            "income",
            "completed",
        );
    }
    let data = stats::monthly_trend(&conn, 2).unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0].month, "2025-06");
    assert_eq!(data[1].month, "2025-05");
}

#[test]
fn monthly_trend_includes_cancelled_rows() {
    // The trend path deliberately does not filter by status; see DESIGN.md.
    let conn = setup();
    insert_tx(&conn, "2025-05-01", "100", None, "income", "cancelled");

    let data = stats::monthly_trend(&conn, 12).unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].income, Decimal::from(100));

    let s = stats::monthly_summary(&conn, 2025, 5).unwrap();
    assert_eq!(s.total_income, Decimal::ZERO);
}

#[test]
fn trend_months_out_of_range_is_rejected_by_the_cli() {
    let cli = cli::build_cli();
    assert!(cli
        .try_get_matches_from(["gagyebu", "report", "trend", "--months", "61"])
        .is_err());
    let cli = cli::build_cli();
    assert!(cli
        .try_get_matches_from(["gagyebu", "report", "trend", "--months", "0"])
        .is_err());
}

#[test]
fn category_summary_spans_date_range() {
    let conn = setup();
    insert_tx(&conn, "2025-01-15", "100", Some("외식"), "expense", "completed");
    insert_tx(&conn, "2025-02-15", "200", Some("외식"), "expense", "completed");
    insert_tx(&conn, "2025-03-15", "400", Some("외식"), "expense", "completed");

    let from = "2025-02-01".parse().unwrap();
    let to = "2025-03-31".parse().unwrap();
    let data = stats::category_summary(
        &conn,
        Some(TransactionType::Expense),
        Some(from),
        Some(to),
    )
    .unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].total_amount, Decimal::from(600));
    assert_eq!(data[0].transaction_count, 2);
}

#[test]
fn range_summary_counts_all_statuses() {
    let conn = setup();
    insert_tx(&conn, "2025-01-15", "100", None, "income", "completed");
    insert_tx(&conn, "2025-01-16", "40", None, "expense", "cancelled");

    let s = stats::range_summary(&conn, None, None).unwrap();
    assert_eq!(s.total_income, Decimal::from(100));
    assert_eq!(s.total_expense, Decimal::from(40));
    assert_eq!(s.net_amount, Decimal::from(60));
    assert_eq!(s.transaction_count, 2);
}
