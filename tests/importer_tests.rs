// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use gagyebu::commands::importer;
use gagyebu::{cli, db};
use rusqlite::Connection;
use std::io::Write;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn imports_kakaopay_rows_with_sign_and_status() {
    let conn = setup();
    // KakaoPay amount fields carry embedded commas, so the export quotes them.
    let file = write_csv(
        "날짜,사용처,금액,상태\n\
         2025-03-01 09:30:00,회사,\"+448,300원\",완료\n\
         2025-03-02 12:00:00,GS25 편의점,\"-12,000원\",완료\n\
         2025-03-03 18:00:00,BHC치킨,\"-23,000원\",취소\n",
    );

    let report = importer::import_file(&conn, file.path().to_str().unwrap()).unwrap();
    assert_eq!(report.imported, 3);
    assert!(report.errors.is_empty());

    let (amount, ty, status): (String, String, String) = conn
        .query_row(
            "SELECT amount, type, status FROM transactions WHERE description='회사'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!(amount, "448300");
    assert_eq!(ty, "income");
    assert_eq!(status, "completed");

    let (ty, status, category): (String, String, String) = conn
        .query_row(
            "SELECT type, status, category FROM transactions WHERE description='BHC치킨'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!(ty, "expense");
    assert_eq!(status, "cancelled");
    assert_eq!(category, "외식");
}

#[test]
fn bad_rows_are_collected_not_fatal() {
    let conn = setup();
    let file = write_csv(
        "날짜,사용처,금액,상태\n\
         not-a-date,어딘가,\"-1,000원\",완료\n\
         2025-03-02 12:00:00,편의점,\"-2,000원\",완료\n\
         2025-03-03 12:00:00,어딘가,없는금액,완료\n",
    );

    let report = importer::import_file(&conn, file.path().to_str().unwrap()).unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.errors[0].line, 1);
    assert_eq!(report.errors[1].line, 3);

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn rejects_unsupported_file_type() {
    let conn = setup();
    let err = importer::import_file(&conn, "transactions.xlsx").unwrap_err();
    assert!(err.to_string().contains("unsupported file type"));
}

#[test]
fn rejects_missing_required_columns() {
    let conn = setup();
    let file = write_csv("date,desc,amount\n2025-03-01,x,100\n");
    let err = importer::import_file(&conn, file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("날짜"));
}

#[test]
fn classifier_keyword_table() {
    assert_eq!(importer::classify("이마트 본점"), "식비/생필품");
    assert_eq!(importer::classify("맥도날드 강남점"), "외식");
    assert_eq!(importer::classify("국민은행 이체"), "금융");
    assert_eq!(importer::classify("현대오일뱅크 주유"), "교통");
    assert_eq!(importer::classify("Steam Games"), "엔터테인먼트");
    assert_eq!(importer::classify("카카오 저금통"), "저축");
    assert_eq!(importer::classify("삼성전자 주식"), "투자");
    assert_eq!(importer::classify("알 수 없는 곳"), "기타");
}

#[test]
fn import_via_cli_trims_path() {
    let conn = setup();
    let file = write_csv(
        "날짜,사용처,금액,상태\n2025-03-02 12:00:00,편의점,\"-2,000원\",완료\n",
    );
    let padded = format!("  {}  ", file.path().to_str().unwrap());

    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["gagyebu", "import", "kakaopay", "--path", &padded]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(&conn, import_m).unwrap();
    } else {
        panic!("no import subcommand");
    }

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}
