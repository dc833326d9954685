// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Local, NaiveDate};
use fintrack::models::PostingRequest;
use fintrack::{db, posting, store, LedgerError};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn post(conn: &mut Connection, kind: &str, amount: &str, source: &str, date: NaiveDate) {
    posting::post_transaction(
        conn,
        &PostingRequest {
            amount: amount.into(),
            category_type: kind.into(),
            category_name: "Misc".into(),
            description: None,
            source_name: source.into(),
            transaction_date: date.to_string(),
        },
    )
    .unwrap();
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn month_totals_ignore_prior_months() {
    let mut conn = db::open_in_memory().unwrap();
    posting::add_source(&mut conn, "Cash", "0").unwrap();
    post(&mut conn, "income", "500", "Cash", d(2024, 1, 31));
    post(&mut conn, "income", "200", "Cash", d(2024, 2, 1));
    post(&mut conn, "expense", "75.25", "Cash", d(2024, 2, 14));
    post(&mut conn, "expense", "10", "Cash", d(2024, 1, 15));

    let s = store::compute_summary_for(&conn, d(2024, 2, 20)).unwrap();
    assert_eq!(s.total_balance, Decimal::new(61475, 2));
    assert_eq!(s.month_income, Decimal::from(200));
    assert_eq!(s.month_expense, Decimal::new(7525, 2));

    // Prior-month rows still show up in the listing.
    assert_eq!(store::list_transactions(&conn).unwrap().len(), 4);
}

#[test]
fn current_month_uses_local_clock() {
    let mut conn = db::open_in_memory().unwrap();
    posting::add_source(&mut conn, "Cash", "100").unwrap();
    let today = Local::now().date_naive();
    let last_month = today.with_day(1).unwrap().pred_opt().unwrap();
    post(&mut conn, "income", "40", "Cash", today);
    post(&mut conn, "expense", "15", "Cash", today);
    post(&mut conn, "income", "999", "Cash", last_month);

    let s = store::compute_summary(&conn).unwrap();
    assert_eq!(s.month_income, Decimal::from(40));
    assert_eq!(s.month_expense, Decimal::from(15));
    assert_eq!(s.total_balance, Decimal::from(1124));
}

#[test]
fn total_balance_counts_active_sources_only() {
    let mut conn = db::open_in_memory().unwrap();
    posting::add_source(&mut conn, "Cash", "100").unwrap();
    posting::add_source(&mut conn, "Old", "40").unwrap();
    post(&mut conn, "income", "5", "Old", d(2024, 2, 2));
    posting::deactivate_sources(&mut conn, &["Old".to_string()]).unwrap();

    let s = store::compute_summary_for(&conn, d(2024, 2, 20)).unwrap();
    // Total covers active sources only; the deactivated source's history
    // still feeds the month totals.
    assert_eq!(s.total_balance, Decimal::from(100));
    assert_eq!(s.month_income, Decimal::from(5));
}

#[test]
fn empty_ledger_summarises_to_zero() {
    let conn = db::open_in_memory().unwrap();
    let s = store::compute_summary(&conn).unwrap();
    assert!(s.total_balance.is_zero());
    assert!(s.month_income.is_zero());
    assert!(s.month_expense.is_zero());
}

#[test]
fn listing_is_most_recent_first_and_display_cased() {
    let mut conn = db::open_in_memory().unwrap();
    posting::add_source(&mut conn, "Cash", "50").unwrap();
    post(&mut conn, "income", "1", "Cash", d(2024, 1, 5));
    post(&mut conn, "expense", "2", "Cash", d(2024, 3, 1));
    post(&mut conn, "income", "3", "Cash", d(2024, 1, 5));

    let rows = store::list_transactions(&conn).unwrap();
    let amounts: Vec<String> = rows.iter().map(|r| r.amount.to_string()).collect();
    assert_eq!(amounts, ["2", "3", "1"]);
    assert_eq!(rows[0].category_type, "EXPENSE");
    assert_eq!(rows[1].category_type, "INCOME");
    assert!(rows.iter().all(|r| r.source_name == "CASH"));

    let recent = store::list_recent_transactions(&conn, 2).unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, rows[0].id);
}

#[test]
fn dashboard_is_one_consistent_snapshot() {
    let mut conn = db::open_in_memory().unwrap();
    posting::add_source(&mut conn, "Cash", "10").unwrap();
    posting::add_source(&mut conn, "Bank", "20").unwrap();
    posting::add_source(&mut conn, "Old", "5").unwrap();
    posting::deactivate_sources(&mut conn, &["Old".to_string()]).unwrap();
    for day in 1..=7 {
        post(&mut conn, "income", "1", "Cash", d(2024, 1, day));
    }

    let board = posting::dashboard(&mut conn, Some(5)).unwrap();
    assert_eq!(board.recent.len(), 5);
    assert_eq!(board.recent[0].transaction_date, d(2024, 1, 7));
    assert_eq!(board.available_sources, ["Bank", "Cash"]);
    assert_eq!(board.sources.len(), 2);
    assert_eq!(board.summary.total_balance, Decimal::from(37));

    let all = posting::dashboard(&mut conn, None).unwrap();
    assert_eq!(all.recent.len(), 7);
}

#[test]
fn oversized_totals_are_reported_not_summed() {
    let mut conn = db::open_in_memory().unwrap();
    posting::add_source(&mut conn, "A", "1").unwrap();
    posting::add_source(&mut conn, "B", "1").unwrap();
    conn.execute(
        "UPDATE accounts SET balance='79228162514264337593543950335'",
        [],
    )
    .unwrap();

    let err = store::compute_summary_for(&conn, d(2024, 2, 10)).unwrap_err();
    assert!(matches!(err, LedgerError::Overflow(ref what) if what == "Total balance"));
    assert!(matches!(
        posting::dashboard(&mut conn, Some(5)),
        Err(LedgerError::Overflow(_))
    ));
}

#[test]
fn oversized_month_income_is_reported() {
    let mut conn = db::open_in_memory().unwrap();
    posting::add_source(&mut conn, "Cash", "0").unwrap();
    post(&mut conn, "income", "1", "Cash", d(2024, 2, 1));
    post(&mut conn, "income", "1", "Cash", d(2024, 2, 2));
    conn.execute(
        "UPDATE transactions SET amount='79228162514264337593543950335'",
        [],
    )
    .unwrap();

    let err = store::compute_summary_for(&conn, d(2024, 2, 10)).unwrap_err();
    assert!(matches!(err, LedgerError::Overflow(ref what) if what == "Month income"));
}
