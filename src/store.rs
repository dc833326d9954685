// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger store: primitive reads and writes over `accounts` and `transactions`.
//!
//! Every function takes a plain `&Connection`. A `rusqlite::Transaction`
//! derefs to one, so the posting engine composes these inside its own unit of
//! work while read-only callers use them directly.

use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{LedgerError, Result};
use crate::models::{
    Account, AccountStatus, CategoryType, SourceOutcome, Summary, Transaction, TransactionInfo,
};

fn conversion_failure<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn decimal_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    raw.parse::<Decimal>()
        .map_err(|e| conversion_failure(idx, e))
}

fn uuid_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw).map_err(|e| conversion_failure(idx, e))
}

fn category_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<CategoryType> {
    let raw: String = row.get(idx)?;
    raw.parse::<CategoryType>()
        .map_err(|e| conversion_failure(idx, e))
}

/// Stored balances and summary totals must stay strictly below this
/// magnitude; well inside the range where `Decimal` adds cents exactly.
const MAX_BALANCE_UNITS: i64 = 1_000_000_000_000_000_000;

fn checked_sum(a: Decimal, b: Decimal, what: impl FnOnce() -> String) -> Result<Decimal> {
    a.checked_add(b)
        .filter(|sum| sum.abs() < Decimal::from(MAX_BALANCE_UNITS))
        .ok_or_else(|| LedgerError::Overflow(what()))
}

/// Fixed-width UTC timestamp, so text order matches time order.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, false)
}

pub fn find_account_status(conn: &Connection, name: &str) -> Result<AccountStatus> {
    let active: Option<bool> = conn
        .query_row(
            "SELECT is_active FROM accounts WHERE source_name=?1",
            params![name],
            |r| r.get(0),
        )
        .optional()?;
    Ok(match active {
        Some(true) => AccountStatus::Active,
        Some(false) => AccountStatus::Inactive,
        None => AccountStatus::NotFound,
    })
}

pub fn account_balance(conn: &Connection, name: &str) -> Result<Option<Decimal>> {
    let balance = conn
        .query_row(
            "SELECT balance FROM accounts WHERE source_name=?1",
            params![name],
            |r| decimal_at(r, 0),
        )
        .optional()?;
    Ok(balance)
}

/// Insert a new source, or revive a deactivated one on top of its residual
/// balance.
pub fn create_or_reactivate_account(
    conn: &Connection,
    name: &str,
    initial_balance: Decimal,
) -> Result<SourceOutcome> {
    if initial_balance < Decimal::ZERO {
        return Err(LedgerError::InvalidBalance);
    }
    match find_account_status(conn, name)? {
        AccountStatus::Active => Err(LedgerError::DuplicateSource(name.to_string())),
        AccountStatus::Inactive => {
            let residual = account_balance(conn, name)?.unwrap_or(Decimal::ZERO);
            let balance = checked_sum(residual, initial_balance, || {
                format!("Balance of '{name}'")
            })?;
            conn.execute(
                "UPDATE accounts SET is_active=1, balance=?1 WHERE source_name=?2",
                params![balance.to_string(), name],
            )?;
            Ok(SourceOutcome::Reactivated)
        }
        AccountStatus::NotFound => {
            conn.execute(
                "INSERT INTO accounts(source_name, balance, created_at, is_active)
                 VALUES (?1, ?2, ?3, 1)",
                params![name, initial_balance.to_string(), timestamp(Utc::now())],
            )?;
            Ok(SourceOutcome::Created)
        }
    }
}

/// `balance += delta` on the named row. `false` when no row matched;
/// `Overflow` when the result would leave the supported range.
pub fn adjust_balance(conn: &Connection, name: &str, delta: Decimal) -> Result<bool> {
    let Some(current) = account_balance(conn, name)? else {
        return Ok(false);
    };
    let balance = checked_sum(current, delta, || format!("Balance of '{name}'"))?;
    let updated = conn.execute(
        "UPDATE accounts SET balance=?1 WHERE source_name=?2",
        params![balance.to_string(), name],
    )?;
    Ok(updated == 1)
}

pub fn insert_transaction(conn: &Connection, t: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions(transaction_id, category_type, category_name, amount,
                                  description, transaction_date, source_name, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            t.id.to_string(),
            t.category_type.as_str(),
            t.category_name,
            t.amount.to_string(),
            t.description,
            t.transaction_date.to_string(),
            t.source_name,
            timestamp(t.created_at),
        ],
    )?;
    Ok(())
}

/// Most recent activity first: transaction date, then creation time, then
/// insertion order.
pub fn list_transactions(conn: &Connection) -> Result<Vec<TransactionInfo>> {
    query_transactions(conn, None)
}

pub fn list_recent_transactions(conn: &Connection, limit: usize) -> Result<Vec<TransactionInfo>> {
    query_transactions(conn, Some(limit))
}

fn query_transactions(conn: &Connection, limit: Option<usize>) -> Result<Vec<TransactionInfo>> {
    // SQLite treats a negative LIMIT as unbounded.
    let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));
    let mut stmt = conn.prepare_cached(
        "SELECT t.transaction_id, t.amount, t.category_type, t.category_name,
                t.description, t.transaction_date, a.source_name
         FROM transactions t
         JOIN accounts a ON t.source_name=a.source_name
         ORDER BY t.transaction_date DESC, t.created_at DESC, t.rowid DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |r| {
        Ok(TransactionInfo {
            id: uuid_at(r, 0)?,
            amount: decimal_at(r, 1)?,
            category_type: category_at(r, 2)?.display_name().to_string(),
            category_name: r.get(3)?,
            description: r.get(4)?,
            transaction_date: r.get::<_, NaiveDate>(5)?,
            source_name: r.get::<_, String>(6)?.to_uppercase(),
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

pub fn list_active_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare_cached(
        "SELECT source_name, balance, created_at, is_active
         FROM accounts WHERE is_active=1 ORDER BY source_name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(Account {
            name: r.get(0)?,
            balance: decimal_at(r, 1)?,
            created_at: r.get::<_, DateTime<Utc>>(2)?,
            active: r.get(3)?,
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

pub fn list_active_account_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare_cached("SELECT source_name FROM accounts WHERE is_active=1 ORDER BY source_name")?;
    let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
    let mut names = Vec::new();
    for row in rows {
        names.push(row?);
    }
    Ok(names)
}

/// Dashboard totals for the current month of the server-local clock.
pub fn compute_summary(conn: &Connection) -> Result<Summary> {
    compute_summary_for(conn, Local::now().date_naive())
}

/// Total balance over active sources only; income and expense over
/// transactions dated in `today`'s calendar month.
pub fn compute_summary_for(conn: &Connection, today: NaiveDate) -> Result<Summary> {
    let mut summary = Summary::default();

    {
        let mut stmt = conn.prepare_cached("SELECT balance FROM accounts WHERE is_active=1")?;
        let mut rows = stmt.query([])?;
        while let Some(r) = rows.next()? {
            summary.total_balance = checked_sum(summary.total_balance, decimal_at(r, 0)?, || {
                "Total balance".to_string()
            })?;
        }
    }

    let month = today.format("%Y-%m").to_string();
    let mut stmt = conn.prepare_cached(
        "SELECT category_type, amount FROM transactions WHERE substr(transaction_date,1,7)=?1",
    )?;
    let mut rows = stmt.query(params![month])?;
    while let Some(r) = rows.next()? {
        let amount = decimal_at(r, 1)?;
        match category_at(r, 0)? {
            CategoryType::Income => {
                summary.month_income = checked_sum(summary.month_income, amount, || {
                    "Month income".to_string()
                })?
            }
            CategoryType::Expense => {
                summary.month_expense = checked_sum(summary.month_expense, amount, || {
                    "Month expense".to_string()
                })?
            }
        }
    }
    Ok(summary)
}

/// Soft-delete. Already inactive sources are skipped and not counted.
pub fn deactivate_accounts(conn: &Connection, names: &[String]) -> Result<usize> {
    let mut stmt = conn
        .prepare_cached("UPDATE accounts SET is_active=0 WHERE source_name=?1 AND is_active=1")?;
    let mut affected = 0;
    for name in names {
        affected += stmt.execute(params![name])?;
    }
    Ok(affected)
}

/// Removes ledger rows only; balances are left as they are.
pub fn delete_transactions(conn: &Connection, ids: &[Uuid]) -> Result<usize> {
    let mut stmt = conn.prepare_cached("DELETE FROM transactions WHERE transaction_id=?1")?;
    let mut affected = 0;
    for id in ids {
        affected += stmt.execute(params![id.to_string()])?;
    }
    Ok(affected)
}
