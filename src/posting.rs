// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Posting engine: validates loosely typed input and applies it to the ledger
//! store so that a source's balance and its transaction rows never diverge.
//!
//! Every mutating operation runs inside one `BEGIN IMMEDIATE` unit of work.
//! SQLite grants the write lock at `BEGIN`, so the funds check and the balance
//! update cannot interleave with another writer. Any early return drops the
//! unit of work, which rolls it back.

use chrono::Utc;
use rusqlite::{Connection, TransactionBehavior};
use rust_decimal::Decimal;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::{LedgerError, Result};
use crate::models::{
    AccountStatus, CategoryType, Dashboard, PostingRequest, SourceOutcome, Transaction,
};
use crate::store;
use crate::utils::{parse_balance, parse_date, parse_decimal};

fn report(op: &'static str, err: &LedgerError) {
    match err {
        LedgerError::Storage(source) => {
            error!(operation = op, error = %source, "storage failure, unit of work rolled back")
        }
        other => warn!(operation = op, kind = other.kind(), "{other}"),
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Check every field of a posting without touching storage.
pub fn validate_posting(req: &PostingRequest) -> Result<Transaction> {
    let amount = parse_decimal(&req.amount)?;
    if amount < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount);
    }
    let category_type: CategoryType = req.category_type.parse()?;
    let transaction_date = parse_date(&req.transaction_date)?;
    Ok(Transaction {
        id: Uuid::new_v4(),
        category_type,
        category_name: req.category_name.trim().to_string(),
        amount,
        description: non_empty(req.description.as_deref()),
        transaction_date,
        source_name: req.source_name.trim().to_string(),
        created_at: Utc::now(),
    })
}

/// Record an income or expense and move the source's balance with it.
pub fn post_transaction(conn: &mut Connection, req: &PostingRequest) -> Result<Transaction> {
    let txn = validate_posting(req)?;
    apply_posting(conn, txn).inspect_err(|e| report("post_transaction", e))
}

fn apply_posting(conn: &mut Connection, txn: Transaction) -> Result<Transaction> {
    let unit = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let name = txn.source_name.as_str();

    // Deactivated sources are not postable.
    if store::find_account_status(&unit, name)? != AccountStatus::Active {
        return Err(LedgerError::UnknownAccount(name.to_string()));
    }

    let delta = match txn.category_type {
        CategoryType::Expense => {
            let available = store::account_balance(&unit, name)?
                .ok_or_else(|| LedgerError::UnknownAccount(name.to_string()))?;
            if available < txn.amount {
                return Err(LedgerError::InsufficientFunds {
                    source_name: name.to_string(),
                    available,
                    requested: txn.amount,
                });
            }
            -txn.amount
        }
        CategoryType::Income => txn.amount,
    };

    if !store::adjust_balance(&unit, name, delta)? {
        return Err(LedgerError::UnknownAccount(name.to_string()));
    }
    store::insert_transaction(&unit, &txn)?;
    unit.commit()?;

    info!(
        id = %txn.id,
        source = name,
        category_type = txn.category_type.as_str(),
        amount = %txn.amount,
        "posted transaction"
    );
    Ok(txn)
}

/// Open a new source, or reactivate a deactivated one with the given deposit.
pub fn add_source(
    conn: &mut Connection,
    name: &str,
    initial_balance: &str,
) -> Result<SourceOutcome> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::InvalidSourceName);
    }
    let balance = parse_balance(initial_balance)?;
    if balance < Decimal::ZERO {
        return Err(LedgerError::InvalidBalance);
    }

    let run = |conn: &mut Connection| -> Result<SourceOutcome> {
        let unit = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let outcome = store::create_or_reactivate_account(&unit, name, balance)?;
        unit.commit()?;
        Ok(outcome)
    };
    let outcome = run(conn).inspect_err(|e| report("add_source", e))?;
    info!(source = name, balance = %balance, ?outcome, "source saved");
    Ok(outcome)
}

/// Delete transactions by id. Balances are not reversed.
pub fn remove_transactions(conn: &mut Connection, ids: &[String]) -> Result<usize> {
    if ids.is_empty() {
        return Ok(0);
    }
    let ids = ids
        .iter()
        .map(|raw| {
            Uuid::parse_str(raw.trim())
                .map_err(|_| LedgerError::InvalidTransactionId(raw.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let run = |conn: &mut Connection| -> Result<usize> {
        let unit = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let removed = store::delete_transactions(&unit, &ids)?;
        unit.commit()?;
        Ok(removed)
    };
    let removed = run(conn).inspect_err(|e| report("remove_transactions", e))?;
    info!(requested = ids.len(), removed, "transactions deleted");
    Ok(removed)
}

/// Soft-delete sources. Re-deactivating is a no-op.
pub fn deactivate_sources(conn: &mut Connection, names: &[String]) -> Result<usize> {
    if names.is_empty() {
        return Ok(0);
    }
    let run = |conn: &mut Connection| -> Result<usize> {
        let unit = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let affected = store::deactivate_accounts(&unit, names)?;
        unit.commit()?;
        Ok(affected)
    };
    let affected = run(conn).inspect_err(|e| report("deactivate_sources", e))?;
    info!(requested = names.len(), affected, "sources deactivated");
    Ok(affected)
}

/// One consistent read of everything the dashboard shows. `None` lists every
/// transaction.
pub fn dashboard(conn: &mut Connection, limit: Option<usize>) -> Result<Dashboard> {
    let run = |conn: &mut Connection| -> Result<Dashboard> {
        let unit = conn.transaction()?;
        let summary = store::compute_summary(&unit)?;
        let recent = match limit {
            Some(n) => store::list_recent_transactions(&unit, n)?,
            None => store::list_transactions(&unit)?,
        };
        let sources = store::list_active_accounts(&unit)?;
        let available_sources = store::list_active_account_names(&unit)?;
        unit.commit()?;
        Ok(Dashboard {
            summary,
            recent,
            sources,
            available_sources,
        })
    };
    run(conn).inspect_err(|e| report("dashboard", e))
}
