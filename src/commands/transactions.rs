// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{PostingRequest, TransactionInfo};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use crate::{posting, store};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn posting_request(sub: &clap::ArgMatches) -> PostingRequest {
    let get = |key: &str| sub.get_one::<String>(key).cloned().unwrap_or_default();
    PostingRequest {
        amount: get("amount"),
        category_type: get("type"),
        category_name: get("category"),
        description: sub.get_one::<String>("description").cloned(),
        source_name: get("source"),
        transaction_date: get("date"),
    }
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let txn = posting::post_transaction(conn, &posting_request(sub))?;
    println!(
        "Recorded {} {} on {} against '{}' ({})",
        txn.category_type,
        fmt_money(&txn.amount),
        txn.transaction_date,
        txn.source_name,
        txn.id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", transactions_table(&data));
    }
    Ok(())
}

fn remove(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let ids: Vec<String> = sub
        .get_many::<String>("id")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    let removed = posting::remove_transactions(conn, &ids)?;
    println!("Deleted {} transaction(s); source balances unchanged", removed);
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionInfo>> {
    let rows = match sub.get_one::<usize>("limit") {
        Some(limit) => store::list_recent_transactions(conn, *limit)?,
        None => store::list_transactions(conn)?,
    };
    Ok(rows)
}

pub fn transactions_table(data: &[TransactionInfo]) -> comfy_table::Table {
    let rows = data
        .iter()
        .map(|r| {
            vec![
                r.transaction_date.to_string(),
                r.category_type.clone(),
                r.category_name.clone(),
                fmt_money(&r.amount),
                r.source_name.clone(),
                r.description.clone().unwrap_or_default(),
                r.id.to_string(),
            ]
        })
        .collect();
    pretty_table(
        &["Date", "Type", "Category", "Amount", "Source", "Description", "Id"],
        rows,
    )
}
