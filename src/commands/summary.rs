// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::transactions_table;
use crate::config::Config;
use crate::posting;
use crate::utils::{fmt_money, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches, config: &Config) -> Result<()> {
    let limit = if m.get_flag("all") {
        None
    } else {
        Some(config.dashboard_limit)
    };
    let board = posting::dashboard(conn, limit)?;

    if m.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    let s = &board.summary;
    println!(
        "{}",
        pretty_table(
            &["Balance", "Income (month)", "Expense (month)"],
            vec![vec![
                fmt_money(&s.total_balance),
                fmt_money(&s.month_income),
                fmt_money(&s.month_expense),
            ]],
        )
    );
    if board.recent.is_empty() {
        println!("No transactions yet.");
    } else {
        println!("{}", transactions_table(&board.recent));
    }
    if !board.available_sources.is_empty() {
        println!("Sources: {}", board.available_sources.join(", "));
    }
    Ok(())
}
