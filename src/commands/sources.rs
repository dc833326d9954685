// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::SourceOutcome;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use crate::{posting, store};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let balance = sub
                .get_one::<String>("balance")
                .map(String::as_str)
                .unwrap_or("");
            match posting::add_source(conn, name, balance)? {
                SourceOutcome::Created => println!("Added source '{}'", name.trim()),
                SourceOutcome::Reactivated => println!("Reactivated source '{}'", name.trim()),
            }
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let sources = store::list_active_accounts(conn)?;
            if !maybe_print_json(json_flag, jsonl_flag, &sources)? {
                let rows = sources
                    .iter()
                    .map(|a| {
                        vec![
                            a.name.clone(),
                            fmt_money(&a.balance),
                            a.created_at.format("%Y-%m-%d %H:%M").to_string(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Source", "Balance", "Created"], rows));
            }
        }
        Some(("rm", sub)) => {
            let names: Vec<String> = sub
                .get_many::<String>("name")
                .map(|v| v.cloned().collect())
                .unwrap_or_default();
            let affected = posting::deactivate_sources(conn, &names)?;
            println!("Deactivated {} source(s)", affected);
        }
        _ => {}
    }
    Ok(())
}
