// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use anyhow::{bail, Context, Result};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let rows = store::list_transactions(conn)?;
    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record([
                "id",
                "date",
                "type",
                "category",
                "amount",
                "source",
                "description",
            ])?;
            for r in &rows {
                wtr.write_record([
                    r.id.to_string(),
                    r.transaction_date.to_string(),
                    r.category_type.clone(),
                    r.category_name.clone(),
                    r.amount.to_string(),
                    r.source_name.clone(),
                    r.description.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<_> = rows
                .iter()
                .map(|r| {
                    json!({
                        "id": r.id.to_string(),
                        "date": r.transaction_date.to_string(),
                        "type": r.category_type,
                        "category": r.category_name,
                        "amount": r.amount.to_string(),
                        "source": r.source_name,
                        "description": r.description,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
    }
    println!("Exported {} transaction(s) to {}", rows.len(), out);
    Ok(())
}
