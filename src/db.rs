// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::debug;

use crate::config::Config;

pub fn open(config: &Config) -> Result<Connection> {
    let path = config.db_path();
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    conn.busy_timeout(config.busy_timeout)
        .context("Failed to set busy timeout")?;
    init_schema(&conn).with_context(|| format!("Init schema at {}", path.display()))?;
    debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn open_in_memory() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    -- balance is a canonical decimal string, never a float
    CREATE TABLE IF NOT EXISTS accounts(
        source_name TEXT PRIMARY KEY,
        balance TEXT NOT NULL DEFAULT '0',
        created_at TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1
    );

    CREATE TABLE IF NOT EXISTS transactions(
        transaction_id TEXT PRIMARY KEY,
        category_type TEXT NOT NULL CHECK(category_type IN ('income','expense')),
        category_name TEXT NOT NULL,
        amount TEXT NOT NULL,
        description TEXT,
        transaction_date TEXT NOT NULL,
        source_name TEXT NOT NULL,
        created_at TEXT NOT NULL,
        FOREIGN KEY(source_name) REFERENCES accounts(source_name)
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(transaction_date);
    CREATE INDEX IF NOT EXISTS idx_transactions_source ON transactions(source_name);
    "#,
    )
}
