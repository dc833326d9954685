// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Fintrack", "fintrack"));

pub const DB_ENV: &str = "FINTRACK_DB";
pub const BUSY_TIMEOUT_ENV: &str = "FINTRACK_BUSY_TIMEOUT_MS";
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);
const DEFAULT_DASHBOARD_LIMIT: usize = 5;

/// Runtime settings, built once in `main` and handed to whatever needs them.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    /// Upper bound on waiting for another writer's lock.
    pub busy_timeout: Duration,
    /// Rows shown on the dashboard unless the caller asks for all of them.
    pub dashboard_limit: usize,
}

impl Config {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            dashboard_limit: DEFAULT_DASHBOARD_LIMIT,
        }
    }

    /// `--db` wins over `FINTRACK_DB`, which wins over the platform data dir.
    pub fn resolve(db_flag: Option<&str>) -> Result<Self> {
        let db_path = match db_flag
            .map(str::to_string)
            .or_else(|| std::env::var(DB_ENV).ok())
            .filter(|p| !p.trim().is_empty())
        {
            Some(p) => PathBuf::from(p.trim()),
            None => default_db_path()?,
        };
        let mut config = Self::new(db_path);
        if let Ok(raw) = std::env::var(BUSY_TIMEOUT_ENV) {
            let ms: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} '{}'", BUSY_TIMEOUT_ENV, raw))?;
            config.busy_timeout = Duration::from_millis(ms);
        }
        Ok(config)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("fintrack.sqlite"))
}
