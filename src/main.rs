// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::process::ExitCode;

use anyhow::Result;
use tracing::error;

use fintrack::{cli, commands, config::Config, db, logging};

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let config = Config::resolve(matches.get_one::<String>("db").map(String::as_str))?;
    let mut conn = db::open(&config)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", config.db_path().display());
        }
        Some(("source", sub)) => commands::sources::handle(&mut conn, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut conn, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&mut conn, sub, &config)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();
    logging::init(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if commands::exit_code(&err) == 1 {
                error!("{err:?}");
            }
            eprintln!("error: {}", commands::user_message(&err));
            ExitCode::from(commands::exit_code(&err))
        }
    }
}
