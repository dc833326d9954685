// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .version(crate_version!())
        .about("Personal finance tracker: sources, postings, and a monthly dashboard")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("SQLite database file (default: $FINTRACK_DB or the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log info-level events to stderr"),
        )
        .subcommand(Command::new("init").about("Create the database and print its path"))
        .subcommand(
            Command::new("source")
                .about("Manage money sources")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Open a source, or reactivate a removed one")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .allow_hyphen_values(true)
                                .help("Opening deposit (blank means 0)"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("Active sources with balances"),
                ))
                .subcommand(
                    Command::new("rm").about("Deactivate sources").arg(
                        Arg::new("name")
                            .long("name")
                            .required(true)
                            .num_args(1..)
                            .action(ArgAction::Append),
                    ),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Post, list and delete transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Post an income or expense against a source")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income | expense"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(Arg::new("source").long("source").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .help("YYYY-MM-DD"),
                        )
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("All transactions, most recent first")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm").about("Delete transactions by id").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .num_args(1..)
                            .action(ArgAction::Append),
                    ),
                ),
        )
        .subcommand(
            Command::new("summary")
                .about("Balance, month-to-date totals and recent activity")
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Show every transaction instead of the most recent few"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print pretty JSON"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv | json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn rm_accepts_repeated_names() {
        let m = build_cli().get_matches_from([
            "fintrack", "source", "rm", "--name", "Cash", "--name", "Wallet",
        ]);
        let (_, src) = m.subcommand().unwrap();
        let (_, rm) = src.subcommand().unwrap();
        let names: Vec<&String> = rm.get_many::<String>("name").unwrap().collect();
        assert_eq!(names, ["Cash", "Wallet"]);
    }
}
