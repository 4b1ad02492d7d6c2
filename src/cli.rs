// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn owner_arg() -> Arg {
    Arg::new("owner")
        .long("owner")
        .required(true)
        .help("Acting identity (the verified caller)")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn amount_arg() -> Arg {
    Arg::new("amount")
        .long("amount")
        .required(true)
        .help("Amount in major units, e.g. 10.50")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of a table")
}

pub fn build_cli() -> Command {
    Command::new("bankledger")
        .version(crate_version!())
        .about("Account balances, immutable entries, and atomic transfers over SQLite")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("account")
                .about("Open, inspect, list, and close accounts")
                .subcommand(
                    Command::new("open").about("Open a new account").arg(owner_arg()).arg(
                        Arg::new("balance")
                            .long("balance")
                            .default_value("0")
                            .help("Initial balance in major units"),
                    ),
                )
                .subcommand(
                    Command::new("get")
                        .about("Show one account")
                        .arg(id_arg())
                        .arg(owner_arg())
                        .arg(json_arg()),
                )
                .subcommand(
                    Command::new("list")
                        .about("List your accounts")
                        .arg(owner_arg())
                        .arg(
                            Arg::new("page")
                                .long("page")
                                .default_value("1")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("page-size")
                                .long("page-size")
                                .default_value("10")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(json_arg()),
                )
                .subcommand(
                    Command::new("close")
                        .about("Close an account (soft delete)")
                        .arg(id_arg())
                        .arg(owner_arg()),
                ),
        )
        .subcommand(
            Command::new("deposit")
                .about("Credit an account")
                .arg(id_arg())
                .arg(amount_arg())
                .arg(owner_arg()),
        )
        .subcommand(
            Command::new("withdraw")
                .about("Debit an account")
                .arg(id_arg())
                .arg(amount_arg())
                .arg(owner_arg()),
        )
        .subcommand(
            Command::new("transfer")
                .about("Move money between two accounts")
                .arg(
                    Arg::new("from")
                        .long("from")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(amount_arg())
                .arg(owner_arg()),
        )
        .subcommand(
            Command::new("entry").about("Ledger entries").subcommand(
                Command::new("get")
                    .about("Show one entry")
                    .arg(id_arg())
                    .arg(owner_arg())
                    .arg(json_arg()),
            ),
        )
        .subcommand(
            Command::new("transfer-record").about("Transfer records").subcommand(
                Command::new("get")
                    .about("Show one transfer")
                    .arg(id_arg())
                    .arg(owner_arg())
                    .arg(json_arg()),
            ),
        )
}
