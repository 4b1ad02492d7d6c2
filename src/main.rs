// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use bankledger::{cli, commands, db, directory::Directory, ledger::Ledger, store::Store};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = Arc::new(Store::open(db::db_path()?)?);
    let ledger = Ledger::new(store.clone());
    let directory = Directory::new(store.clone());

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("account", sub)) => commands::accounts::handle(&store, &directory, sub)?,
        Some(("deposit", sub)) => commands::money::deposit(&ledger, sub)?,
        Some(("withdraw", sub)) => commands::money::withdraw(&ledger, sub)?,
        Some(("transfer", sub)) => commands::money::transfer(&ledger, sub)?,
        Some(("entry", sub)) => commands::history::entry(&directory, sub)?,
        Some(("transfer-record", sub)) => commands::history::transfer_record(&directory, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
