// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::directory::Directory;
use crate::models::AccountState;
use crate::store::Store;
use crate::utils::{fmt_amount, maybe_print_json, parse_amount, pretty_table};
use anyhow::Result;

pub fn handle(store: &Store, directory: &Directory, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("open", sub)) => {
            let owner = sub.get_one::<String>("owner").unwrap();
            let balance = parse_amount(sub.get_one::<String>("balance").unwrap())?;
            let account = store.create_account(owner, balance)?;
            println!(
                "Opened account {} for '{}' with balance {}",
                account.id,
                account.owner,
                fmt_amount(account.balance)
            );
        }
        Some(("get", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let owner = sub.get_one::<String>("owner").unwrap();
            let account = directory.get_account(id, owner)?;
            if !maybe_print_json(sub.get_flag("json"), &account)? {
                let state = match account.state {
                    AccountState::Active => "active".to_string(),
                    AccountState::Closed { at } => format!("closed {}", at.format("%Y-%m-%d")),
                };
                println!(
                    "{}",
                    pretty_table(
                        &["ID", "Owner", "Balance", "State", "Created"],
                        vec![vec![
                            account.id.to_string(),
                            account.owner.clone(),
                            fmt_amount(account.balance),
                            state,
                            account.created_at.format("%Y-%m-%d %H:%M").to_string(),
                        ]],
                    )
                );
            }
        }
        Some(("list", sub)) => {
            let owner = sub.get_one::<String>("owner").unwrap();
            let page = *sub.get_one::<i64>("page").unwrap();
            let page_size = *sub.get_one::<i64>("page-size").unwrap();
            let accounts = directory.list_accounts(owner, page, page_size)?;
            if !maybe_print_json(sub.get_flag("json"), &accounts)? {
                let rows = accounts
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.to_string(),
                            a.owner.clone(),
                            fmt_amount(a.balance),
                            a.created_at.format("%Y-%m-%d %H:%M").to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Owner", "Balance", "Created"], rows)
                );
            }
        }
        Some(("close", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let owner = sub.get_one::<String>("owner").unwrap();
            // Point read first so the ownership check runs before the close.
            directory.get_account(id, owner)?;
            let account = store.close_account(id)?;
            println!("Closed account {}", account.id);
        }
        _ => {}
    }
    Ok(())
}
