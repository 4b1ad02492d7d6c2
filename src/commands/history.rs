// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::directory::Directory;
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn entry(directory: &Directory, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("get", sub)) = m.subcommand() {
        let id = *sub.get_one::<i64>("id").unwrap();
        let owner = sub.get_one::<String>("owner").unwrap();
        let entry = directory.get_entry(id, owner)?;
        if !maybe_print_json(sub.get_flag("json"), &entry)? {
            println!(
                "{}",
                pretty_table(
                    &["ID", "Account", "Amount", "Created"],
                    vec![vec![
                        entry.id.to_string(),
                        entry.account_id.to_string(),
                        fmt_amount(entry.amount),
                        entry.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    ]],
                )
            );
        }
    }
    Ok(())
}

pub fn transfer_record(directory: &Directory, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("get", sub)) = m.subcommand() {
        let id = *sub.get_one::<i64>("id").unwrap();
        let owner = sub.get_one::<String>("owner").unwrap();
        let transfer = directory.get_transfer(id, owner)?;
        if !maybe_print_json(sub.get_flag("json"), &transfer)? {
            println!(
                "{}",
                pretty_table(
                    &["ID", "From", "To", "Amount", "Out Entry", "In Entry", "Created"],
                    vec![vec![
                        transfer.id.to_string(),
                        transfer.from_account_id.to_string(),
                        transfer.to_account_id.to_string(),
                        fmt_amount(transfer.amount),
                        transfer.outgoing_entry_id.to_string(),
                        transfer.incoming_entry_id.to_string(),
                        transfer.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    ]],
                )
            );
        }
    }
    Ok(())
}
