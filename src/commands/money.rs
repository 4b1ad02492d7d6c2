// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::utils::{fmt_amount, parse_amount};
use anyhow::Result;

pub fn deposit(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let owner = sub.get_one::<String>("owner").unwrap();
    let entry = ledger.deposit(id, amount, owner)?;
    println!(
        "Deposited {} into account {} (entry {})",
        fmt_amount(amount),
        id,
        entry.id
    );
    Ok(())
}

pub fn withdraw(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let owner = sub.get_one::<String>("owner").unwrap();
    let entry = ledger.withdraw(id, amount, owner)?;
    println!(
        "Withdrew {} from account {} (entry {})",
        fmt_amount(amount),
        id,
        entry.id
    );
    Ok(())
}

pub fn transfer(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let from = *sub.get_one::<i64>("from").unwrap();
    let to = *sub.get_one::<i64>("to").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let owner = sub.get_one::<String>("owner").unwrap();
    let transfer = ledger.transfer(from, to, amount, owner)?;
    println!(
        "Transferred {} from account {} to account {} (transfer {})",
        fmt_amount(amount),
        from,
        to,
        transfer.id
    );
    Ok(())
}
