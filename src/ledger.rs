// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, Result};
use crate::guard::{AccountAction, ensure_account_owner};
use crate::models::{Entry, Transfer};
use crate::store::Store;
use std::sync::Arc;
use tracing::{info, warn};

/// Orders two account ids ascending. Every multi-account operation acquires
/// locks in this order, whatever the transfer direction, so two concurrent
/// operations on the same pair can never hold one lock each and wait on the
/// other's.
pub fn lock_order(a: i64, b: i64) -> (i64, i64) {
    if a < b { (a, b) } else { (b, a) }
}

/// The transactional logic layer: deposit, withdraw, and transfer, each one
/// all-or-nothing unit of work over the injected store. Ownership and balance
/// are checked before any row is written; on any failure nothing is visible
/// to other callers.
pub struct Ledger {
    store: Arc<Store>,
}

impl Ledger {
    pub fn new(store: Arc<Store>) -> Ledger {
        Ledger { store }
    }

    /// Credits `amount` to the account. A credit cannot overdraw, so the
    /// account is read without a lock; atomicity comes from the transaction.
    pub fn deposit(&self, account_id: i64, amount: i64, requesting_owner: &str) -> Result<Entry> {
        require_positive(amount)?;
        let entry = self.store.transaction(|tx| {
            let account = tx.get_account(account_id)?;
            ensure_account_owner(&account, requesting_owner, AccountAction::Deposit)?;
            let entry = tx.create_entry(account_id, amount)?;
            tx.save_balance(account_id, account.balance + amount)?;
            Ok(entry)
        })?;
        info!(account_id, amount, entry_id = entry.id, "deposit committed");
        Ok(entry)
    }

    /// Debits `amount` from the account; fails with `InsufficientFunds` and
    /// rolls back if the balance would go negative.
    pub fn withdraw(&self, account_id: i64, amount: i64, requesting_owner: &str) -> Result<Entry> {
        require_positive(amount)?;
        let entry = self.store.transaction(|tx| {
            let account = tx.get_account(account_id)?;
            ensure_account_owner(&account, requesting_owner, AccountAction::Withdraw)?;
            if account.balance - amount < 0 {
                warn!(account_id, balance = account.balance, amount, "withdraw rejected");
                return Err(LedgerError::InsufficientFunds {
                    account_id,
                    balance: account.balance,
                    requested: amount,
                });
            }
            let entry = tx.create_entry(account_id, -amount)?;
            tx.save_balance(account_id, account.balance - amount)?;
            Ok(entry)
        })?;
        info!(account_id, amount, entry_id = entry.id, "withdraw committed");
        Ok(entry)
    }

    /// Moves `amount` between two distinct accounts: two balance updates, two
    /// entries, and one transfer row, committed together or not at all.
    pub fn transfer(
        &self,
        from_id: i64,
        to_id: i64,
        amount: i64,
        requesting_owner: &str,
    ) -> Result<Transfer> {
        if from_id == to_id {
            return Err(LedgerError::InvalidArgument(format!(
                "cannot transfer from account {from_id} to itself"
            )));
        }
        require_positive(amount)?;

        let transfer = self.store.transaction(|tx| {
            // Lock the lower id first regardless of direction.
            let (low, high) = lock_order(from_id, to_id);
            let low_account = tx.lock_account_for_update(low).map_err(|e| mark_end(e, from_id, to_id))?;
            let high_account = tx.lock_account_for_update(high).map_err(|e| mark_end(e, from_id, to_id))?;
            let (from_account, to_account) = if low == from_id {
                (low_account, high_account)
            } else {
                (high_account, low_account)
            };

            ensure_account_owner(&from_account, requesting_owner, AccountAction::Transfer)?;
            if from_account.balance - amount < 0 {
                warn!(
                    from_id,
                    balance = from_account.balance,
                    amount,
                    "transfer rejected"
                );
                return Err(LedgerError::InsufficientFunds {
                    account_id: from_id,
                    balance: from_account.balance,
                    requested: amount,
                });
            }

            tx.save_balance(from_id, from_account.balance - amount)?;
            tx.save_balance(to_id, to_account.balance + amount)?;

            let outgoing = tx.create_entry(from_id, -amount)?;
            let incoming = tx.create_entry(to_id, amount)?;
            tx.create_transfer(from_id, to_id, amount, outgoing.id, incoming.id)
        })?;
        info!(
            from_id,
            to_id,
            amount,
            transfer_id = transfer.id,
            "transfer committed"
        );
        Ok(transfer)
    }
}

fn require_positive(amount: i64) -> Result<()> {
    if amount <= 0 {
        return Err(LedgerError::InvalidArgument(format!(
            "amount must be positive, got {amount}"
        )));
    }
    Ok(())
}

/// Distinguishes which end of a transfer was missing.
fn mark_end(err: LedgerError, from_id: i64, to_id: i64) -> LedgerError {
    match err {
        LedgerError::AccountNotFound(id) if id == from_id => LedgerError::SrcAccountNotFound(id),
        LedgerError::AccountNotFound(id) if id == to_id => LedgerError::DstAccountNotFound(id),
        other => other,
    }
}
