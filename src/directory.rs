// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result;
use crate::guard::{AccountAction, ensure_account_owner};
use crate::models::{Account, Entry, Transfer};
use crate::store::Store;
use std::sync::Arc;

/// Read-side queries. No write side effects; delegates to the store and adds
/// only the ownership check in front of each result.
pub struct Directory {
    store: Arc<Store>,
}

impl Directory {
    pub fn new(store: Arc<Store>) -> Directory {
        Directory { store }
    }

    pub fn get_account(&self, id: i64, identity: &str) -> Result<Account> {
        let account = self.store.get_account(id)?;
        ensure_account_owner(&account, identity, AccountAction::View)?;
        Ok(account)
    }

    /// The caller's own active accounts, id ascending, one page at a time.
    pub fn list_accounts(&self, identity: &str, page_number: i64, page_size: i64) -> Result<Vec<Account>> {
        self.store.list_accounts(identity, page_number, page_size)
    }

    /// A transfer is visible to the owner of its source account.
    pub fn get_transfer(&self, id: i64, identity: &str) -> Result<Transfer> {
        let transfer = self.store.get_transfer(id)?;
        let from_account = self.store.get_account(transfer.from_account_id)?;
        ensure_account_owner(&from_account, identity, AccountAction::View)?;
        Ok(transfer)
    }

    pub fn get_entry(&self, id: i64, identity: &str) -> Result<Entry> {
        let entry = self.store.get_entry(id)?;
        let account = self.store.get_account(entry.account_id)?;
        ensure_account_owner(&account, identity, AccountAction::View)?;
        Ok(entry)
    }
}
