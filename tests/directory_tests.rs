// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bankledger::directory::Directory;
use bankledger::error::LedgerError;
use bankledger::ledger::Ledger;
use bankledger::store::Store;
use std::sync::Arc;
use tempfile::TempDir;

fn setup() -> (TempDir, Arc<Store>, Ledger, Directory) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(Store::open(dir.path().join("ledger.sqlite")).unwrap());
    let ledger = Ledger::new(store.clone());
    let directory = Directory::new(store.clone());
    (dir, store, ledger, directory)
}

#[test]
fn get_account_enforces_ownership() {
    let (_dir, store, _ledger, directory) = setup();
    let account = store.create_account("alice", 50).unwrap();

    assert_eq!(directory.get_account(account.id, "alice").unwrap(), account);
    let err = directory.get_account(account.id, "bob").unwrap_err();
    assert!(err.is_unauthorized());
}

#[test]
fn list_accounts_shows_only_the_callers_accounts() {
    let (_dir, store, _ledger, directory) = setup();
    store.create_account("alice", 0).unwrap();
    store.create_account("alice", 0).unwrap();
    store.create_account("bob", 0).unwrap();

    let mine = directory.list_accounts("alice", 1, 10).unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|a| a.owner == "alice"));
}

#[test]
fn transfer_is_visible_to_the_source_owner_only() {
    let (_dir, store, ledger, directory) = setup();
    let a = store.create_account("alice", 100).unwrap();
    let b = store.create_account("bob", 0).unwrap();
    let transfer = ledger.transfer(a.id, b.id, 25, "alice").unwrap();

    assert_eq!(
        directory.get_transfer(transfer.id, "alice").unwrap(),
        transfer
    );
    assert!(matches!(
        directory.get_transfer(transfer.id, "bob"),
        Err(LedgerError::UnauthorizedView)
    ));
}

#[test]
fn entry_is_visible_to_its_account_owner_only() {
    let (_dir, store, ledger, directory) = setup();
    let a = store.create_account("alice", 0).unwrap();
    let entry = ledger.deposit(a.id, 75, "alice").unwrap();

    assert_eq!(directory.get_entry(entry.id, "alice").unwrap(), entry);
    assert!(matches!(
        directory.get_entry(entry.id, "bob"),
        Err(LedgerError::UnauthorizedView)
    ));
}

#[test]
fn missing_records_stay_not_found() {
    let (_dir, _store, _ledger, directory) = setup();
    assert!(matches!(
        directory.get_transfer(5, "alice"),
        Err(LedgerError::TransferNotFound(5))
    ));
    assert!(matches!(
        directory.get_entry(5, "alice"),
        Err(LedgerError::EntryNotFound(5))
    ));
}
