// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bankledger::error::LedgerError;
use bankledger::models::AccountState;
use bankledger::store::Store;
use tempfile::TempDir;

fn setup() -> (TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("ledger.sqlite")).unwrap();
    (dir, store)
}

#[test]
fn create_and_get_account() {
    let (_dir, store) = setup();
    let created = store.create_account("alice", 500).unwrap();
    assert!(created.id > 0);
    assert_eq!(created.owner, "alice");
    assert_eq!(created.balance, 500);
    assert!(created.state.is_active());

    let fetched = store.get_account(created.id).unwrap();
    assert_eq!(fetched, created);
}

#[test]
fn get_account_is_idempotent() {
    let (_dir, store) = setup();
    let account = store.create_account("alice", 100).unwrap();
    let first = store.get_account(account.id).unwrap();
    let second = store.get_account(account.id).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_rows_fail_typed() {
    let (_dir, store) = setup();
    assert!(matches!(
        store.get_account(42),
        Err(LedgerError::AccountNotFound(42))
    ));
    assert!(matches!(
        store.get_entry(7),
        Err(LedgerError::EntryNotFound(7))
    ));
    assert!(matches!(
        store.get_transfer(9),
        Err(LedgerError::TransferNotFound(9))
    ));
    assert!(store.get_account(42).unwrap_err().is_not_found());
}

#[test]
fn create_account_validates_input() {
    let (_dir, store) = setup();
    assert!(matches!(
        store.create_account("alice", -1),
        Err(LedgerError::InvalidArgument(_))
    ));
    assert!(matches!(
        store.create_account("", 0),
        Err(LedgerError::InvalidArgument(_))
    ));
}

#[test]
fn list_accounts_pages_by_id_ascending() {
    let (_dir, store) = setup();
    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(store.create_account("carol", 0).unwrap().id);
    }
    // Another owner's accounts must not leak into carol's pages.
    store.create_account("dave", 0).unwrap();

    let page1 = store.list_accounts("carol", 1, 2).unwrap();
    assert_eq!(page1.iter().map(|a| a.id).collect::<Vec<_>>(), &ids[0..2]);

    let page2 = store.list_accounts("carol", 2, 2).unwrap();
    assert_eq!(page2.iter().map(|a| a.id).collect::<Vec<_>>(), &ids[2..4]);

    let page3 = store.list_accounts("carol", 3, 2).unwrap();
    assert_eq!(page3.iter().map(|a| a.id).collect::<Vec<_>>(), &ids[4..5]);

    assert!(store.list_accounts("carol", 4, 2).unwrap().is_empty());
}

#[test]
fn list_accounts_with_no_accounts_is_empty_not_an_error() {
    let (_dir, store) = setup();
    assert!(store.list_accounts("nobody", 1, 10).unwrap().is_empty());
}

#[test]
fn list_accounts_validates_pagination() {
    let (_dir, store) = setup();
    assert!(matches!(
        store.list_accounts("alice", 0, 10),
        Err(LedgerError::InvalidArgument(_))
    ));
    assert!(matches!(
        store.list_accounts("alice", 1, 0),
        Err(LedgerError::InvalidArgument(_))
    ));
}

#[test]
fn close_account_is_a_soft_delete() {
    let (_dir, store) = setup();
    let account = store.create_account("alice", 100).unwrap();
    let closed = store.close_account(account.id).unwrap();
    assert!(matches!(closed.state, AccountState::Closed { .. }));

    // Still individually retrievable, flagged as closed.
    let fetched = store.get_account(account.id).unwrap();
    assert!(matches!(fetched.state, AccountState::Closed { .. }));
    assert_eq!(fetched.balance, 100);

    // Excluded from listings.
    assert!(store.list_accounts("alice", 1, 10).unwrap().is_empty());

    // Closing twice is rejected.
    assert!(matches!(
        store.close_account(account.id),
        Err(LedgerError::InvalidArgument(_))
    ));
}

#[test]
fn close_missing_account_fails_typed() {
    let (_dir, store) = setup();
    assert!(matches!(
        store.close_account(13),
        Err(LedgerError::AccountNotFound(13))
    ));
}
