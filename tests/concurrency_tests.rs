// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bankledger::ledger::Ledger;
use bankledger::store::Store;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn setup() -> (TempDir, Arc<Store>, Arc<Ledger>) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(Store::open(dir.path().join("ledger.sqlite")).unwrap());
    let ledger = Arc::new(Ledger::new(store.clone()));
    (dir, store, ledger)
}

#[test]
fn twenty_concurrent_transfers_drain_exactly_the_funded_amount() {
    let (_dir, store, ledger) = setup();
    let a = store.create_account("alice", 200).unwrap();
    let b = store.create_account("bob", 0).unwrap();

    let mut handles = Vec::new();
    for _ in 0..20 {
        let ledger = ledger.clone();
        let (from, to) = (a.id, b.id);
        handles.push(thread::spawn(move || ledger.transfer(from, to, 10, "alice")));
    }

    let mut transfer_ids = Vec::new();
    for handle in handles {
        let transfer = handle.join().unwrap().unwrap();
        transfer_ids.push(transfer.id);
    }

    assert_eq!(store.get_account(a.id).unwrap().balance, 0);
    assert_eq!(store.get_account(b.id).unwrap().balance, 200);

    transfer_ids.sort_unstable();
    transfer_ids.dedup();
    assert_eq!(transfer_ids.len(), 20);

    for id in transfer_ids {
        let transfer = store.get_transfer(id).unwrap();
        assert_eq!(transfer.amount, 10);
        let outgoing = store.get_entry(transfer.outgoing_entry_id).unwrap();
        let incoming = store.get_entry(transfer.incoming_entry_id).unwrap();
        assert_eq!(outgoing.amount, -10);
        assert_eq!(incoming.amount, 10);
        assert_eq!(outgoing.account_id, a.id);
        assert_eq!(incoming.account_id, b.id);
    }
}

// The deadlock-freedom property: transfers in both directions over the same
// pair acquire locks in the same global order, so none of these can hang.
#[test]
fn alternating_direction_transfers_never_deadlock() {
    let (_dir, store, ledger) = setup();
    let a = store.create_account("alice", 1000).unwrap();
    let b = store.create_account("bob", 1000).unwrap();

    let mut handles = Vec::new();
    for i in 0..20 {
        let ledger = ledger.clone();
        let (from, to, owner) = if i % 2 == 0 {
            (a.id, b.id, "alice")
        } else {
            (b.id, a.id, "bob")
        };
        handles.push(thread::spawn(move || ledger.transfer(from, to, 5, owner)));
    }
    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    // Ten transfers each way cancel out.
    assert_eq!(store.get_account(a.id).unwrap().balance, 1000);
    assert_eq!(store.get_account(b.id).unwrap().balance, 1000);
}

#[test]
fn disjoint_pairs_conserve_their_own_totals() {
    let (_dir, store, ledger) = setup();
    let a = store.create_account("alice", 500).unwrap();
    let b = store.create_account("bob", 0).unwrap();
    let c = store.create_account("carol", 300).unwrap();
    let d = store.create_account("dave", 0).unwrap();

    let mut handles = Vec::new();
    for i in 0..10 {
        let ledger = ledger.clone();
        let (from, to, owner) = if i % 2 == 0 {
            (a.id, b.id, "alice")
        } else {
            (c.id, d.id, "carol")
        };
        handles.push(thread::spawn(move || ledger.transfer(from, to, 20, owner)));
    }
    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    let ab = store.get_account(a.id).unwrap().balance + store.get_account(b.id).unwrap().balance;
    let cd = store.get_account(c.id).unwrap().balance + store.get_account(d.id).unwrap().balance;
    assert_eq!(ab, 500);
    assert_eq!(cd, 300);
    assert_eq!(store.get_account(a.id).unwrap().balance, 400);
    assert_eq!(store.get_account(c.id).unwrap().balance, 200);
}

#[test]
fn concurrent_deposits_and_withdrawals_interleave_safely() {
    let (_dir, store, ledger) = setup();
    let a = store.create_account("alice", 1000).unwrap();

    let mut handles = Vec::new();
    for i in 0..16 {
        let ledger = ledger.clone();
        let id = a.id;
        handles.push(thread::spawn(move || {
            if i % 2 == 0 {
                ledger.deposit(id, 25, "alice")
            } else {
                ledger.withdraw(id, 25, "alice")
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    assert_eq!(store.get_account(a.id).unwrap().balance, 1000);
}
