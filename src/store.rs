// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::error::{LedgerError, Result};
use crate::models::{Account, AccountState, Entry, Transfer};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Condvar, Mutex};
use tracing::debug;

/// Per-account advisory locks. SQLite has no row-level locks, so the
/// `SELECT ... FOR UPDATE` of the relational design is realized here: an
/// account id is held by at most one in-flight unit of work, and a second
/// taker blocks until the holder's transaction ends.
#[derive(Default)]
pub struct LockTable {
    held: Mutex<HashSet<i64>>,
    released: Condvar,
}

impl LockTable {
    fn acquire(&self, id: i64) -> AccountLock<'_> {
        let mut held = self.held.lock().expect("lock table poisoned");
        while held.contains(&id) {
            held = self.released.wait(held).expect("lock table poisoned");
        }
        held.insert(id);
        AccountLock { table: self, id }
    }

    fn release(&self, id: i64) {
        let mut held = self.held.lock().expect("lock table poisoned");
        held.remove(&id);
        drop(held);
        self.released.notify_all();
    }
}

/// Releases the held account id on drop, i.e. when the owning transaction
/// commits or rolls back.
pub struct AccountLock<'a> {
    table: &'a LockTable,
    id: i64,
}

impl Drop for AccountLock<'_> {
    fn drop(&mut self) {
        self.table.release(self.id);
    }
}

/// Durable storage for accounts, entries, and transfers. An explicit handle,
/// injected into the ledger engine and directory at construction; no global
/// connection state. Each unit of work opens its own connection so callers
/// on different threads proceed independently.
pub struct Store {
    path: PathBuf,
    locks: LockTable,
}

impl Store {
    pub fn open(path: impl Into<PathBuf>) -> Result<Store> {
        let path = path.into();
        let conn = db::open(&path)?;
        db::init_schema(&conn)?;
        Ok(Store {
            path,
            locks: LockTable::default(),
        })
    }

    fn conn(&self) -> Result<Connection> {
        Ok(db::open(&self.path)?)
    }

    pub fn create_account(&self, owner: &str, initial_balance: i64) -> Result<Account> {
        if owner.is_empty() {
            return Err(LedgerError::InvalidArgument("owner must not be empty".into()));
        }
        if initial_balance < 0 {
            return Err(LedgerError::InvalidArgument(format!(
                "initial balance must not be negative, got {initial_balance}"
            )));
        }
        let conn = self.conn()?;
        let now = Utc::now();
        conn.execute(
            "INSERT INTO accounts(owner, balance, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
            params![owner, initial_balance, now, now],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, owner, initial_balance, "account created");
        Ok(Account {
            id,
            owner: owner.to_string(),
            balance: initial_balance,
            created_at: now,
            updated_at: now,
            state: AccountState::Active,
        })
    }

    /// Point read. Returns the row whatever its state; callers inspect
    /// `state` to tell a closed account from an active one.
    pub fn get_account(&self, id: i64) -> Result<Account> {
        get_account_any(&self.conn()?, id)
    }

    /// Active accounts for `owner`, id ascending, windowed by page. An owner
    /// with no accounts yields an empty vector, not an error.
    pub fn list_accounts(&self, owner: &str, page_number: i64, page_size: i64) -> Result<Vec<Account>> {
        if page_number < 1 {
            return Err(LedgerError::InvalidArgument(format!(
                "page number must be at least 1, got {page_number}"
            )));
        }
        if page_size < 1 {
            return Err(LedgerError::InvalidArgument(format!(
                "page size must be at least 1, got {page_size}"
            )));
        }
        let conn = self.conn()?;
        let offset = (page_number - 1) * page_size;
        let mut stmt = conn.prepare(
            "SELECT id, owner, balance, created_at, updated_at, deleted_at FROM accounts
             WHERE owner = ?1 AND deleted_at IS NULL
             ORDER BY id ASC LIMIT ?2 OFFSET ?3",
        )?;
        let rows = stmt.query_map(params![owner, page_size, offset], account_from_row)?;
        let mut accounts = Vec::new();
        for row in rows {
            accounts.push(row?);
        }
        Ok(accounts)
    }

    /// Soft delete: marks the account closed and keeps the row. Entries and
    /// transfers referencing it stay intact.
    pub fn close_account(&self, id: i64) -> Result<Account> {
        let conn = self.conn()?;
        let account = get_account_any(&conn, id)?;
        if !account.state.is_active() {
            return Err(LedgerError::InvalidArgument(format!(
                "account {id} is already closed"
            )));
        }
        let now = Utc::now();
        conn.execute(
            "UPDATE accounts SET deleted_at = ?1, updated_at = ?1 WHERE id = ?2",
            params![now, id],
        )?;
        debug!(id, "account closed");
        Ok(Account {
            updated_at: now,
            state: AccountState::Closed { at: now },
            ..account
        })
    }

    pub fn get_entry(&self, id: i64) -> Result<Entry> {
        self.conn()?
            .query_row(
                "SELECT id, account_id, amount, created_at FROM entries WHERE id = ?1",
                params![id],
                entry_from_row,
            )
            .optional()?
            .ok_or(LedgerError::EntryNotFound(id))
    }

    pub fn get_transfer(&self, id: i64) -> Result<Transfer> {
        self.conn()?
            .query_row(
                "SELECT id, from_account_id, to_account_id, amount, outgoing_entry_id,
                        incoming_entry_id, created_at
                 FROM transfers WHERE id = ?1",
                params![id],
                transfer_from_row,
            )
            .optional()?
            .ok_or(LedgerError::TransferNotFound(id))
    }

    /// All-or-nothing unit of work. Commits when the closure returns Ok,
    /// rolls back every write when it returns Err. Account locks taken inside
    /// are released only after the outcome is durable.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut StoreTx<'_, '_>) -> Result<T>,
    {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut stx = StoreTx {
            tx,
            locks: &self.locks,
            held: Vec::new(),
        };
        match f(&mut stx) {
            Ok(value) => {
                let StoreTx { tx, held, .. } = stx;
                tx.commit()?;
                drop(held);
                Ok(value)
            }
            // Dropping stx rolls the transaction back, then frees the locks.
            Err(e) => Err(e),
        }
    }
}

/// Handle on one open unit of work. Only reachable inside
/// [`Store::transaction`]; everything done through it lands or vanishes
/// together.
pub struct StoreTx<'conn, 'store> {
    tx: rusqlite::Transaction<'conn>,
    locks: &'store LockTable,
    held: Vec<AccountLock<'store>>,
}

impl StoreTx<'_, '_> {
    /// Reads one active account with its advisory lock held until this
    /// transaction ends. Blocks while another unit of work holds the lock.
    /// Callers locking two accounts must acquire in ascending id order and
    /// must not lock the same id twice within one transaction.
    pub fn lock_account_for_update(&mut self, id: i64) -> Result<Account> {
        let lock = self.locks.acquire(id);
        self.held.push(lock);
        self.get_account(id)
    }

    /// Plain read of an active account, no lock.
    pub fn get_account(&self, id: i64) -> Result<Account> {
        self.tx
            .query_row(
                "SELECT id, owner, balance, created_at, updated_at, deleted_at FROM accounts
                 WHERE id = ?1 AND deleted_at IS NULL",
                params![id],
                account_from_row,
            )
            .optional()?
            .ok_or(LedgerError::AccountNotFound(id))
    }

    pub fn save_balance(&self, id: i64, new_balance: i64) -> Result<()> {
        let now = Utc::now();
        let changed = self.tx.execute(
            "UPDATE accounts SET balance = ?1, updated_at = ?2 WHERE id = ?3 AND deleted_at IS NULL",
            params![new_balance, now, id],
        )?;
        if changed == 0 {
            return Err(LedgerError::AccountNotFound(id));
        }
        Ok(())
    }

    pub fn create_entry(&self, account_id: i64, amount: i64) -> Result<Entry> {
        let now = Utc::now();
        self.tx.execute(
            "INSERT INTO entries(account_id, amount, created_at) VALUES (?1, ?2, ?3)",
            params![account_id, amount, now],
        )?;
        Ok(Entry {
            id: self.tx.last_insert_rowid(),
            account_id,
            amount,
            created_at: now,
        })
    }

    pub fn create_transfer(
        &self,
        from_account_id: i64,
        to_account_id: i64,
        amount: i64,
        outgoing_entry_id: i64,
        incoming_entry_id: i64,
    ) -> Result<Transfer> {
        let now = Utc::now();
        self.tx.execute(
            "INSERT INTO transfers(from_account_id, to_account_id, amount,
                                   outgoing_entry_id, incoming_entry_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                from_account_id,
                to_account_id,
                amount,
                outgoing_entry_id,
                incoming_entry_id,
                now
            ],
        )?;
        Ok(Transfer {
            id: self.tx.last_insert_rowid(),
            from_account_id,
            to_account_id,
            amount,
            outgoing_entry_id,
            incoming_entry_id,
            created_at: now,
        })
    }
}

fn get_account_any(conn: &Connection, id: i64) -> Result<Account> {
    conn.query_row(
        "SELECT id, owner, balance, created_at, updated_at, deleted_at FROM accounts WHERE id = ?1",
        params![id],
        account_from_row,
    )
    .optional()?
    .ok_or(LedgerError::AccountNotFound(id))
}

fn account_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Account> {
    let deleted_at: Option<DateTime<Utc>> = row.get(5)?;
    Ok(Account {
        id: row.get(0)?,
        owner: row.get(1)?,
        balance: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
        state: AccountState::from_deleted_at(deleted_at),
    })
}

fn entry_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        account_id: row.get(1)?,
        amount: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn transfer_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transfer> {
    Ok(Transfer {
        id: row.get(0)?,
        from_account_id: row.get(1)?,
        to_account_id: row.get(2)?,
        amount: row.get(3)?,
        outgoing_entry_id: row.get(4)?,
        incoming_entry_id: row.get(5)?,
        created_at: row.get(6)?,
    })
}
