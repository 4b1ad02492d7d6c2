// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Bankledger", "bankledger"));

/// Platform data dir, overridable with BANKLEDGER_DB for tests and scripting.
pub fn db_path() -> Result<PathBuf> {
    if let Ok(p) = std::env::var("BANKLEDGER_DB") {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("bankledger.sqlite"))
}

/// Opens one connection to the database at `path` with the pragmas every
/// connection needs: foreign keys on, WAL so readers and the writer do not
/// starve each other, and a busy timeout so concurrent writers queue instead
/// of failing fast.
pub fn open(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.busy_timeout(std::time::Duration::from_secs(10))?;
    Ok(conn)
}

/// Idempotent schema setup. The CHECK constraints are a last line of defense;
/// the ledger engine enforces the same rules before writing.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner TEXT NOT NULL,
        balance INTEGER NOT NULL DEFAULT 0 CHECK(balance >= 0),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        deleted_at TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_accounts_owner ON accounts(owner);

    CREATE TABLE IF NOT EXISTS entries(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        account_id INTEGER NOT NULL,
        amount INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        FOREIGN KEY(account_id) REFERENCES accounts(id)
    );
    CREATE INDEX IF NOT EXISTS idx_entries_account ON entries(account_id);

    CREATE TABLE IF NOT EXISTS transfers(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        from_account_id INTEGER NOT NULL,
        to_account_id INTEGER NOT NULL,
        amount INTEGER NOT NULL CHECK(amount > 0),
        outgoing_entry_id INTEGER NOT NULL,
        incoming_entry_id INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        FOREIGN KEY(from_account_id) REFERENCES accounts(id),
        FOREIGN KEY(to_account_id) REFERENCES accounts(id),
        FOREIGN KEY(outgoing_entry_id) REFERENCES entries(id),
        FOREIGN KEY(incoming_entry_id) REFERENCES entries(id)
    );
    CREATE INDEX IF NOT EXISTS idx_transfers_from ON transfers(from_account_id);
    CREATE INDEX IF NOT EXISTS idx_transfers_to ON transfers(to_account_id);
    "#,
    )
}
