// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Every failure the ledger core can produce. Business-rule violations are
/// always typed; a bare storage error only ever means the backing database
/// itself failed.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("account {0} not found")]
    AccountNotFound(i64),

    #[error("source account {0} not found")]
    SrcAccountNotFound(i64),

    #[error("destination account {0} not found")]
    DstAccountNotFound(i64),

    #[error("entry {0} not found")]
    EntryNotFound(i64),

    #[error("transfer {0} not found")]
    TransferNotFound(i64),

    #[error("cannot deposit money into other user's accounts")]
    UnauthorizedDeposit,

    #[error("cannot withdraw money from other user's accounts")]
    UnauthorizedWithdraw,

    #[error("cannot transfer money from other user's accounts")]
    UnauthorizedTransfer,

    #[error("cannot view other user's records")]
    UnauthorizedView,

    #[error(
        "not enough money in account {account_id}: balance {balance}, requested {requested}"
    )]
    InsufficientFunds {
        account_id: i64,
        balance: i64,
        requested: i64,
    },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl LedgerError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::AccountNotFound(_)
                | LedgerError::SrcAccountNotFound(_)
                | LedgerError::DstAccountNotFound(_)
                | LedgerError::EntryNotFound(_)
                | LedgerError::TransferNotFound(_)
        )
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            LedgerError::UnauthorizedDeposit
                | LedgerError::UnauthorizedWithdraw
                | LedgerError::UnauthorizedTransfer
                | LedgerError::UnauthorizedView
        )
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
