// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an account. Closed accounts stay on disk (soft delete)
/// and remain individually retrievable, but are excluded from listings and
/// rejected by every balance-affecting operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum AccountState {
    Active,
    Closed { at: DateTime<Utc> },
}

impl AccountState {
    pub fn from_deleted_at(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            None => AccountState::Active,
            Some(at) => AccountState::Closed { at },
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, AccountState::Active)
    }
}

/// One user's balance holding. Balances are integer minor units (cents) and
/// never go negative; only the ledger engine mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub owner: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub state: AccountState,
}

/// An immutable record of one balance change applied to one account.
/// Positive amount = credit, negative = debit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// A paired debit + credit moving `amount` between two distinct accounts.
/// The referenced entries carry `-amount` and `+amount` respectively and are
/// written in the same transaction as this row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
    pub outgoing_entry_id: i64,
    pub incoming_entry_id: i64,
    pub created_at: DateTime<Utc>,
}
