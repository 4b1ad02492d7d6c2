// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, Result};
use crate::models::Account;

/// What the caller is trying to do with an account. Each action maps to its
/// own unauthorized error so the transport layer can surface a precise
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountAction {
    Deposit,
    Withdraw,
    Transfer,
    View,
}

/// Confirms the authenticated identity owns `account`. The identity is an
/// opaque string already verified by the caller's auth layer; this check is
/// stateless and does no I/O.
pub fn ensure_account_owner(account: &Account, identity: &str, action: AccountAction) -> Result<()> {
    if account.owner == identity {
        return Ok(());
    }
    Err(match action {
        AccountAction::Deposit => LedgerError::UnauthorizedDeposit,
        AccountAction::Withdraw => LedgerError::UnauthorizedWithdraw,
        AccountAction::Transfer => LedgerError::UnauthorizedTransfer,
        AccountAction::View => LedgerError::UnauthorizedView,
    })
}
