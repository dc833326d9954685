// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod exporter;
pub mod sources;
pub mod summary;
pub mod transactions;

use crate::error::LedgerError;

/// The command-line flag a user should fix for a given error, if any.
pub fn flag_hint(err: &LedgerError) -> Option<&'static str> {
    match err {
        LedgerError::InvalidAmount(_) | LedgerError::NegativeAmount => Some("--amount"),
        LedgerError::InsufficientFunds { .. } => Some("--amount"),
        LedgerError::InvalidCategory(_) => Some("--type"),
        LedgerError::InvalidDate(_) => Some("--date"),
        LedgerError::InvalidBalance => Some("--balance"),
        LedgerError::InvalidSourceName | LedgerError::DuplicateSource(_) => Some("--name"),
        LedgerError::UnknownAccount(_) => Some("--source"),
        LedgerError::InvalidTransactionId(_) => Some("--id"),
        LedgerError::Overflow(_) | LedgerError::Storage(_) => None,
    }
}

/// Exit status for a failed command: 2 for input the user can fix, 1 otherwise.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<LedgerError>() {
        Some(e) if e.is_user_error() => 2,
        _ => 1,
    }
}

/// One-line message for stderr. Storage detail is logged, never printed.
pub fn user_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<LedgerError>() {
        Some(e) => match flag_hint(e) {
            Some(flag) => format!("{e} (check {flag})"),
            None => e.to_string(),
        },
        None => format!("{err:#}"),
    }
}
