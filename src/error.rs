// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error kinds returned by the ledger store and the posting engine.

use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid amount '{0}', expected a decimal below 10^15 with at most 2 decimal places")]
    InvalidAmount(String),

    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Invalid category type '{0}', must be 'income' or 'expense'")]
    InvalidCategory(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Initial balance cannot be negative")]
    InvalidBalance,

    #[error("Source name cannot be empty")]
    InvalidSourceName,

    #[error("Invalid transaction id '{0}'")]
    InvalidTransactionId(String),

    #[error("Source '{0}' already exists")]
    DuplicateSource(String),

    #[error("Source '{0}' not found")]
    UnknownAccount(String),

    #[error("Source '{source_name}' has {available} available, cannot spend {requested}")]
    InsufficientFunds {
        source_name: String,
        available: Decimal,
        requested: Decimal,
    },

    #[error("{0} would exceed the supported range")]
    Overflow(String),

    /// Storage detail stays out of the message; it is reachable via `source()`.
    #[error("Internal storage failure")]
    Storage(#[from] rusqlite::Error),
}

impl LedgerError {
    /// Stable snake_case code for adapters that key messages or statuses on it.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "invalid_amount",
            Self::NegativeAmount => "negative_amount",
            Self::InvalidCategory(_) => "invalid_category",
            Self::InvalidDate(_) => "invalid_date",
            Self::InvalidBalance => "invalid_balance",
            Self::InvalidSourceName => "invalid_source_name",
            Self::InvalidTransactionId(_) => "invalid_transaction_id",
            Self::DuplicateSource(_) => "duplicate_source",
            Self::UnknownAccount(_) => "unknown_account",
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::Overflow(_) => "overflow",
            Self::Storage(_) => "storage_failure",
        }
    }

    /// True for every kind the caller can fix by changing its input.
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn storage_failure_hides_detail() {
        let err = LedgerError::from(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.to_string(), "Internal storage failure");
        assert_eq!(err.kind(), "storage_failure");
        assert!(!err.is_user_error());
        assert!(err.source().is_some());
    }

    #[test]
    fn business_errors_are_user_errors() {
        let err = LedgerError::InsufficientFunds {
            source_name: "Cash".into(),
            available: Decimal::new(20000, 2),
            requested: Decimal::new(250, 0),
        };
        assert!(err.is_user_error());
        assert_eq!(err.kind(), "insufficient_funds");
        assert_eq!(
            err.to_string(),
            "Source 'Cash' has 200.00 available, cannot spend 250"
        );
        assert_eq!(LedgerError::NegativeAmount.kind(), "negative_amount");
        assert_eq!(
            LedgerError::DuplicateSource("Wallet".into()).to_string(),
            "Source 'Wallet' already exists"
        );
    }

    #[test]
    fn overflow_names_the_figure() {
        let err = LedgerError::Overflow("Balance of 'Cash'".into());
        assert_eq!(err.kind(), "overflow");
        assert!(err.is_user_error());
        assert_eq!(
            err.to_string(),
            "Balance of 'Cash' would exceed the supported range"
        );
    }
}
