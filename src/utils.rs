// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::LedgerError;

/// Strict `YYYY-MM-DD`; chrono alone would also take unpadded fields.
pub fn parse_date(s: &str) -> Result<NaiveDate, LedgerError> {
    let s = s.trim();
    let b = s.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return Err(LedgerError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| LedgerError::InvalidDate(s.to_string()))
}

/// Most fractional digits an amount may carry.
pub const MAX_SCALE: u32 = 2;

/// Amounts must stay strictly below this magnitude.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000_000;

/// A money amount: at most cents, below `MAX_AMOUNT_UNITS`, and `-0` folded
/// into `0`.
pub fn parse_decimal(s: &str) -> Result<Decimal, LedgerError> {
    let s = s.trim();
    let invalid = || LedgerError::InvalidAmount(s.to_string());
    let mut d = s.parse::<Decimal>().map_err(|_| invalid())?;
    if d.normalize().scale() > MAX_SCALE || d.abs() >= Decimal::from(MAX_AMOUNT_UNITS) {
        return Err(invalid());
    }
    if d.is_zero() {
        d.set_sign_positive(true);
    }
    Ok(d)
}

/// Opening balance for a new source: blank means zero.
pub fn parse_balance(s: &str) -> Result<Decimal, LedgerError> {
    if s.trim().is_empty() {
        return Ok(Decimal::ZERO);
    }
    parse_decimal(s)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!(
        "{:.2}",
        d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_must_be_padded_iso() {
        assert_eq!(
            parse_date("2024-01-05").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
        assert_eq!(
            parse_date(" 2024-01-05 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
        for bad in ["2024-1-5", "05/01/2024", "2024-02-30", "", "20240105xx"] {
            assert!(
                matches!(parse_date(bad), Err(LedgerError::InvalidDate(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn decimal_parsing_keeps_scale() {
        assert_eq!(parse_decimal("12.50").unwrap().to_string(), "12.50");
        assert_eq!(parse_decimal(" -3 ").unwrap(), Decimal::from(-3));
        assert!(matches!(
            parse_decimal("twelve"),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(parse_decimal(""), Err(LedgerError::InvalidAmount(_))));
    }

    #[test]
    fn decimal_parsing_bounds_scale_and_magnitude() {
        assert_eq!(parse_decimal("1.000").unwrap(), Decimal::ONE);
        assert_eq!(
            parse_decimal("999999999999999.99").unwrap().to_string(),
            "999999999999999.99"
        );
        for bad in [
            "0.001",
            "0.0000000000000000000000000001",
            "1000000000000000",
            "-1000000000000000",
            "79228162514264337593543950335",
        ] {
            assert!(
                matches!(parse_decimal(bad), Err(LedgerError::InvalidAmount(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn negative_zero_is_plain_zero() {
        for raw in ["-0", "-0.00"] {
            let d = parse_decimal(raw).unwrap();
            assert!(d.is_zero());
            assert!(d.is_sign_positive());
            assert!(!d.to_string().starts_with('-'));
        }
    }

    #[test]
    fn blank_balance_is_zero() {
        assert_eq!(parse_balance("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_balance("   ").unwrap(), Decimal::ZERO);
        assert_eq!(parse_balance("100").unwrap(), Decimal::from(100));
    }

    #[test]
    fn money_rounds_to_cents() {
        assert_eq!(fmt_money(&Decimal::new(12345, 3)), "12.35");
        assert_eq!(fmt_money(&Decimal::from(7)), "7.00");
    }
}
