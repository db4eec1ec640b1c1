//! # Money Type
//!
//! Integer-cents money arithmetic.
//!
//! ## Why Integer Cents?
//! Floating point cannot represent most decimal fractions exactly
//! (`0.1 + 0.2 != 0.3`), which is unacceptable for prices. All monetary
//! values in Stockroom are `i64` cents wrapped in [`Money`]; floats appear
//! only at the display/export edge, never in arithmetic or storage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A monetary amount in integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a money value from cents (never from floats!).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the amount in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks whether the amount is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a unit count, saturating at the i64 boundary.
    ///
    /// Saturation rather than wrap keeps a pathological quantity from
    /// silently producing a nonsense total.
    #[inline]
    pub fn times(&self, quantity: i64) -> Money {
        Money(self.0.saturating_mul(quantity))
    }

    /// Parses a decimal string like `"5"`, `"5.9"` or `"5.99"` into cents.
    ///
    /// At most two fraction digits are accepted; negative amounts are
    /// rejected since nothing in the system prices below zero.
    pub fn parse(input: &str) -> Result<Money, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            });
        }
        if input.starts_with('-') {
            return Err(invalid("negative amounts are not allowed"));
        }

        let (whole, frac) = match input.split_once('.') {
            Some((w, f)) => (w, f),
            None => (input, ""),
        };

        if frac.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("not a number"))?
        };

        let frac_cents: i64 = if frac.is_empty() {
            0
        } else {
            // "9" means 90 cents, "09" means 9 cents
            let parsed: i64 = frac.parse().map_err(|_| invalid("not a number"))?;
            if frac.len() == 1 {
                parsed * 10
            } else {
                parsed
            }
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .map(Money)
            .ok_or_else(|| invalid("amount too large"))
    }

    /// Returns the amount as a float for display and export only.
    #[inline]
    pub fn as_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_roundtrip() {
        let price = Money::from_cents(1099);
        assert_eq!(price.cents(), 1099);
        assert_eq!(price.to_string(), "10.99");
    }

    #[test]
    fn test_display_pads_cents() {
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-130).to_string(), "-1.30");
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(Money::parse("5").unwrap().cents(), 500);
        assert_eq!(Money::parse("5.0").unwrap().cents(), 500);
        assert_eq!(Money::parse("5.00").unwrap().cents(), 500);
        assert_eq!(Money::parse("5.99").unwrap().cents(), 599);
        assert_eq!(Money::parse("0.09").unwrap().cents(), 9);
        assert_eq!(Money::parse(".50").unwrap().cents(), 50);
        assert_eq!(Money::parse(" 12.30 ").unwrap().cents(), 1230);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.999").is_err());
        assert!(Money::parse("-5").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }

    #[test]
    fn test_times() {
        let line_total = Money::from_cents(500).times(3);
        assert_eq!(line_total.cents(), 1500);
    }
}
