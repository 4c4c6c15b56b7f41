//! Money value object: an amount in minor units plus its currency code.
//!
//! Provider prices arrive as decimal strings ("450.00"). Storing minor units
//! keeps aggregation exact; display is always two decimal places.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Minor units per major unit. Every currency the providers quote uses two.
const MINOR_PER_MAJOR: i64 = 100;

/// Errors raised by money parsing and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("Invalid currency code '{0}'")]
    InvalidCurrency(String),

    #[error("Cannot combine {left} with {right}")]
    CurrencyMismatch { left: String, right: String },

    #[error("Amount overflow")]
    Overflow,
}

/// A non-negative amount of money in a single currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount_minor: i64,
    currency: String,
}

impl Money {
    /// Creates money from minor units (cents) and an ISO 4217 code.
    pub fn from_minor(amount_minor: i64, currency: impl AsRef<str>) -> Result<Self, MoneyError> {
        if amount_minor < 0 {
            return Err(MoneyError::InvalidAmount(amount_minor.to_string()));
        }
        Ok(Self {
            amount_minor,
            currency: normalize_currency(currency.as_ref())?,
        })
    }

    /// Creates money from whole major units.
    pub fn from_major(amount: i64, currency: impl AsRef<str>) -> Result<Self, MoneyError> {
        let minor = amount.checked_mul(MINOR_PER_MAJOR).ok_or(MoneyError::Overflow)?;
        Self::from_minor(minor, currency)
    }

    /// Parses a decimal price string such as `"450.00"`, `"99.5"` or `"300"`.
    ///
    /// More than two fractional digits are rounded half-up.
    pub fn parse(amount: &str, currency: impl AsRef<str>) -> Result<Self, MoneyError> {
        let trimmed = amount.trim();
        let invalid = || MoneyError::InvalidAmount(amount.to_string());

        let (whole, fraction) = match trimmed.split_once('.') {
            Some((w, f)) => (w, f),
            None => (trimmed, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let mut digits = fraction.chars().map(|c| i64::from(c as u8 - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().map(|d| d >= 5).unwrap_or(false);

        let minor = whole_value
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|m| m.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .ok_or(MoneyError::Overflow)?;

        Self::from_minor(minor, currency)
    }

    /// Amount in minor units.
    pub fn amount_minor(&self) -> i64 {
        self.amount_minor
    }

    /// ISO 4217 currency code.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Adds two amounts of the same currency.
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }
        let amount_minor = self
            .amount_minor
            .checked_add(other.amount_minor)
            .ok_or(MoneyError::Overflow)?;
        Ok(Money {
            amount_minor,
            currency: self.currency.clone(),
        })
    }

    /// Splits the amount evenly across `parts`, rounding to the nearest minor unit.
    ///
    /// Zero parts yields the whole amount.
    pub fn divided_by(&self, parts: u32) -> Money {
        if parts == 0 {
            return self.clone();
        }
        let parts = i64::from(parts);
        Money {
            amount_minor: (self.amount_minor + parts / 2) / parts,
            currency: self.currency.clone(),
        }
    }

    /// Converts into another currency at `rate` for display purposes.
    pub fn converted(&self, rate: f64, currency: impl AsRef<str>) -> Result<Money, MoneyError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(MoneyError::InvalidAmount(rate.to_string()));
        }
        let converted = (self.amount_minor as f64 * rate).round();
        if converted > i64::MAX as f64 {
            return Err(MoneyError::Overflow);
        }
        Money::from_minor(converted as i64, currency)
    }

    /// Amount as a plain decimal string without the currency, e.g. `"450.00"`.
    pub fn amount_string(&self) -> String {
        format!(
            "{}.{:02}",
            self.amount_minor / MINOR_PER_MAJOR,
            self.amount_minor % MINOR_PER_MAJOR
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount_string(), self.currency)
    }
}

fn normalize_currency(code: &str) -> Result<String, MoneyError> {
    let code = code.trim().to_ascii_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(MoneyError::InvalidCurrency(code));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parsing {
        use super::*;

        #[test]
        fn parses_two_decimal_price() {
            let m = Money::parse("450.00", "MYR").unwrap();
            assert_eq!(m.amount_minor(), 45_000);
            assert_eq!(m.currency(), "MYR");
        }

        #[test]
        fn parses_whole_and_single_decimal() {
            assert_eq!(Money::parse("300", "EUR").unwrap().amount_minor(), 30_000);
            assert_eq!(Money::parse("99.5", "EUR").unwrap().amount_minor(), 9_950);
        }

        #[test]
        fn rounds_extra_fraction_digits_half_up() {
            assert_eq!(Money::parse("10.005", "EUR").unwrap().amount_minor(), 1_001);
            assert_eq!(Money::parse("10.004", "EUR").unwrap().amount_minor(), 1_000);
        }

        #[test]
        fn rejects_garbage_and_negative() {
            assert!(Money::parse("abc", "EUR").is_err());
            assert!(Money::parse("-5.00", "EUR").is_err());
            assert!(Money::parse("", "EUR").is_err());
            assert!(Money::parse(".", "EUR").is_err());
        }

        #[test]
        fn normalizes_currency_case() {
            assert_eq!(Money::parse("1", "myr").unwrap().currency(), "MYR");
            assert!(Money::parse("1", "ringgit").is_err());
        }
    }

    mod arithmetic {
        use super::*;

        #[test]
        fn adds_same_currency() {
            let a = Money::from_major(450, "MYR").unwrap();
            let b = Money::from_major(300, "MYR").unwrap();
            assert_eq!(a.checked_add(&b).unwrap(), Money::from_major(750, "MYR").unwrap());
        }

        #[test]
        fn refuses_mixed_currencies() {
            let a = Money::from_major(1, "MYR").unwrap();
            let b = Money::from_major(1, "EUR").unwrap();
            assert!(matches!(
                a.checked_add(&b),
                Err(MoneyError::CurrencyMismatch { .. })
            ));
        }

        #[test]
        fn divides_evenly_and_guards_zero() {
            let total = Money::from_major(300, "SGD").unwrap();
            assert_eq!(total.divided_by(2).amount_minor(), 15_000);
            assert_eq!(total.divided_by(0), total);
        }

        #[test]
        fn converts_for_display() {
            let eur = Money::from_major(100, "EUR").unwrap();
            let myr = eur.converted(4.75, "MYR").unwrap();
            assert_eq!(myr.to_string(), "475.00 MYR");
            assert!(eur.converted(0.0, "MYR").is_err());
        }
    }

    #[test]
    fn displays_two_decimals_with_code() {
        assert_eq!(Money::from_minor(5, "EUR").unwrap().to_string(), "0.05 EUR");
        assert_eq!(Money::from_major(750, "MYR").unwrap().to_string(), "750.00 MYR");
    }
}
