// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Conversion between token amounts expressed in different units.

use thiserror::Error;

/// Errors occurring while converting token amounts.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// The amount is not of the form `"<number> <suffix>"`.
    #[error("Invalid value \"{0}\".")]
    InvalidValue(String),
    /// An unknown or wrongly-cased unit suffix.
    #[error("Invalid unit symbol \"{0}\".")]
    InvalidSymbol(String),
}

/// A power-of-thousand token unit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Unit {
    /// One token.
    Iota,
    /// `1_000` tokens.
    Kilo,
    /// `1_000_000` tokens.
    Mega,
    /// `1_000_000_000` tokens.
    Giga,
    /// `1_000_000_000_000` tokens.
    Tera,
    /// `1_000_000_000_000_000` tokens.
    Peta,
}

impl Unit {
    /// Parses a unit from its case-sensitive suffix.
    pub fn from_symbol(symbol: &str) -> Result<Self, Error> {
        match symbol {
            "i" => Ok(Unit::Iota),
            "Ki" => Ok(Unit::Kilo),
            "Mi" => Ok(Unit::Mega),
            "Gi" => Ok(Unit::Giga),
            "Ti" => Ok(Unit::Tera),
            "Pi" => Ok(Unit::Peta),
            _ => Err(Error::InvalidSymbol(symbol.to_string())),
        }
    }

    /// The number of single tokens in one of this unit.
    pub fn factor(self) -> f64 {
        match self {
            Unit::Iota => 1.0,
            Unit::Kilo => 1e3,
            Unit::Mega => 1e6,
            Unit::Giga => 1e9,
            Unit::Tera => 1e12,
            Unit::Peta => 1e15,
        }
    }
}

/// Converts an amount of the form `"<number> <suffix>"` into `symbol` units.
///
/// The amount and its suffix must be separated by exactly one space and the
/// suffix case must match; `"3.141592Pi"` and `"3.141592 pI"` are rejected.
pub fn convert(value: &str, symbol: &str) -> Result<f64, Error> {
    let mut parts = value.split(' ');
    let (amount, from_symbol) = match (parts.next(), parts.next(), parts.next()) {
        (Some(amount), Some(from_symbol), None) => (amount, from_symbol),
        _ => return Err(Error::InvalidValue(value.to_string())),
    };

    let amount: f64 = amount.parse().map_err(|_| Error::InvalidValue(value.to_string()))?;
    let from = Unit::from_symbol(from_symbol)?;
    let to = Unit::from_symbol(symbol)?;

    Ok(amount * (from.factor() / to.factor()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_to_smaller_unit() {
        assert_eq!(convert("1.618 Mi", "i").unwrap(), 1_618_000.0);
    }

    #[test]
    fn convert_to_bigger_unit() {
        assert_eq!(convert("42 i", "Ki").unwrap(), 0.042);
    }

    #[test]
    fn convert_to_same_size_unit() {
        assert_eq!(convert("299792458 Mi", "Mi").unwrap(), 299_792_458.0);
    }

    #[test]
    fn convert_fractional_amount() {
        assert_eq!(convert("1.6182 Ki", "i").unwrap(), 1_618.2);
    }

    #[test]
    fn convert_negative_amount() {
        assert_eq!(convert("-1.618 Ki", "i").unwrap(), -1_618.0);
    }

    #[test]
    fn convert_from_invalid_symbol() {
        assert_eq!(
            convert("3.141592 Xi", "Pi"),
            Err(Error::InvalidSymbol("Xi".to_string()))
        );
    }

    #[test]
    fn convert_to_invalid_symbol() {
        assert_eq!(
            convert("3.141592 Pi", "Xi"),
            Err(Error::InvalidSymbol("Xi".to_string()))
        );
    }

    #[test]
    fn convert_without_space() {
        assert_eq!(
            convert("3.141592Pi", "Gi"),
            Err(Error::InvalidValue("3.141592Pi".to_string()))
        );
    }

    #[test]
    fn convert_wrong_case_symbol() {
        assert_eq!(
            convert("3.141592 pI", "Gi"),
            Err(Error::InvalidSymbol("pI".to_string()))
        );
    }
}
