//! Common types and constants used across the report pipeline

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Field delimiter of every input table
pub const FIELD_DELIMITER: u8 = b';';

/// Purchase prices in the catalog include 21% VAT
pub const VAT_DIVISOR: Decimal = Decimal::from_parts(121, 0, 0, false, 2);

/// Days-of-stock value for products without measurable sales
pub const LONG_STOCK_SENTINEL_DAYS: i64 = 500;

/// Rows lasting fewer days than this are highlighted by default
pub const DEFAULT_STOCK_DAYS_THRESHOLD: i64 = 30;

/// Days per month used when converting between daily and monthly rates
pub const DAYS_PER_MONTH: i64 = 30;

/// First day of the period covered by the movement log
pub fn sales_epoch() -> NaiveDate {
    // 2023-09-01 is a valid calendar date
    NaiveDate::from_ymd_opt(2023, 9, 1).unwrap_or_default()
}

/// Currencies prices can be quoted in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Czk,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Czk => "CZK",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary amount together with its currency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Money {
    pub amount: Decimal,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn czk(amount: Decimal) -> Self {
        Self::new(amount, Currency::Czk)
    }

    /// Strip VAT and round to one decimal place
    pub fn without_vat(self) -> Self {
        Self {
            amount: round_half_away(self.amount / VAT_DIVISOR, 1),
            currency: self.currency,
        }
    }

    /// Render as `"<amount> <currency>"` with a fixed number of decimals
    pub fn format(&self, decimal_places: u32) -> String {
        format!("{} {}", format_fixed(self.amount, decimal_places), self.currency)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format(1))
    }
}

/// Supported report languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "cs", alias = "czech")]
    Czech,
    #[serde(rename = "en", alias = "english")]
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Czech => "cs",
            Language::English => "en",
        }
    }

    /// Parse a language code, falling back to `None` for unknown codes
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "cs" | "cz" | "czech" => Some(Language::Czech),
            "en" | "english" => Some(Language::English),
            _ => None,
        }
    }
}

/// Round to `dp` decimal places, midpoints away from zero
pub fn round_half_away(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Round to `dp` decimal places, midpoints to the even neighbour (`52.5` -> `52`)
pub fn round_half_even(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointNearestEven)
}

/// Render with exactly `dp` decimal places (`50` -> `"50.0"` for `dp = 1`)
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, round_half_away(value, dp))
}
