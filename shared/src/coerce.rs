//! Coercion of locale-formatted numeric text
//!
//! Input exports write decimals with a comma separator (`"12,5"`). Anything
//! that does not parse after normalization counts as zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a comma-decimal string, substituting zero for empty or malformed text
pub fn parse_locale_decimal(raw: &str) -> Decimal {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .unwrap_or(Decimal::ZERO)
}

/// Parse a comma-decimal quantity and truncate it toward zero
pub fn parse_locale_quantity(raw: &str) -> i64 {
    parse_locale_decimal(raw).trunc().to_i64().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_is_decimal_separator() {
        assert_eq!(parse_locale_decimal("12,5"), Decimal::new(125, 1));
        assert_eq!(parse_locale_decimal(" -3,25 "), Decimal::new(-325, 2));
    }

    #[test]
    fn period_still_parses() {
        assert_eq!(parse_locale_decimal("7.75"), Decimal::new(775, 2));
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(parse_locale_decimal(""), Decimal::ZERO);
        assert_eq!(parse_locale_decimal("   "), Decimal::ZERO);
        assert_eq!(parse_locale_decimal("n/a"), Decimal::ZERO);
        assert_eq!(parse_locale_decimal("1,2,3"), Decimal::ZERO);
    }

    #[test]
    fn quantity_truncates() {
        assert_eq!(parse_locale_quantity("4,9"), 4);
        assert_eq!(parse_locale_quantity("-4,9"), -4);
        assert_eq!(parse_locale_quantity("abc"), 0);
    }
}
