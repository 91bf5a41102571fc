//! Input loading tests
//!
//! Tests for reading the three semicolon-delimited exports:
//! - Locale decimal coercion ("12,5" -> 12.5, garbage -> 0)
//! - Header checks for required columns
//! - Missing files

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::coerce::parse_locale_decimal;
use shared::loader::{load_catalog, read_table};
use shared::{CatalogProduct, LoadError, MovementRecord, StockSnapshot};
use std::str::FromStr;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

const CATALOG_CSV: &str = "\
code;name;purchasePrice;visibility
A-100;Hold kit;121,00;visible
B-200;Mat;;hidden
C-300;Rope;abc;visible
";

const STOCK_CSV: &str = "\
ID;Název;Volné;Posl.příjem
A-100;Hold kit;12,0;03.01.2024
B-200;Mat;7,9;
C-300;Rope;;15.12.2023
";

const MOVEMENTS_CSV: &str = "\
Datum;ID;Množ.
01.10.2023;A-100;-3
02.10.2023;A-100;1,0
03.10.2023;B-200;x
";

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_catalog_prices_are_net_of_vat() {
        let catalog: Vec<CatalogProduct> = read_table(CATALOG_CSV.as_bytes(), "catalog").unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog[0].code, "A-100");
        assert_eq!(catalog[0].name, "Hold kit");
        // 121 / 1.21 = 100
        assert_eq!(catalog[0].purchase_price.amount, dec("100.0"));
        assert_eq!(catalog[0].purchase_price.to_string(), "100.0 CZK");
    }

    #[test]
    fn test_catalog_bad_prices_become_zero() {
        let catalog: Vec<CatalogProduct> = read_table(CATALOG_CSV.as_bytes(), "catalog").unwrap();

        assert_eq!(catalog[1].purchase_price.amount, Decimal::ZERO);
        assert_eq!(catalog[2].purchase_price.amount, Decimal::ZERO);
    }

    #[test]
    fn test_stock_quantities() {
        let stock: Vec<StockSnapshot> = read_table(STOCK_CSV.as_bytes(), "stock").unwrap();

        assert_eq!(stock.len(), 3);
        assert_eq!(stock[0].free_quantity, 12);
        assert_eq!(stock[0].last_receipt, "03.01.2024");
        // Fractional quantities truncate
        assert_eq!(stock[1].free_quantity, 7);
        assert_eq!(stock[1].last_receipt, "");
        assert_eq!(stock[2].free_quantity, 0);
    }

    #[test]
    fn test_movement_quantities() {
        let movements: Vec<MovementRecord> =
            read_table(MOVEMENTS_CSV.as_bytes(), "movements").unwrap();

        let quantities: Vec<i64> = movements.iter().map(|m| m.quantity).collect();
        assert_eq!(quantities, vec![-3, 1, 0]);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let csv = "ID;Množství\nA-100;5\n";
        let result: Result<Vec<MovementRecord>, _> = read_table(csv.as_bytes(), "movements");

        match result {
            Err(LoadError::MissingColumn { source_name, column }) => {
                assert_eq!(source_name, "movements");
                assert_eq!(column, "Množ.");
            }
            other => panic!("expected missing column error, got {:?}", other),
        }
    }

    #[test]
    fn test_comma_delimited_file_is_rejected() {
        let csv = "ID,Volné,Posl.příjem\nA-100,5,01.01.2024\n";
        let result: Result<Vec<StockSnapshot>, _> = read_table(csv.as_bytes(), "stock");
        assert!(matches!(result, Err(LoadError::MissingColumn { .. })));
    }

    #[test]
    fn test_short_rows_are_zero_filled() {
        let csv = "ID;Volné;Posl.příjem\nA-100\n";
        let stock: Vec<StockSnapshot> = read_table(csv.as_bytes(), "stock").unwrap();

        assert_eq!(stock[0].id, "A-100");
        assert_eq!(stock[0].free_quantity, 0);
    }

    #[test]
    fn test_short_row_does_not_stop_the_load() {
        let csv = "code;name;purchasePrice\nA-100;Hold kit\nB-200;Mat;24,2\nC-300\n";
        let catalog: Vec<CatalogProduct> = read_table(csv.as_bytes(), "catalog").unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog[0].name, "Hold kit");
        assert_eq!(catalog[0].purchase_price.amount, Decimal::ZERO);
        assert_eq!(catalog[1].purchase_price.amount, dec("20.0"));
        assert_eq!(catalog[2].name, "");
    }

    #[test]
    fn test_missing_trailing_cell_keeps_earlier_cells() {
        let csv = "ID;Volné;Posl.příjem\nA-100;4\n";
        let stock: Vec<StockSnapshot> = read_table(csv.as_bytes(), "stock").unwrap();

        assert_eq!(stock[0].free_quantity, 4);
        assert_eq!(stock[0].last_receipt, "");
    }

    #[test]
    fn test_long_rows_ignore_surplus_cells() {
        let csv = "ID;Množ.\nA-100;-2;extra;cells\n";
        let movements: Vec<MovementRecord> = read_table(csv.as_bytes(), "movements").unwrap();

        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].quantity, -2);
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let csv = "code;name;purchasePrice\n";
        let catalog: Vec<CatalogProduct> = read_table(csv.as_bytes(), "catalog").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let path = std::env::temp_dir().join("warehouse-report-does-not-exist.csv");
        let result = load_catalog(&path);

        match result {
            Err(LoadError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected I/O error, got {:?}", other),
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for amounts with up to two decimals
    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (-1_000_000i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Comma decimals parse to the same value as period decimals
        #[test]
        fn prop_comma_decimal_matches_period(amount in amount_strategy()) {
            let comma = amount.to_string().replace('.', ",");
            prop_assert_eq!(parse_locale_decimal(&comma), amount);
        }

        /// Text without digits always coerces to exactly zero
        #[test]
        fn prop_non_numeric_is_zero(text in "[a-zA-Z /-]{0,12}") {
            prop_assert_eq!(parse_locale_decimal(&text), Decimal::ZERO);
        }

        /// Every data line of a well-formed export becomes one row
        #[test]
        fn prop_one_row_per_line(quantities in prop::collection::vec(-500i64..500, 0..30)) {
            let mut csv = String::from("ID;Množ.\n");
            for (i, q) in quantities.iter().enumerate() {
                csv.push_str(&format!("P{};{},0\n", i, q));
            }

            let movements: Vec<MovementRecord> = read_table(csv.as_bytes(), "movements").unwrap();
            prop_assert_eq!(movements.len(), quantities.len());
            for (movement, q) in movements.iter().zip(&quantities) {
                prop_assert_eq!(movement.quantity, *q);
            }
        }
    }
}
