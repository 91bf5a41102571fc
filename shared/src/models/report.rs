//! Derived report models

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{
    format_fixed, round_half_even, Language, Money, DAYS_PER_MONTH, LONG_STOCK_SENTINEL_DAYS,
};

/// How long the free stock of a product lasts at the current sales rate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StockCoverage {
    /// Stock lasts roughly `days` more days
    Lasting { days: i64 },
    /// Product sells but nothing is free, reorder now
    Depleted,
    /// No measurable sales, stock is not sales-constrained
    NotSalesConstrained,
}

impl StockCoverage {
    /// Classify a product from its free stock and average monthly sales
    pub fn assess(free_quantity: i64, avg_monthly_sales: i64) -> Self {
        let monthly = Decimal::from(avg_monthly_sales.unsigned_abs());
        if monthly.is_zero() {
            return StockCoverage::NotSalesConstrained;
        }

        let months_left = Decimal::from(free_quantity) / monthly;
        if months_left > Decimal::ZERO {
            let days = round_half_even(months_left * Decimal::from(DAYS_PER_MONTH), 0);
            StockCoverage::Lasting {
                days: days.to_i64().unwrap_or(i64::MAX),
            }
        } else {
            StockCoverage::Depleted
        }
    }

    /// Numeric days-of-stock value shown in the report
    pub fn days(&self) -> i64 {
        match self {
            StockCoverage::Lasting { days } => *days,
            StockCoverage::Depleted => 0,
            StockCoverage::NotSalesConstrained => LONG_STOCK_SENTINEL_DAYS,
        }
    }
}

/// One line of the warehouse report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportRow {
    pub product_code: String,
    pub product_name: String,
    pub purchase_price: Money,
    pub free_quantity: i64,
    /// Free quantity times purchase price, rounded to one decimal
    pub inventory_value: Decimal,
    pub avg_monthly_sales: i64,
    /// Absolute net movement since the start of the sales period
    pub total_sales_since_period_start: i64,
    /// Signed net movement, kept so increases and decreases stay distinguishable
    pub net_movement: i64,
    pub last_receipt_date: Option<String>,
    pub days_of_stock_remaining: i64,
    pub coverage: StockCoverage,
}

impl ReportRow {
    /// Inventory value with one fixed decimal, e.g. `"50.0"`
    pub fn inventory_value_text(&self) -> String {
        format_fixed(self.inventory_value, 1)
    }

    /// Whether the stock runs out sooner than `threshold_days`
    pub fn is_at_risk(&self, threshold_days: i64) -> bool {
        self.days_of_stock_remaining < threshold_days
    }
}

/// The complete report of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    /// Rows sorted by days of stock remaining, soonest first
    pub rows: Vec<ReportRow>,
    /// Sum of unrendered per-row inventory values
    pub total_inventory_value: Money,
    pub generated_on: NaiveDate,
    pub sales_period_start: NaiveDate,
    pub sales_period_days: i64,
}

impl Report {
    pub fn at_risk_count(&self, threshold_days: i64) -> usize {
        self.rows.iter().filter(|row| row.is_at_risk(threshold_days)).count()
    }
}

/// Report columns in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportColumn {
    ProductCode,
    ProductName,
    PurchasePrice,
    FreeQuantity,
    InventoryValue,
    AvgMonthlySales,
    TotalSales,
    LastReceipt,
    DaysOfStock,
}

impl ReportColumn {
    pub const ALL: [ReportColumn; 9] = [
        ReportColumn::ProductCode,
        ReportColumn::ProductName,
        ReportColumn::PurchasePrice,
        ReportColumn::FreeQuantity,
        ReportColumn::InventoryValue,
        ReportColumn::AvgMonthlySales,
        ReportColumn::TotalSales,
        ReportColumn::LastReceipt,
        ReportColumn::DaysOfStock,
    ];

    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (ReportColumn::ProductCode, Language::Czech) => "Kod produktu",
            (ReportColumn::ProductCode, Language::English) => "Product code",
            (ReportColumn::ProductName, Language::Czech) => "Nazev produktu",
            (ReportColumn::ProductName, Language::English) => "Product name",
            (ReportColumn::PurchasePrice, Language::Czech) => "Nakupni cena bez DPH",
            (ReportColumn::PurchasePrice, Language::English) => "Purchase price excl. VAT",
            (ReportColumn::FreeQuantity, Language::Czech) => "Skladem ks",
            (ReportColumn::FreeQuantity, Language::English) => "In stock (pcs)",
            (ReportColumn::InventoryValue, Language::Czech) => "Hodnota skladu v CZK",
            (ReportColumn::InventoryValue, Language::English) => "Stock value in CZK",
            (ReportColumn::AvgMonthlySales, Language::Czech) => "Prodeje/mesic (prumer)",
            (ReportColumn::AvgMonthlySales, Language::English) => "Sales/month (avg)",
            (ReportColumn::TotalSales, Language::Czech) => "Prodeje od 1.9.2023",
            (ReportColumn::TotalSales, Language::English) => "Sales since 1.9.2023",
            (ReportColumn::LastReceipt, Language::Czech) => "Posl.příjem",
            (ReportColumn::LastReceipt, Language::English) => "Last receipt",
            (ReportColumn::DaysOfStock, Language::Czech) => "Kolik dni vydrzi sklad?",
            (ReportColumn::DaysOfStock, Language::English) => "Days of stock left",
        }
    }

    /// Cell text of `row` in this column
    pub fn cell(&self, row: &ReportRow, decimal_places: u32) -> String {
        match self {
            ReportColumn::ProductCode => row.product_code.clone(),
            ReportColumn::ProductName => row.product_name.clone(),
            ReportColumn::PurchasePrice => row.purchase_price.format(decimal_places),
            ReportColumn::FreeQuantity => row.free_quantity.to_string(),
            ReportColumn::InventoryValue => format_fixed(row.inventory_value, decimal_places),
            ReportColumn::AvgMonthlySales => row.avg_monthly_sales.to_string(),
            ReportColumn::TotalSales => row.total_sales_since_period_start.to_string(),
            ReportColumn::LastReceipt => row.last_receipt_date.clone().unwrap_or_default(),
            ReportColumn::DaysOfStock => row.days_of_stock_remaining.to_string(),
        }
    }

    /// Numeric columns are right-aligned when rendered
    pub fn is_numeric(&self) -> bool {
        !matches!(
            self,
            ReportColumn::ProductCode | ReportColumn::ProductName | ReportColumn::LastReceipt
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_cases() {
        assert_eq!(StockCoverage::assess(60, 30), StockCoverage::Lasting { days: 60 });
        assert_eq!(StockCoverage::assess(0, 10), StockCoverage::Depleted);
        assert_eq!(StockCoverage::assess(-5, 10), StockCoverage::Depleted);
        assert_eq!(StockCoverage::assess(50, 0), StockCoverage::NotSalesConstrained);
    }

    #[test]
    fn coverage_days() {
        assert_eq!(StockCoverage::assess(60, 30).days(), 60);
        assert_eq!(StockCoverage::assess(0, 10).days(), 0);
        assert_eq!(StockCoverage::assess(50, 0).days(), 500);
        assert_eq!(StockCoverage::assess(-5, 10).days(), 0);
    }

    #[test]
    fn coverage_rounds_to_whole_days() {
        // 7 / 4 months = 52.5 days, ties go to the even day
        assert_eq!(StockCoverage::assess(7, 4).days(), 52);
        // 13 / 4 months = 97.5 days
        assert_eq!(StockCoverage::assess(13, 4).days(), 98);
        // 10 / 3 months = 100 days
        assert_eq!(StockCoverage::assess(10, 3).days(), 100);
    }

    #[test]
    fn negative_sales_rate_uses_magnitude() {
        assert_eq!(StockCoverage::assess(60, -30).days(), 60);
    }

    #[test]
    fn every_language_labels_every_column() {
        for language in [Language::Czech, Language::English] {
            for column in ReportColumn::ALL {
                assert!(!column.label(language).is_empty());
            }
        }
    }
}
