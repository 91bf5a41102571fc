//! Joining the input tables and deriving report metrics

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::ReportError;
use crate::models::{
    CatalogProduct, MovementSummary, Report, ReportRow, StockCoverage, StockSnapshot,
};
use crate::types::{round_half_away, sales_epoch, Money, DAYS_PER_MONTH};

/// Warehouse side of the join: stock snapshot with its net movement
#[derive(Debug, Clone, Default)]
struct WarehouseEntry<'a> {
    free_quantity: i64,
    last_receipt: Option<&'a str>,
    net_movement: i64,
}

/// Whole days elapsed since the start of the sales period
pub fn sales_period_days(today: NaiveDate) -> Result<i64, ReportError> {
    let epoch = sales_epoch();
    let days = (today - epoch).num_days();
    if days <= 0 {
        return Err(ReportError::SalesPeriodNotStarted { today, epoch });
    }
    Ok(days)
}

/// Average monthly sales as a non-negative whole number of pieces
///
/// Fractions are dropped, so products selling less than one piece a month
/// count as not selling at all.
pub fn average_monthly_sales(net_movement: i64, period_days: i64) -> i64 {
    if period_days <= 0 {
        return 0;
    }
    let monthly = Decimal::from(net_movement) / Decimal::from(period_days)
        * Decimal::from(DAYS_PER_MONTH);
    monthly.trunc().abs().to_i64().unwrap_or(i64::MAX)
}

/// Value of the free stock at purchase price, rounded to one decimal
///
/// `None` when the product does not fit a decimal.
pub fn inventory_value(free_quantity: i64, purchase_price: &Money) -> Option<Decimal> {
    Decimal::from(free_quantity)
        .checked_mul(purchase_price.amount)
        .map(|value| round_half_away(value, 1))
}

/// Join stock with movements, keyed by product ID
fn warehouse_entries<'a>(
    stock: &'a [StockSnapshot],
    movements: &[MovementSummary],
) -> HashMap<&'a str, WarehouseEntry<'a>> {
    let net_by_id: HashMap<&str, i64> = movements
        .iter()
        .map(|summary| (summary.id.as_str(), summary.quantity))
        .collect();

    let mut entries = HashMap::with_capacity(stock.len());
    for snapshot in stock {
        if entries.contains_key(snapshot.id.as_str()) {
            tracing::warn!(id = %snapshot.id, "Duplicate stock snapshot row ignored");
            continue;
        }
        entries.insert(
            snapshot.id.as_str(),
            WarehouseEntry {
                free_quantity: snapshot.free_quantity,
                last_receipt: Some(snapshot.last_receipt.as_str()),
                net_movement: net_by_id.get(snapshot.id.as_str()).copied().unwrap_or(0),
            },
        );
    }
    entries
}

/// Derive one report row for a catalog product
fn derive_row(
    product: &CatalogProduct,
    entry: &WarehouseEntry<'_>,
    period_days: i64,
) -> Result<ReportRow, ReportError> {
    let avg_monthly_sales = average_monthly_sales(entry.net_movement, period_days);
    let coverage = StockCoverage::assess(entry.free_quantity, avg_monthly_sales);
    let value = inventory_value(entry.free_quantity, &product.purchase_price).ok_or_else(|| {
        ReportError::ValueOverflow {
            product_code: product.code.clone(),
        }
    })?;

    Ok(ReportRow {
        product_code: product.code.clone(),
        product_name: product.name.clone(),
        purchase_price: product.purchase_price,
        free_quantity: entry.free_quantity,
        inventory_value: value,
        avg_monthly_sales,
        total_sales_since_period_start: entry.net_movement.saturating_abs(),
        net_movement: entry.net_movement,
        last_receipt_date: entry.last_receipt.map(str::to_string),
        days_of_stock_remaining: coverage.days(),
        coverage,
    })
}

/// Build the report: catalog left-joined with stock and net movements
///
/// Every catalog product yields exactly one row; products unknown to the
/// catalog are dropped. Rows are sorted by days of stock remaining.
pub fn build_report(
    catalog: &[CatalogProduct],
    stock: &[StockSnapshot],
    movements: &[MovementSummary],
    today: NaiveDate,
) -> Result<Report, ReportError> {
    let period_days = sales_period_days(today)?;
    let warehouse = warehouse_entries(stock, movements);
    let missing = WarehouseEntry::default();

    let mut rows = catalog
        .iter()
        .map(|product| {
            let entry = warehouse.get(product.code.as_str()).unwrap_or(&missing);
            derive_row(product, entry, period_days)
        })
        .collect::<Result<Vec<ReportRow>, ReportError>>()?;

    let mut total = Decimal::ZERO;
    for row in &rows {
        total = total
            .checked_add(row.inventory_value)
            .ok_or_else(|| ReportError::ValueOverflow {
                product_code: row.product_code.clone(),
            })?;
    }
    rows.sort_by_key(|row| row.days_of_stock_remaining);

    tracing::info!(
        products = rows.len(),
        stock_rows = stock.len(),
        period_days,
        total_value = %total,
        "Report derived"
    );

    Ok(Report {
        rows,
        total_inventory_value: Money::czk(total),
        generated_on: today,
        sales_period_start: sales_epoch(),
        sales_period_days: period_days,
    })
}
