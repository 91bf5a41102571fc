//! Movement log aggregation

use std::collections::BTreeMap;

use crate::models::{MovementRecord, MovementSummary};

/// Collapse movement records into one net quantity per product ID
///
/// Output is ordered by ID. Products without movements produce no row.
pub fn summarize_movements(records: &[MovementRecord]) -> Vec<MovementSummary> {
    let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
    for record in records {
        let total = totals.entry(record.id.as_str()).or_insert(0);
        *total = total.saturating_add(record.quantity);
    }

    totals
        .into_iter()
        .map(|(id, quantity)| MovementSummary {
            id: id.to_string(),
            quantity,
        })
        .collect()
}
