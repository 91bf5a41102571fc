//! Warehouse stock snapshot models

use serde::{Deserialize, Serialize};

/// Free stock of one product at export time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockSnapshot {
    pub id: String,
    pub free_quantity: i64,
    /// Last receipt date as printed by the warehouse system
    pub last_receipt: String,
}
