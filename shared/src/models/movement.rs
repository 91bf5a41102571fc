//! Warehouse movement models

use serde::{Deserialize, Serialize};

/// One inventory movement event, signed as exported
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovementRecord {
    pub id: String,
    pub quantity: i64,
}

/// Net movement of a single product over the whole log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovementSummary {
    pub id: String,
    pub quantity: i64,
}
