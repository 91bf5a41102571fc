//! Product catalog models

use serde::{Deserialize, Serialize};

use crate::types::Money;

/// A product from the e-shop price list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogProduct {
    /// Product code, the join key into warehouse data
    pub code: String,
    pub name: String,
    /// Purchase price without VAT, rounded to one decimal
    pub purchase_price: Money,
}
