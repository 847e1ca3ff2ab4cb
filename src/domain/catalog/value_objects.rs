use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Catalog Value Objects
// ============================================================================
//
// Prices and amounts are integers in minor currency units (centavos).
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    #[serde(default)]
    pub bar_code: String,
    pub title: String,
    pub description: String,
    pub unit_of_measurement: String,
    pub quantity_in_units: i64,
    pub buy_price: i64,
    pub sale_price: i64,
}

/// Available amount of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub id: Uuid,
    pub product_id: Uuid,
    pub amount: i64,
    #[serde(default)]
    pub price_unit: i64,
}

/// Body for both product creation and product update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub bar_code: String,
    pub title: String,
    pub description: String,
    pub unit_of_measurement: String,
    pub quantity_in_units: i64,
    pub buy_price: i64,
    pub sale_price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStock {
    pub product_id: Uuid,
    pub amount: i64,
    pub limit: i64,
}

// ============================================================================
// Unit Tests
// ============================================================================
