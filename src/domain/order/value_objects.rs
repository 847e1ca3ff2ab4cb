use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalog::Product;
use crate::domain::customer::Customer;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Lifecycle: Pending → Approved. Approved is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Approved,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown order status: {0:?} (expected \"pending\" or \"approved\")")]
pub struct ParseStatusError(pub String);

impl std::str::FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(OrderStatus::Pending),
            "approved" => Ok(OrderStatus::Approved),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A finalized sale order as the server reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub status: OrderStatus,
    pub price: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
}

impl Order {
    /// Flip to Approved. Returns false when the order already was.
    pub fn approve(&mut self) -> bool {
        match self.status {
            OrderStatus::Pending => {
                self.status = OrderStatus::Approved;
                true
            }
            OrderStatus::Approved => false,
        }
    }
}

/// One line of a finalized order, as returned by the order detail call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderProduct {
    pub id: Uuid,
    pub product: Product,
    pub quantity: i64,
    pub total_price: i64,
}

/// Only the product id and quantity cross the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub id: Uuid,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    pub products: Vec<OrderLineRequest>,
}

/// Line record echoed back by order creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedProduct {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i64,
    #[serde(default)]
    pub total_price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedOrder {
    pub order: Order,
    #[serde(default)]
    pub order_products: Vec<OrderedProduct>,
}

// ============================================================================
// Unit Tests
// ============================================================================
