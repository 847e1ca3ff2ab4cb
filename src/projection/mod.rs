// ============================================================================
// Display Projection
// ============================================================================
//
// Pure derivation of human-readable strings from raw records. Views are
// built on every read and never stored, so a mutated raw record (an
// approval, a price change) can never carry stale formatted fields.
//
// Views flatten the raw record next to its formatted fields when serialized.
//
// ============================================================================

pub mod format;

use serde::Serialize;

use crate::domain::catalog::{Product, Stock};
use crate::domain::order::{DraftLine, Order, OrderDraft, OrderProduct};

pub trait Projection {
    type View;

    fn project(&self) -> Self::View;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub status_formatted: String,
    pub price_formatted: String,
    pub created_at_formatted: String,
}

impl Projection for Order {
    type View = OrderView;

    fn project(&self) -> OrderView {
        OrderView {
            order: self.clone(),
            status_formatted: format::status_label(self.status).to_string(),
            price_formatted: format::currency(self.price),
            created_at_formatted: format::date(&self.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub buy_price_formatted: String,
    pub sale_price_formatted: String,
}

impl Projection for Product {
    type View = ProductView;

    fn project(&self) -> ProductView {
        ProductView {
            product: self.clone(),
            buy_price_formatted: format::currency(self.buy_price),
            sale_price_formatted: format::currency(self.sale_price),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockView {
    #[serde(flatten)]
    pub stock: Stock,
    pub price_unit_formatted: String,
}

impl Projection for Stock {
    type View = StockView;

    fn project(&self) -> StockView {
        StockView {
            stock: self.clone(),
            price_unit_formatted: format::currency(self.price_unit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderProductView {
    #[serde(flatten)]
    pub line: OrderProduct,
    pub total_price_formatted: String,
}

impl Projection for OrderProduct {
    type View = OrderProductView;

    fn project(&self) -> OrderProductView {
        OrderProductView {
            line: self.clone(),
            total_price_formatted: format::currency(self.total_price),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftLineView {
    #[serde(flatten)]
    pub line: DraftLine,
    pub total_price_formatted: String,
}

impl Projection for DraftLine {
    type View = DraftLineView;

    fn project(&self) -> DraftLineView {
        DraftLineView {
            line: self.clone(),
            total_price_formatted: format::currency(self.total_price()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftView {
    pub customer_id: uuid::Uuid,
    pub lines: Vec<DraftLineView>,
    pub total_price: i64,
    pub total_price_formatted: String,
}

impl Projection for OrderDraft {
    type View = DraftView;

    fn project(&self) -> DraftView {
        let total_price = self.total_price();
        DraftView {
            customer_id: self.customer_id(),
            lines: self.lines().iter().map(Projection::project).collect(),
            total_price,
            total_price_formatted: format::currency(total_price),
        }
    }
}

/// Project every record of a slice, keeping order.
pub fn project_all<T: Projection>(records: &[T]) -> Vec<T::View> {
    records.iter().map(Projection::project).collect()
}

// ============================================================================
// Unit Tests
// ============================================================================
