use uuid::Uuid;

use crate::api::ApiError;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Out of stock for product {product_id}: requested {requested}, available {available}")]
    StockExceeded {
        product_id: Uuid,
        requested: i64,
        available: i64,
    },

    #[error("Product {0} is not in the draft")]
    LineNotFound(Uuid),

    #[error("Order not found: {0}")]
    OrderNotFound(Uuid),

    #[error("Order draft has no lines")]
    EmptyDraft,

    #[error("No order draft in progress")]
    NoActiveDraft,

    #[error(transparent)]
    Api(#[from] ApiError),
}
