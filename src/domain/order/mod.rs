// ============================================================================
// Order Domain - Sale orders and the draft they are composed in
// ============================================================================
//
// - Value objects (Order, OrderStatus, OrderProduct, wire requests)
// - Errors (OrderError enum)
// - Draft (OrderDraft: the stock-bounded line aggregator)
// - Book (OrderBook: active draft + finalized orders)
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod draft;
pub mod book;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use draft::*;
pub use book::*;
