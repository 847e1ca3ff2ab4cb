// ============================================================================
// Catalog Domain - Products and their stock
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod cache;
pub mod service;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use cache::*;
pub use service::*;
