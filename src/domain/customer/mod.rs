// ============================================================================
// Customer Domain - Customers and their address
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod directory;
pub mod service;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use directory::*;
pub use service::*;
