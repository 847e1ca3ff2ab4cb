// ============================================================================
// Session - authentication state persisted between runs
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod store;
pub mod auth;

pub use value_objects::*;
pub use errors::*;
pub use store::*;
pub use auth::*;
