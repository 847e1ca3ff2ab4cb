// ============================================================================
// sorocaps - Back-office client for customers, products/stock and sale orders
// ============================================================================
//
// Layers:
// - domain:     records, state containers and business rules per area
// - projection: pure derivation of display strings from raw records
// - api:        collaborator contracts + the reqwest-backed HTTP adapter
// - session:    persisted authentication state
// - app:        the aggregate root wiring everything together
//
// ============================================================================

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod projection;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use app::BackOffice;
pub use config::AppConfig;
