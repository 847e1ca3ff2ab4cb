// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// One subdirectory per area, each with:
// - Value objects (wire records and request bodies)
// - Errors
// - The in-memory state container
// - A service applying remote mutations to that container
//
// ============================================================================

pub mod catalog;
pub mod customer;
pub mod order;
