// ============================================================================
// API Layer - Remote collaborators
// ============================================================================
//
// HTTP transport is a thin adapter: the state containers only see the
// contracts, which keeps them testable against in-process fakes.
//
// ============================================================================

mod contracts;
mod errors;
mod http;

pub use contracts::{AuthApi, CatalogApi, CustomerApi, OrderApi};
pub use errors::ApiError;
pub use http::HttpApi;
