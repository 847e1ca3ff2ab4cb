use crate::api::ApiError;

// ============================================================================
// Catalog Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Api(#[from] ApiError),
}
