use uuid::Uuid;

use crate::api::ApiError;

// ============================================================================
// Customer Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(Uuid),

    #[error(transparent)]
    Api(#[from] ApiError),
}
