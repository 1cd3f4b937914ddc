use axum::extract::State;

use crate::error::{ApiError, ErrorVerbosityProvider, NotFoundError};

/// Fallback for requests that match no route.
pub async fn not_found<S: ErrorVerbosityProvider>(State(state): State<S>) -> ApiError {
    NotFoundError::new(state.error_verbosity()).into()
}
