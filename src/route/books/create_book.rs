use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    book::Book,
    error::{ApiError, ErrorVerbosityProvider},
    extractor::payload::ApiPayload,
    state::ApiState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateBookResponse {
    pub book: Book,
}

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = Book,
    responses(
        (status = 201, description = "The created book", body = CreateBookResponse),
        (status = 400, description = "Body missing, not JSON or not a valid book"),
        (status = 409, description = "A book with this isbn already exists"),
    )
)]
pub async fn create_book(
    State(state): State<ApiState>,
    payload: ApiPayload<Book>,
) -> Result<CreateBookResponse, ApiError> {
    let book = state
        .books()
        .create_book(payload.payload())
        .await
        .map_err(|err| ApiError::from_book_service_error(state.error_verbosity(), err))?;

    Ok(CreateBookResponse { book })
}
