use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    book::{Book, BookIsbn},
    error::{ApiError, ErrorVerbosityProvider},
    extractor::{path::ApiPath, payload::ApiPayload, validated::Validated},
    state::ApiState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateBookResponse {
    pub book: Book,
}

impl IntoResponse for UpdateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Replaces the whole book. The isbn in the path wins over the one in the body.
#[utoipa::path(
    put,
    path = "/books/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "ISBN-10 or ISBN-13 of the book")),
    request_body = Book,
    responses(
        (status = 200, description = "The updated book", body = UpdateBookResponse),
        (status = 400, description = "Malformed isbn, or body missing, not JSON or not a valid book"),
        (status = 404, description = "No book with this isbn"),
    )
)]
pub async fn update_book(
    Validated(ApiPath(BookIsbn { isbn })): Validated<ApiPath<BookIsbn>>,
    State(state): State<ApiState>,
    payload: ApiPayload<Book>,
) -> Result<UpdateBookResponse, ApiError> {
    let book = state
        .books()
        .update_book(&isbn, payload.payload())
        .await
        .map_err(|err| ApiError::from_book_service_error(state.error_verbosity(), err))?;

    Ok(UpdateBookResponse { book })
}
