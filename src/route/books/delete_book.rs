use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    book::{service::Deleted, BookIsbn},
    error::{ApiError, ErrorVerbosityProvider},
    extractor::{path::ApiPath, validated::Validated},
    state::ApiState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteBookResponse {
    #[schema(example = "Book deleted")]
    pub message: String,
}

impl From<Deleted> for DeleteBookResponse {
    fn from(_: Deleted) -> Self {
        DeleteBookResponse {
            message: String::from("Book deleted"),
        }
    }
}

impl IntoResponse for DeleteBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "ISBN-10 or ISBN-13 of the book")),
    responses(
        (status = 200, description = "The book was deleted", body = DeleteBookResponse),
        (status = 400, description = "Malformed isbn"),
        (status = 404, description = "No book with this isbn"),
    )
)]
pub async fn delete_book(
    Validated(ApiPath(BookIsbn { isbn })): Validated<ApiPath<BookIsbn>>,
    State(state): State<ApiState>,
) -> Result<DeleteBookResponse, ApiError> {
    state
        .books()
        .delete_book(&isbn)
        .await
        .map(DeleteBookResponse::from)
        .map_err(|err| ApiError::from_book_service_error(state.error_verbosity(), err))
}
