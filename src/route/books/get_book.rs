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
    extractor::{path::ApiPath, validated::Validated},
    state::ApiState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GetBookResponse {
    pub book: Book,
}

impl IntoResponse for GetBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[utoipa::path(
    get,
    path = "/books/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "ISBN-10 or ISBN-13 of the book")),
    responses(
        (status = 200, description = "The book", body = GetBookResponse),
        (status = 400, description = "Malformed isbn"),
        (status = 404, description = "No book with this isbn"),
    )
)]
pub async fn get_book(
    Validated(ApiPath(BookIsbn { isbn })): Validated<ApiPath<BookIsbn>>,
    State(state): State<ApiState>,
) -> Result<GetBookResponse, ApiError> {
    let book = state
        .books()
        .get(&isbn)
        .await
        .map_err(|err| ApiError::from_book_service_error(state.error_verbosity(), err))?;

    Ok(GetBookResponse { book })
}
