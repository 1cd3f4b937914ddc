use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

pub mod schema;
pub mod service;
pub mod store;

/// Matches an ISBN-10 (nine digits and a digit or `X` check character) or an ISBN-13.
pub static ISBN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]{9}[0-9X]|[0-9]{13})$").expect("ISBN regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ToSchema)]
pub struct Book {
    /// Primary key. Immutable once the book is created.
    #[schema(example = "0691161239")]
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i64,
    pub publisher: String,
    pub title: String,
    pub year: i64,
}

impl Validate for Book {
    fn validate(&self) -> Result<(), ValidationErrors> {
        BookIsbn {
            isbn: self.isbn.clone(),
        }
        .validate()
    }
}

/// The `isbn` path segment of `/books/:isbn`.
#[derive(Debug, Deserialize, Validate)]
pub struct BookIsbn {
    #[validate(regex(path = *ISBN_REGEX, message = "Must be an ISBN-10 or ISBN-13"))]
    pub isbn: String,
}
