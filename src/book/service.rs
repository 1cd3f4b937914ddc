use std::sync::Arc;

use serde_json::Value;

use super::{
    schema::{self, SchemaViolation, ValidationMode},
    store::{BookStore, StoreError},
    Book,
};

#[derive(Debug, thiserror::Error)]
pub enum BookServiceError {
    #[error(transparent)]
    Validation(#[from] SchemaViolation),
    #[error("Book {isbn} not found")]
    NotFound { isbn: String },
    #[error("Book {isbn} already exists")]
    Conflict { isbn: String },
    #[error("Store failure: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for BookServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { isbn } => BookServiceError::NotFound { isbn },
            StoreError::Conflict { isbn } => BookServiceError::Conflict { isbn },
            err => BookServiceError::Store(err),
        }
    }
}

/// Confirms that a book was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deleted;

/// Validates payloads before any mutating call reaches the [`BookStore`].
#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn BookStore>,
}

impl BookService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip_all)]
    pub async fn list(&self) -> Result<Vec<Book>, BookServiceError> {
        let books = self.store.find_all().await?;

        tracing::trace!(count = books.len(), "Listed");

        Ok(books)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, isbn: &str) -> Result<Book, BookServiceError> {
        Ok(self.store.find_by_isbn(isbn).await?)
    }

    #[tracing::instrument(skip_all)]
    pub async fn create_book(&self, payload: Option<&Value>) -> Result<Book, BookServiceError> {
        let book = schema::validate(payload, ValidationMode::Create).inspect_err(|violation| {
            tracing::warn!(errors = ?violation.errors, "Rejected");
        })?;

        let created = self.store.create(book).await?;

        tracing::debug!(isbn = %created.isbn, "Created");

        Ok(created)
    }

    /// Replaces the book at `isbn`. The path isbn wins over the one in the payload.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update_book(
        &self,
        isbn: &str,
        payload: Option<&Value>,
    ) -> Result<Book, BookServiceError> {
        self.store.find_by_isbn(isbn).await?;

        let book = schema::validate(payload, ValidationMode::Update).inspect_err(|violation| {
            tracing::warn!(errors = ?violation.errors, "Rejected");
        })?;

        let updated = self.store.update(isbn, book).await?;

        tracing::debug!("Updated");

        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_book(&self, isbn: &str) -> Result<Deleted, BookServiceError> {
        self.store.delete(isbn).await?;

        tracing::debug!("Deleted");

        Ok(Deleted)
    }
}
