use async_trait::async_trait;

use super::Book;

mod memory;
mod sqlite;

pub use memory::InMemoryBookStore;
pub use sqlite::SqliteBookStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Book {isbn} not found")]
    NotFound { isbn: String },
    #[error("Book {isbn} already exists")]
    Conflict { isbn: String },
    #[error("Database failure: {0}")]
    Database(#[from] sqlx::Error),
}

/// Keyed persistence for books. The isbn is the primary key.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Lists every book. Callers must not rely on the order.
    async fn find_all(&self) -> Result<Vec<Book>, StoreError>;

    async fn find_by_isbn(&self, isbn: &str) -> Result<Book, StoreError>;

    /// Inserts a new book. Fails with [`StoreError::Conflict`] if the isbn is taken.
    async fn create(&self, book: Book) -> Result<Book, StoreError>;

    /// Replaces the book stored under `isbn`. The isbn inside `book` is ignored.
    async fn update(&self, isbn: &str, book: Book) -> Result<Book, StoreError>;

    async fn delete(&self, isbn: &str) -> Result<(), StoreError>;
}
