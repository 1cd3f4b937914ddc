use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookStore, StoreError};
use crate::book::Book;

/// A [`BookStore`] kept in process memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        Self {
            books: RwLock::new(books.into_iter().collect()),
        }
    }
}

fn not_found(isbn: &str) -> StoreError {
    StoreError::NotFound {
        isbn: isbn.to_string(),
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn find_all(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.books.read().await.clone())
    }

    async fn find_by_isbn(&self, isbn: &str) -> Result<Book, StoreError> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.isbn == isbn)
            .cloned()
            .ok_or_else(|| not_found(isbn))
    }

    async fn create(&self, book: Book) -> Result<Book, StoreError> {
        let mut books = self.books.write().await;

        if books.iter().any(|existing| existing.isbn == book.isbn) {
            return Err(StoreError::Conflict { isbn: book.isbn });
        }

        books.push(book.clone());

        Ok(book)
    }

    async fn update(&self, isbn: &str, mut book: Book) -> Result<Book, StoreError> {
        let mut books = self.books.write().await;

        let existing = books
            .iter_mut()
            .find(|existing| existing.isbn == isbn)
            .ok_or_else(|| not_found(isbn))?;

        book.isbn = isbn.to_string();
        *existing = book.clone();

        Ok(book)
    }

    async fn delete(&self, isbn: &str) -> Result<(), StoreError> {
        let mut books = self.books.write().await;

        let index = books
            .iter()
            .position(|book| book.isbn == isbn)
            .ok_or_else(|| not_found(isbn))?;

        books.remove(index);

        Ok(())
    }
}
