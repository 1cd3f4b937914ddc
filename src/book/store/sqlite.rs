use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Row, SqlitePool,
};

use super::{BookStore, StoreError};
use crate::book::Book;

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS books (
    isbn TEXT PRIMARY KEY,
    amazon_url TEXT NOT NULL,
    author TEXT NOT NULL,
    language TEXT NOT NULL,
    pages INTEGER NOT NULL,
    publisher TEXT NOT NULL,
    title TEXT NOT NULL,
    year INTEGER NOT NULL
);
";

const COLUMNS: &str = "isbn, amazon_url, author, language, pages, publisher, title, year";

/// A [`BookStore`] backed by the `books` table of a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteBookStore {
    pool: SqlitePool,
}

impl SqliteBookStore {
    /// Connects to `url` and creates the `books` table if it does not exist yet.
    ///
    /// In-memory databases live as long as their connection, so they get exactly one
    /// connection that is never recycled.
    #[tracing::instrument(name = "sqlite_connect")]
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool_options = match url.contains(":memory:") {
            true => SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None),
            false => SqlitePoolOptions::new().max_connections(5),
        };

        let pool = pool_options.connect_with(options).await?;

        let store = Self { pool };
        store.init_schema().await?;

        tracing::debug!("Connected");

        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;

        Ok(())
    }
}

fn parse_book_row(row: &SqliteRow) -> Result<Book, StoreError> {
    Ok(Book {
        isbn: row.try_get("isbn")?,
        amazon_url: row.try_get("amazon_url")?,
        author: row.try_get("author")?,
        language: row.try_get("language")?,
        pages: row.try_get("pages")?,
        publisher: row.try_get("publisher")?,
        title: row.try_get("title")?,
        year: row.try_get("year")?,
    })
}

fn not_found(isbn: &str) -> StoreError {
    StoreError::NotFound {
        isbn: isbn.to_string(),
    }
}

#[async_trait]
impl BookStore for SqliteBookStore {
    async fn find_all(&self) -> Result<Vec<Book>, StoreError> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM books ORDER BY rowid"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(parse_book_row).collect()
    }

    async fn find_by_isbn(&self, isbn: &str) -> Result<Book, StoreError> {
        sqlx::query(&format!("SELECT {COLUMNS} FROM books WHERE isbn = ?"))
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(isbn))
            .and_then(|row| parse_book_row(&row))
    }

    async fn create(&self, book: Book) -> Result<Book, StoreError> {
        let row = sqlx::query(&format!(
            "INSERT INTO books ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        ))
        .bind(&book.isbn)
        .bind(&book.amazon_url)
        .bind(&book.author)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.publisher)
        .bind(&book.title)
        .bind(book.year)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict {
                    isbn: book.isbn.clone(),
                }
            }
            err => StoreError::Database(err),
        })?;

        parse_book_row(&row)
    }

    async fn update(&self, isbn: &str, book: Book) -> Result<Book, StoreError> {
        sqlx::query(&format!(
            "UPDATE books
             SET amazon_url = ?, author = ?, language = ?, pages = ?, publisher = ?, title = ?, year = ?
             WHERE isbn = ?
             RETURNING {COLUMNS}"
        ))
        .bind(&book.amazon_url)
        .bind(&book.author)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.publisher)
        .bind(&book.title)
        .bind(book.year)
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(isbn))
        .and_then(|row| parse_book_row(&row))
    }

    async fn delete(&self, isbn: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = ?")
            .bind(isbn)
            .execute(&self.pool)
            .await?;

        match result.rows_affected() {
            0 => Err(not_found(isbn)),
            _ => Ok(()),
        }
    }
}
