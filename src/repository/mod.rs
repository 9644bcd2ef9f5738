//! Repository layer for database operations

pub mod books;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use crate::{
    config::DatabaseConfig,
    error::AppResult,
    models::book::{Book, NewBook},
};

/// Storage operations for the book resource.
///
/// Implemented by [`books::BooksRepository`] over Postgres; tests substitute
/// their own implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a book and return it with its assigned id
    async fn insert(&self, book: &NewBook) -> AppResult<Book>;

    /// All books
    async fn list(&self) -> AppResult<Vec<Book>>;

    /// Books whose title contains `title`, case-insensitively
    async fn search_by_title(&self, title: &str) -> AppResult<Vec<Book>>;

    /// The book with exactly this id, if any
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// Overwrite all mutable fields of `book.id`; `None` if the row is gone
    async fn update(&self, book: &Book) -> AppResult<Option<Book>>;

    /// Liveness round trip
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }

    /// Open the pool and probe it once; the caller must not serve traffic on error
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;

        let repository = Self::new(pool);
        repository.ping().await?;
        Ok(repository)
    }

    /// Round trip on the pool
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
