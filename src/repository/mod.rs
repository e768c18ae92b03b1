//! Repository layer for database operations

pub mod books;
#[cfg(test)]
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, NewBook},
};

pub use books::PgBookStore;

/// Persistence operations over the `books` table.
///
/// Every call is its own auto-committed unit; nothing spans calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Create the table if it does not exist yet
    async fn ensure_schema(&self) -> AppResult<()>;

    /// All books ordered by id
    async fn list_all(&self) -> AppResult<Vec<Book>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// Books whose title or author contains `term`, ignoring case, ordered by id
    async fn search_by_title_or_author(&self, term: &str) -> AppResult<Vec<Book>>;

    async fn insert(&self, book: &NewBook) -> AppResult<Book>;

    /// Fails with `NotFound` if the book no longer exists
    async fn update_rating(&self, id: i32, rating: i32) -> AppResult<()>;

    /// Fails with `NotFound` if the book does not exist
    async fn delete_by_id(&self, id: i32) -> AppResult<()>;
}

/// Main repository struct holding the store handle
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a new repository backed by the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self::with_store(Arc::new(PgBookStore::new(pool)))
    }

    /// Create a repository over any store implementation
    pub fn with_store(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }
}
