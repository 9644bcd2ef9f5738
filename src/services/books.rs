//! Book service: list and partial-update rules on top of a [`BookStore`]

use std::sync::Arc;

use crate::{
    config::BooksConfig,
    error::{AppError, AppResult},
    models::book::{Book, BookPatch, BookQuery, NewBook},
    repository::BookStore,
};

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn BookStore>,
    config: BooksConfig,
}

impl BooksService {
    pub fn new(store: Arc<dyn BookStore>, config: BooksConfig) -> Self {
        Self { store, config }
    }

    pub async fn create(&self, data: &NewBook) -> AppResult<Book> {
        let book = self.store.insert(data).await?;
        tracing::info!(id = book.id, "Book created");
        Ok(book)
    }

    /// List books matching the query. An empty result is reported as not found.
    pub async fn search(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let books = match query.title_filter() {
            Some(title) => self.store.search_by_title(title).await?,
            None => self.store.list().await?,
        };
        if books.is_empty() {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        Ok(books)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Read the book, merge the patch, write all fields back.
    ///
    /// Read and write are separate statements; concurrent updates of one id
    /// are last-writer-wins.
    pub async fn update(&self, id: i32, patch: &BookPatch) -> AppResult<Book> {
        let mut book = self.get_by_id(id).await?;
        patch.merge_into(&mut book, self.config.allow_zero_pages);

        let updated = self
            .store
            .update(&book)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        tracing::info!(id, "Book updated");
        Ok(updated)
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
