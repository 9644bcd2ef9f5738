//! Business logic services

pub mod books;

use std::sync::Arc;

use crate::{config::BooksConfig, repository::BookStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
}

impl Services {
    /// Create all services on top of the given book store
    pub fn new(store: Arc<dyn BookStore>, books_config: BooksConfig) -> Self {
        Self {
            books: books::BooksService::new(store, books_config),
        }
    }
}
