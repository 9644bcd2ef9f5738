//! Bookshelf server
//!
//! A small REST JSON API over a single `mst_book` table: create, list and
//! search by title, fetch by id, and partial update.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the state around an already opened book store
    pub fn new(config: AppConfig, store: Arc<dyn repository::BookStore>) -> Self {
        let services = services::Services::new(store, config.books.clone());
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
