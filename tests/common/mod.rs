//! In-memory book store and request helpers for router tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use bookshelf_server::{
    api,
    models::book::{Book, NewBook},
    repository::BookStore,
    AppConfig, AppError, AppResult, AppState,
};

#[derive(Default)]
pub struct MemoryBookStore {
    books: Mutex<Vec<Book>>,
}

impl MemoryBookStore {
    pub fn snapshot(&self) -> Vec<Book> {
        self.books.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let mut books = self.books.lock().unwrap();
        let id = books.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        let book = book.clone().into_book(id);
        books.push(book.clone());
        Ok(book)
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.snapshot())
    }

    async fn search_by_title(&self, title: &str) -> AppResult<Vec<Book>> {
        let needle = title.to_lowercase();
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|b| b.title.to_lowercase().contains(&needle))
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.snapshot().into_iter().find(|b| b.id == id))
    }

    async fn update(&self, book: &Book) -> AppResult<Option<Book>> {
        let mut books = self.books.lock().unwrap();
        match books.iter_mut().find(|b| b.id == book.id) {
            Some(existing) => {
                *existing = book.clone();
                Ok(Some(book.clone()))
            }
            None => Ok(None),
        }
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Store whose every statement fails, except reads of `existing`
#[derive(Default)]
pub struct FailingBookStore {
    pub existing: Option<Book>,
}

fn backend_down() -> AppError {
    AppError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl BookStore for FailingBookStore {
    async fn insert(&self, _book: &NewBook) -> AppResult<Book> {
        Err(backend_down())
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        Err(backend_down())
    }

    async fn search_by_title(&self, _title: &str) -> AppResult<Vec<Book>> {
        Err(backend_down())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        match &self.existing {
            Some(book) if book.id == id => Ok(Some(book.clone())),
            _ => Err(backend_down()),
        }
    }

    async fn update(&self, _book: &Book) -> AppResult<Option<Book>> {
        Err(backend_down())
    }

    async fn ping(&self) -> AppResult<()> {
        Err(backend_down())
    }
}

pub fn app(config: AppConfig) -> (Router, Arc<MemoryBookStore>) {
    let store = Arc::new(MemoryBookStore::default());
    (app_with(config, store.clone()), store)
}

pub fn app_with(config: AppConfig, store: Arc<dyn BookStore>) -> Router {
    api::router(AppState::new(config, store))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap().status()
}
