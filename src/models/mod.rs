//! Data models for the bookshelf server

pub mod book;

pub use book::{Book, BookPatch, BookQuery, NewBook};
