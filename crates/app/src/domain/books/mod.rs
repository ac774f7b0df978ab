//! Books

pub mod cache;
pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use cache::{
    BooksCache, BooksCacheError, BooksCacheKey, DEFAULT_BOOKS_CACHE_TTL, InMemoryBooksCache,
    MockBooksCache,
};
pub use errors::BooksServiceError;
pub use service::*;
