//! Book listing cache.
//!
//! Only catalog listings are cached. Price lookups for order validation always
//! read the primary database.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use mockall::automock;
use thiserror::Error;

use crate::{domain::books::records::BookRecord, pagination::Page};

/// Default lifetime of a cached listing.
pub const DEFAULT_BOOKS_CACHE_TTL: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum BooksCacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
}

/// One cached listing: a search term and the page window it was fetched with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BooksCacheKey {
    pub search: String,
    pub page: Page,
}

impl BooksCacheKey {
    #[must_use]
    pub fn new(search: &str, page: Page) -> Self {
        Self {
            search: search.to_owned(),
            page,
        }
    }
}

#[automock]
#[async_trait]
pub trait BooksCache: Send + Sync {
    /// Look up a listing. Expired entries are reported as misses.
    async fn get(&self, key: &BooksCacheKey) -> Result<Option<Vec<BookRecord>>, BooksCacheError>;

    /// Store a listing.
    async fn set(&self, key: BooksCacheKey, books: Vec<BookRecord>) -> Result<(), BooksCacheError>;
}

#[derive(Debug, Clone)]
struct CachedBooks {
    books: Vec<BookRecord>,
    expires_at: Instant,
}

/// Process-local TTL cache.
#[derive(Debug)]
pub struct InMemoryBooksCache {
    entries: DashMap<BooksCacheKey, CachedBooks>,
    ttl: Duration,
}

impl InMemoryBooksCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    fn evict_expired(&self, now: Instant) {
        self.entries.retain(|_, cached| cached.expires_at > now);
    }
}

impl Default for InMemoryBooksCache {
    fn default() -> Self {
        Self::new(DEFAULT_BOOKS_CACHE_TTL)
    }
}

#[async_trait]
impl BooksCache for InMemoryBooksCache {
    async fn get(&self, key: &BooksCacheKey) -> Result<Option<Vec<BookRecord>>, BooksCacheError> {
        let now = Instant::now();

        match self.entries.get(key) {
            None => return Ok(None),
            Some(cached) if cached.expires_at > now => return Ok(Some(cached.books.clone())),
            Some(_) => {}
        }

        self.entries
            .remove_if(key, |_, cached| cached.expires_at <= now);

        Ok(None)
    }

    async fn set(&self, key: BooksCacheKey, books: Vec<BookRecord>) -> Result<(), BooksCacheError> {
        let now = Instant::now();

        self.evict_expired(now);

        self.entries.insert(
            key,
            CachedBooks {
                books,
                expires_at: now + self.ttl,
            },
        );

        Ok(())
    }
}
