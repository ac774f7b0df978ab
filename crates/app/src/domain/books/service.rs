//! Books service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::warn;

use crate::{
    database::Db,
    domain::books::{
        cache::{BooksCache, BooksCacheKey},
        data::NewBook,
        errors::BooksServiceError,
        records::{BookId, BookRecord},
        repository::PgBooksRepository,
    },
    pagination::Page,
};

#[derive(Clone)]
pub struct PgBooksService {
    db: Db,
    repository: PgBooksRepository,
    cache: Arc<dyn BooksCache>,
}

impl fmt::Debug for PgBooksService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgBooksService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgBooksService {
    #[must_use]
    pub fn new(db: Db, cache: Arc<dyn BooksCache>) -> Self {
        Self {
            db,
            repository: PgBooksRepository::new(),
            cache,
        }
    }
}

#[async_trait]
impl BooksService for PgBooksService {
    async fn list_books(
        &self,
        search: &str,
        page: Page,
    ) -> Result<Vec<BookRecord>, BooksServiceError> {
        let key = BooksCacheKey::new(search, page);

        match self.cache.get(&key).await {
            Ok(Some(books)) => return Ok(books),
            Ok(None) => {}
            Err(source) => warn!("failed to read book listing from cache: {source}"),
        }

        let books = self
            .repository
            .list_books(self.db.replica(), search, page)
            .await?;

        if let Err(source) = self.cache.set(key, books.clone()).await {
            warn!("failed to write book listing to cache: {source}");
        }

        Ok(books)
    }

    async fn get_books_by_ids(
        &self,
        ids: &[BookId],
    ) -> Result<FxHashMap<BookId, BookRecord>, BooksServiceError> {
        if ids.is_empty() {
            return Ok(FxHashMap::default());
        }

        let books = self
            .repository
            .get_books_by_ids(self.db.primary(), ids)
            .await?;

        Ok(books.into_iter().map(|book| (book.id, book)).collect())
    }

    async fn create_book(&self, book: NewBook) -> Result<BookRecord, BooksServiceError> {
        self.repository
            .create_book(self.db.primary(), book, Timestamp::now())
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
pub trait BooksService: Send + Sync {
    /// Lists books whose title or author contains `search`, served through the
    /// listing cache.
    async fn list_books(
        &self,
        search: &str,
        page: Page,
    ) -> Result<Vec<BookRecord>, BooksServiceError>;

    /// Looks up authoritative book records by id. Unknown ids are absent from
    /// the result.
    async fn get_books_by_ids(
        &self,
        ids: &[BookId],
    ) -> Result<FxHashMap<BookId, BookRecord>, BooksServiceError>;

    /// Adds a book to the catalog.
    async fn create_book(&self, book: NewBook) -> Result<BookRecord, BooksServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::books::cache::{BooksCacheError, MockBooksCache},
        test::{TestContext, helpers::create_book},
    };

    use super::*;

    #[tokio::test]
    async fn get_books_by_ids_returns_known_books_only() -> TestResult {
        let ctx = TestContext::new().await;

        let book = create_book(&ctx, "Dune", 5000).await?;

        let found = ctx
            .books
            .get_books_by_ids(&[book.id, BookId::from_i64(999_999)])
            .await?;

        assert_eq!(found.len(), 1, "unknown id should be absent");
        assert_eq!(found.get(&book.id).map(|b| b.price), Some(5000));

        Ok(())
    }

    #[tokio::test]
    async fn get_books_by_ids_tolerates_duplicates() -> TestResult {
        let ctx = TestContext::new().await;

        let book = create_book(&ctx, "Emma", 1250).await?;

        let found = ctx.books.get_books_by_ids(&[book.id, book.id]).await?;

        assert_eq!(found.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn get_books_by_ids_empty_input_returns_empty_map() -> TestResult {
        let ctx = TestContext::new().await;

        let found = ctx.books.get_books_by_ids(&[]).await?;

        assert!(found.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn list_books_filters_by_title_or_author() -> TestResult {
        let ctx = TestContext::new().await;

        create_book(&ctx, "The Hobbit", 1999).await?;
        create_book(&ctx, "Middlemarch", 1499).await?;

        let books = ctx.books.list_books("hobbit", Page::default()).await?;

        assert_eq!(books.len(), 1);
        assert_eq!(books.first().map(|b| b.title.as_str()), Some("The Hobbit"));

        let all = ctx.books.list_books("", Page::default()).await?;

        assert_eq!(all.len(), 2, "empty search lists everything");

        Ok(())
    }

    #[tokio::test]
    async fn list_books_applies_page_window() -> TestResult {
        let ctx = TestContext::new().await;

        for title in ["A", "B", "C"] {
            create_book(&ctx, title, 100).await?;
        }

        let second_page = ctx.books.list_books("", Page::new(2, 2)).await?;

        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page.first().map(|b| b.title.as_str()), Some("C"));

        Ok(())
    }

    #[tokio::test]
    async fn list_books_serves_cached_listing_but_price_lookup_does_not() -> TestResult {
        let ctx = TestContext::new().await;

        let first = create_book(&ctx, "Persuasion", 900).await?;

        let cached = ctx.books.list_books("", Page::default()).await?;

        let second = create_book(&ctx, "Sanditon", 700).await?;

        let listed_again = ctx.books.list_books("", Page::default()).await?;

        assert_eq!(cached, listed_again, "listing should come from the cache");
        assert!(!listed_again.iter().any(|b| b.id == second.id));

        let lookup = ctx.books.get_books_by_ids(&[first.id, second.id]).await?;

        assert_eq!(lookup.len(), 2, "price lookup must bypass the cache");

        Ok(())
    }

    #[tokio::test]
    async fn list_books_falls_back_to_database_when_cache_fails() -> TestResult {
        let ctx = TestContext::new().await;

        create_book(&ctx, "Ulysses", 2000).await?;

        let mut cache = MockBooksCache::new();

        cache
            .expect_get()
            .once()
            .returning(|_| Err(BooksCacheError::Unavailable("down".to_string())));

        cache
            .expect_set()
            .once()
            .returning(|_, _| Err(BooksCacheError::Unavailable("down".to_string())));

        let service = PgBooksService::new(ctx.db(), Arc::new(cache));

        let books = service.list_books("", Page::default()).await?;

        assert_eq!(books.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn create_book_duplicate_isbn_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        let book = create_book(&ctx, "Dracula", 800).await?;

        let result = ctx
            .books
            .create_book(NewBook {
                title: "Dracula (reprint)".to_string(),
                author: book.author,
                isbn: book.isbn,
                published_date: book.published_date,
                price: 900,
            })
            .await;

        assert!(
            matches!(result, Err(BooksServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }
}
