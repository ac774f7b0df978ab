//! Book Index Handler

use std::sync::Arc;

use bookstore_app::{domain::books::records::BookRecord, pagination::Page};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookResponse {
    /// The unique identifier of the book
    id: i64,

    title: String,

    author: String,

    isbn: String,

    /// Publication date (RFC 3339)
    published_date: String,

    /// The price of the book in minor currency units
    price: u64,
}

impl From<BookRecord> for BookResponse {
    fn from(book: BookRecord) -> Self {
        BookResponse {
            id: book.id.into_i64(),
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            published_date: book.published_date.to_string(),
            price: book.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BooksResponse {
    /// The matching books, ordered by id
    pub books: Vec<BookResponse>,
}

/// Book Index Handler
///
/// Lists catalog books whose title or author contains `search`.
#[endpoint(tags("books"), summary = "List Books")]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    page_index: QueryParam<String, false>,
    page_size: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<BooksResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let search = search.into_inner().unwrap_or_default();
    let page = Page::new(page_index.into_paging_value(), page_size.into_paging_value());

    let books = state
        .app
        .books
        .list_books(search.trim(), page)
        .await
        .or_500("failed to list books")?;

    Ok(Json(BooksResponse {
        books: books.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use bookstore_app::domain::books::{BooksServiceError, MockBooksService, records::BookId};
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::books_service;

    use super::*;

    fn make_book(id: i64, title: &str, price: u64) -> BookRecord {
        BookRecord {
            id: BookId::from_i64(id),
            title: title.to_string(),
            author: "Jane Austen".to_string(),
            isbn: format!("isbn-{id}"),
            published_date: Timestamp::UNIX_EPOCH,
            price,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn make_service(books: MockBooksService) -> Service {
        books_service(books, Router::with_path("books").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_books() -> TestResult {
        let mut books = MockBooksService::new();

        books
            .expect_list_books()
            .once()
            .withf(|search, page| search.is_empty() && *page == Page::default())
            .return_once(|_, _| {
                Ok(vec![
                    make_book(1, "Emma", 1250),
                    make_book(2, "Persuasion", 900),
                ])
            });

        books.expect_get_books_by_ids().never();
        books.expect_create_book().never();

        let response: BooksResponse = TestClient::get("http://example.com/books")
            .send(&make_service(books))
            .await
            .take_json()
            .await?;

        assert_eq!(response.books.len(), 2, "expected two books");
        assert_eq!(response.books.first().map(|b| (b.id, b.price)), Some((1, 1250)));
        assert_eq!(
            response.books.last().map(|b| b.title.as_str()),
            Some("Persuasion")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_search_and_paging() -> TestResult {
        let mut books = MockBooksService::new();

        books
            .expect_list_books()
            .once()
            .withf(|search, page| {
                search == "austen"
                    && *page
                        == Page {
                            limit: 5,
                            offset: 10,
                        }
            })
            .return_once(|_, _| Ok(vec![]));

        let res =
            TestClient::get("http://example.com/books?search=austen&page_index=3&page_size=5")
                .send(&make_service(books))
                .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_invalid_paging_uses_defaults() -> TestResult {
        let mut books = MockBooksService::new();

        books
            .expect_list_books()
            .once()
            .withf(|_, page| *page == Page::default())
            .return_once(|_, _| Ok(vec![]));

        let response: BooksResponse =
            TestClient::get("http://example.com/books?page_index=abc&page_size=-4")
                .send(&make_service(books))
                .await
                .take_json()
                .await?;

        assert!(response.books.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_service_error_returns_500() -> TestResult {
        let mut books = MockBooksService::new();

        books
            .expect_list_books()
            .once()
            .return_once(|_, _| Err(BooksServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/books")
            .send(&make_service(books))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
