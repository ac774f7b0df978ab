//! Books Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::{amount_to_i64, epoch_millis, try_get_amount, try_get_millis},
    domain::books::{
        data::NewBook,
        records::{BookId, BookRecord},
    },
    pagination::Page,
};

const LIST_BOOKS_SQL: &str = include_str!("sql/list_books.sql");
const GET_BOOKS_BY_IDS_SQL: &str = include_str!("sql/get_books_by_ids.sql");
const CREATE_BOOK_SQL: &str = include_str!("sql/create_book.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBooksRepository;

impl PgBooksRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_books(
        &self,
        pool: &PgPool,
        search: &str,
        page: Page,
    ) -> Result<Vec<BookRecord>, sqlx::Error> {
        query_as::<Postgres, BookRecord>(LIST_BOOKS_SQL)
            .bind(search)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    pub(crate) async fn get_books_by_ids(
        &self,
        pool: &PgPool,
        ids: &[BookId],
    ) -> Result<Vec<BookRecord>, sqlx::Error> {
        let ids: Vec<i64> = ids.iter().copied().map(BookId::into_i64).collect();

        query_as::<Postgres, BookRecord>(GET_BOOKS_BY_IDS_SQL)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    pub(crate) async fn create_book(
        &self,
        pool: &PgPool,
        book: NewBook,
        now: Timestamp,
    ) -> Result<BookRecord, sqlx::Error> {
        query_as::<Postgres, BookRecord>(CREATE_BOOK_SQL)
            .bind(book.title)
            .bind(book.author)
            .bind(book.isbn)
            .bind(SqlxTimestamp::from(book.published_date))
            .bind(amount_to_i64(book.price, "price")?)
            .bind(epoch_millis(now))
            .fetch_one(pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for BookRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: BookId::from_i64(row.try_get("id")?),
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            isbn: row.try_get("isbn")?,
            published_date: row
                .try_get::<SqlxTimestamp, _>("published_date")?
                .to_jiff(),
            price: try_get_amount(row, "price")?,
            created_at: try_get_millis(row, "created_at")?,
            updated_at: try_get_millis(row, "updated_at")?,
        })
    }
}
