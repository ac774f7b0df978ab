//! Users Repository

use jiff::Timestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::{epoch_millis, try_get_millis},
    domain::users::{
        data::NewUser,
        records::{UserId, UserRecord},
    },
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_BY_EMAIL_SQL: &str = include_str!("sql/get_user_by_email.sql");

#[derive(Debug, Clone)]
/// PostgreSQL-backed users repository.
pub(crate) struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_user(
        &self,
        user: NewUser,
        now: Timestamp,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.email)
            .bind(epoch_millis(now))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn get_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: UserId::from_i64(row.try_get("id")?),
            email: row.try_get("email")?,
            created_at: try_get_millis(row, "created_at")?,
            updated_at: try_get_millis(row, "updated_at")?,
        })
    }
}
