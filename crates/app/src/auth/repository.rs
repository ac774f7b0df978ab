//! Auth repository.

use jiff::Timestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, query_scalar};

use crate::{
    auth::models::{ApiTokenId, ApiTokenMetadata, NewApiToken},
    database::{epoch_millis, try_get_millis},
    domain::users::records::UserId,
};

const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const FIND_USER_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_user_by_token_hash.sql");
const LIST_API_TOKENS_BY_USER_SQL: &str = include_str!("sql/list_api_tokens_by_user.sql");
const REVOKE_API_TOKEN_SQL: &str = include_str!("sql/revoke_api_token.sql");

#[derive(Debug, Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_api_token(
        &self,
        token: &NewApiToken,
        now: Timestamp,
    ) -> Result<ApiTokenMetadata, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(CREATE_API_TOKEN_SQL)
            .bind(token.user_id.into_i64())
            .bind(&token.token_hash)
            .bind(epoch_millis(now))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_user_by_token_hash(
        &self,
        hash: &str,
    ) -> Result<Option<UserId>, sqlx::Error> {
        let user_id: Option<i64> = query_scalar(FIND_USER_BY_TOKEN_HASH_SQL)
            .bind(hash)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user_id.map(UserId::from_i64))
    }

    /// List every token issued to a user, including revoked ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_api_tokens_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ApiTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(LIST_API_TOKENS_BY_USER_SQL)
            .bind(user_id.into_i64())
            .fetch_all(&self.pool)
            .await
    }

    /// Revoke an active token. Returns `None` when it was unknown or already revoked.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn revoke_api_token(
        &self,
        id: ApiTokenId,
    ) -> Result<Option<ApiTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(REVOKE_API_TOKEN_SQL)
            .bind(id.into_i64())
            .bind(epoch_millis(Timestamp::now()))
            .fetch_optional(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ApiTokenMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let revoked_at = match row.try_get::<Option<i64>, _>("revoked_at")? {
            Some(_) => Some(try_get_millis(row, "revoked_at")?),
            None => None,
        };

        Ok(Self {
            id: ApiTokenId::from_i64(row.try_get("id")?),
            user_id: UserId::from_i64(row.try_get("user_id")?),
            created_at: try_get_millis(row, "created_at")?,
            revoked_at,
        })
    }
}
