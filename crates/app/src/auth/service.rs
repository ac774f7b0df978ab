//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;

use crate::{
    auth::{
        ApiTokenId, ApiTokenMetadata, AuthServiceError, IssuedApiToken, NewApiToken,
        format_api_token, generate_api_token_secret, hash_api_token, parse_api_token,
        repository::PgAuthRepository,
    },
    domain::users::records::UserId,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the insert fails.
    pub async fn issue_api_token(
        &self,
        user_id: UserId,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let secret = generate_api_token_secret();
        let token = format_api_token(&secret);

        let metadata = self
            .repository
            .create_api_token(
                &NewApiToken {
                    user_id,
                    token_hash: hash_api_token(&secret),
                },
                Timestamp::now(),
            )
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }

    /// List all tokens for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        self.repository
            .list_api_tokens_by_user(user_id)
            .await
            .map_err(AuthServiceError::from)
    }

    /// Revoke a token. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, id: ApiTokenId) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(id)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserId, AuthServiceError> {
        let Ok(secret) = parse_api_token(bearer_token) else {
            return Err(AuthServiceError::NotFound);
        };

        self.repository
            .find_user_by_token_hash(&hash_api_token(&secret))
            .await?
            .ok_or(AuthServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the user it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserId, AuthServiceError>;
}
