//! Users service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::users::{
    data::NewUser, errors::UsersServiceError, records::UserRecord,
    repository::PgUsersRepository,
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        if user.email.trim().is_empty() {
            return Err(UsersServiceError::MissingRequiredData);
        }

        self.repository
            .create_user(user, Timestamp::now())
            .await
            .map_err(Into::into)
    }

    async fn get_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, UsersServiceError> {
        self.repository
            .get_user_by_email(email)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Registers a customer account.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    async fn get_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, UsersServiceError>;
}
