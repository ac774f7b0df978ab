//! Register User Handler

use std::sync::Arc;

use bookstore_app::domain::users::{UsersServiceError, data::NewUser, records::UserRecord};
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{extensions::*, state::State};

/// Register User Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateUserRequest {
    pub email: String,
}

/// Register User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserCreatedResponse {
    pub user_id: i64,

    pub email: String,

    /// Milliseconds since the Unix epoch
    pub created_at: i64,
}

impl From<UserRecord> for UserCreatedResponse {
    fn from(user: UserRecord) -> Self {
        UserCreatedResponse {
            user_id: user.id.into_i64(),
            email: user.email,
            created_at: user.created_at.as_millisecond(),
        }
    }
}

fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => StatusError::conflict().brief("Email already exists"),
        UsersServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Email is required")
        }
        UsersServiceError::Sql(source) => {
            error!("failed to create user: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Register User Handler
///
/// Creates a customer account. API tokens are issued separately by an operator.
#[endpoint(
    tags("users"),
    summary = "Register User",
    responses(
        (status_code = 201, description = "User registered"),
        (status_code = 400, description = "Bad Request"),
        (status_code = 409, description = "Email already exists"),
        (status_code = 500, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserCreatedResponse>, StatusError> {
    let email = json.into_inner().email.trim().to_owned();

    if !email.is_empty() && !email.contains('@') {
        return Err(StatusError::bad_request().brief("Invalid email address"));
    }

    let user = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .users
        .create_user(NewUser { email })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use bookstore_app::domain::users::{MockUsersService, records::UserId};
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::users_service;

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        users_service(users, Router::with_path("users").post(handler))
    }

    #[tokio::test]
    async fn test_register_user_returns_201() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_create_user()
            .once()
            .withf(|user| user.email == "reader@example.com")
            .return_once(|user| {
                Ok(UserRecord {
                    id: UserId::from_i64(7),
                    email: user.email,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                })
            });

        users.expect_get_user_by_email().never();

        let mut res = TestClient::post("http://example.com/users")
            .json(&json!({ "email": "  reader@example.com " }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: UserCreatedResponse = res.take_json().await?;

        assert_eq!(body.user_id, 7);
        assert_eq!(body.email, "reader@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_existing_email_returns_409() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_create_user()
            .once()
            .return_once(|_| Err(UsersServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/users")
            .json(&json!({ "email": "reader@example.com" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_blank_email_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_create_user()
            .once()
            .return_once(|_| Err(UsersServiceError::MissingRequiredData));

        let res = TestClient::post("http://example.com/users")
            .json(&json!({ "email": "   " }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_malformed_email_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_create_user().never();

        let res = TestClient::post("http://example.com/users")
            .json(&json!({ "email": "not-an-email" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_storage_failure_returns_500() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_create_user()
            .once()
            .return_once(|_| Err(UsersServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::post("http://example.com/users")
            .json(&json!({ "email": "reader@example.com" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
