//! Auth data models.

use jiff::Timestamp;

use crate::{domain::users::records::UserId, ids::TypedId};

/// API Token Id
pub type ApiTokenId = TypedId<ApiTokenMetadata>;

/// API token metadata persisted in storage. The secret itself is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiTokenMetadata {
    pub id: ApiTokenId,
    pub user_id: UserId,
    pub created_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub struct NewApiToken {
    pub user_id: UserId,

    /// SHA-256 hex digest of the raw token.
    pub token_hash: String,
}

/// API token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub metadata: ApiTokenMetadata,
}
