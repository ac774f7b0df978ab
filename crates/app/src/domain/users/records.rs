//! User Records

use jiff::Timestamp;

use crate::ids::TypedId;

/// User Id
pub type UserId = TypedId<UserRecord>;

/// User Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique user identifier.
    pub id: UserId,

    /// Login email, unique across users.
    pub email: String,

    /// Creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}
