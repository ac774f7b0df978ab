//! Authenticated user depot helpers.

use bookstore_app::domain::users::records::UserId;
use salvo::prelude::{Depot, StatusError};

const USER_ID_DEPOT_KEY: &str = "user_id";

/// Stores and retrieves the user resolved by the auth middleware.
pub(crate) trait UserDepotExt {
    fn insert_user_id(&mut self, user_id: UserId);

    fn user_id_or_401(&self) -> Result<UserId, StatusError>;
}

impl UserDepotExt for Depot {
    fn insert_user_id(&mut self, user_id: UserId) {
        self.insert(USER_ID_DEPOT_KEY, user_id);
    }

    fn user_id_or_401(&self) -> Result<UserId, StatusError> {
        match self.get::<UserId>(USER_ID_DEPOT_KEY) {
            Ok(user_id) => Ok(*user_id),
            Err(_missing) => Err(StatusError::unauthorized()),
        }
    }
}
