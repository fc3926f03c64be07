//! Port abstraction for user-directory persistence adapters.

use async_trait::async_trait;

use crate::domain::user::{User, UserId};

use super::macros::define_store_error;

define_store_error! {
    /// Persistence errors raised by user repository adapters.
    UserStoreError, "user"
}

/// Stored account: the public user plus login credentials.
///
/// `password_hash` is the hex-encoded SHA-256 digest of the password; it must
/// never cross the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub user: User,
    pub username: String,
    pub password_hash: String,
}

/// Driven port for the user directory.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError>;

    /// Fetch the full account by login username.
    async fn find_by_username(&self, username: &str)
        -> Result<Option<UserAccount>, UserStoreError>;

    /// Insert or update an account record.
    async fn upsert(&self, account: &UserAccount) -> Result<(), UserStoreError>;
}
