//! Driving port for credential checks at login.

use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Use-case surface exposed to the login handler.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and return the authenticated user's id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
