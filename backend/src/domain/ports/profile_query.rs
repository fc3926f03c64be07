//! Driving port for the authenticated-profile read model.

use async_trait::async_trait;

use crate::domain::connection::RelationshipSummary;
use crate::domain::error::Error;
use crate::domain::notification::Notification;
use crate::domain::user::{User, UserId};

/// Everything `GET /auth/me` needs in one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUserProfile {
    pub user: User,
    pub relationships: RelationshipSummary,
    pub notifications: Vec<Notification>,
}

/// Use-case surface exposed to inbound adapters for profile loads.
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// The user record, derived relationship lists, and recent notifications.
    async fn profile(&self, user: &UserId) -> Result<CurrentUserProfile, Error>;
}
