//! Driving port for the notification feed and read-state tracker.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::notification::{Notification, NotificationId};
use crate::domain::user::UserId;

/// Use-case surface exposed to inbound adapters for notifications.
#[async_trait]
pub trait NotificationFeed: Send + Sync {
    /// The caller's most recent notifications, newest first.
    async fn recent(&self, recipient: &UserId) -> Result<Vec<Notification>, Error>;

    /// Mark one of the caller's notifications read.
    ///
    /// Fails with `not_found` when the record does not exist or belongs to a
    /// different recipient.
    async fn mark_read(&self, id: &NotificationId, owner: &UserId) -> Result<(), Error>;

    /// Mark every unread notification for the caller read; returns the count.
    async fn mark_all_read(&self, owner: &UserId) -> Result<u64, Error>;
}
