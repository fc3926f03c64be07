//! Port abstraction for notification persistence adapters.

use async_trait::async_trait;

use crate::domain::notification::{Notification, NotificationId};
use crate::domain::user::UserId;

use super::macros::define_store_error;

define_store_error! {
    /// Persistence errors raised by notification repository adapters.
    NotificationStoreError, "notification"
}

/// Driven port for the append-only notification log.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Append one record.
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationStoreError>;

    /// The recipient's most recent notifications, newest first, capped at `limit`.
    async fn recent(
        &self,
        recipient: &UserId,
        limit: usize,
    ) -> Result<Vec<Notification>, NotificationStoreError>;

    /// Mark one record read if it belongs to `recipient`.
    ///
    /// Returns `false` when no matching record exists; ownership mismatches
    /// are indistinguishable from absence by design.
    async fn mark_read(
        &self,
        id: &NotificationId,
        recipient: &UserId,
    ) -> Result<bool, NotificationStoreError>;

    /// Mark every unread record for `recipient` read in one bulk update.
    ///
    /// Returns the number of records updated.
    async fn mark_all_read(&self, recipient: &UserId) -> Result<u64, NotificationStoreError>;
}
