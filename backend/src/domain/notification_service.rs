//! Notification feed service: recent-event reads and the read-state tracker.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::Error;
use super::notification::{DEFAULT_FEED_LIMIT, Notification, NotificationId};
use super::ports::{NotificationFeed, NotificationRepository, NotificationStoreError};
use super::user::UserId;

/// Notification feed service implementing the driving port.
#[derive(Clone)]
pub struct NotificationService<N> {
    notifications: Arc<N>,
}

impl<N> NotificationService<N> {
    /// Create a new service over the given notification repository.
    pub fn new(notifications: Arc<N>) -> Self {
        Self { notifications }
    }
}

fn map_store_error(error: NotificationStoreError) -> Error {
    match error {
        NotificationStoreError::Connection { message } => {
            Error::service_unavailable(format!("notification store unavailable: {message}"))
        }
        NotificationStoreError::Query { message } => {
            Error::internal(format!("notification store error: {message}"))
        }
    }
}

#[async_trait]
impl<N> NotificationFeed for NotificationService<N>
where
    N: NotificationRepository,
{
    async fn recent(&self, recipient: &UserId) -> Result<Vec<Notification>, Error> {
        self.notifications
            .recent(recipient, DEFAULT_FEED_LIMIT)
            .await
            .map_err(map_store_error)
    }

    async fn mark_read(&self, id: &NotificationId, owner: &UserId) -> Result<(), Error> {
        let updated = self
            .notifications
            .mark_read(id, owner)
            .await
            .map_err(map_store_error)?;
        if updated {
            Ok(())
        } else {
            // Foreign ownership and absence are deliberately indistinguishable.
            Err(Error::not_found("notification not found"))
        }
    }

    async fn mark_all_read(&self, owner: &UserId) -> Result<u64, Error> {
        self.notifications
            .mark_all_read(owner)
            .await
            .map_err(map_store_error)
    }
}
