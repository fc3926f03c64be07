//! PostgreSQL-backed `NotificationRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::notification::{Notification, NotificationId, NotificationKind};
use crate::domain::ports::{NotificationRepository, NotificationStoreError};
use crate::domain::user::UserId;

use super::models::{NewNotificationRow, NotificationRow};
use super::pool::{DbPool, PoolError};
use super::schema::notifications;

/// Diesel-backed implementation of the `NotificationRepository` port.
#[derive(Clone)]
pub struct DieselNotificationRepository {
    pool: DbPool,
}

impl DieselNotificationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NotificationStoreError {
    NotificationStoreError::connection(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error) -> NotificationStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "diesel notification operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            NotificationStoreError::connection("database connection error")
        }
        _ => NotificationStoreError::query("database error"),
    }
}

/// Convert a database row to a domain notification.
///
/// Rows with an unrecognised kind are dropped with a warning rather than
/// failing the whole feed; they can only appear after a rollback past a
/// kind-introducing release.
fn row_to_notification(row: NotificationRow) -> Option<Notification> {
    let Some(kind) = NotificationKind::parse(&row.kind) else {
        warn!(id = %row.id, kind = %row.kind, "skipping notification with unknown kind");
        return None;
    };
    Some(Notification {
        id: NotificationId::from_uuid(row.id),
        recipient: UserId::from_uuid(row.recipient_id),
        sender: row.sender_id.map(UserId::from_uuid),
        kind,
        message: row.message,
        related_id: row.related_id,
        read: row.read,
        created_at: row.created_at,
    })
}

#[async_trait]
impl NotificationRepository for DieselNotificationRepository {
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewNotificationRow {
            id: *notification.id.as_uuid(),
            recipient_id: *notification.recipient.as_uuid(),
            sender_id: notification.sender.as_ref().map(|id| *id.as_uuid()),
            kind: notification.kind.as_str(),
            message: notification.message.as_str(),
            related_id: notification.related_id.as_deref(),
            read: notification.read,
            created_at: notification.created_at,
        };

        diesel::insert_into(notifications::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn recent(
        &self,
        recipient: &UserId,
        limit: usize,
    ) -> Result<Vec<Notification>, NotificationStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows: Vec<NotificationRow> = notifications::table
            .filter(notifications::recipient_id.eq(*recipient.as_uuid()))
            .order(notifications::created_at.desc())
            .limit(limit)
            .select(NotificationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().filter_map(row_to_notification).collect())
    }

    async fn mark_read(
        &self,
        id: &NotificationId,
        recipient: &UserId,
    ) -> Result<bool, NotificationStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(
            notifications::table
                .filter(notifications::id.eq(*id.as_uuid()))
                .filter(notifications::recipient_id.eq(*recipient.as_uuid())),
        )
        .set(notifications::read.eq(true))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn mark_all_read(&self, recipient: &UserId) -> Result<u64, NotificationStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(
            notifications::table
                .filter(notifications::recipient_id.eq(*recipient.as_uuid()))
                .filter(notifications::read.eq(false)),
        )
        .set(notifications::read.eq(true))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(updated as u64)
    }
}
