//! Connection-request lifecycle service.
//!
//! Implements the [`ConnectionFlow`] driving port over the edge and
//! notification stores. Every state transition is delegated to a single
//! conditional statement in the connection repository, so concurrent
//! accept/decline calls on the same pending pair resolve to one winner and
//! the losing call observes `not_found`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::debug;

use super::connection::{ConnectionAction, ConnectionEdge, ConnectionState, PairKey};
use super::error::Error;
use super::notification::{Notification, NotificationKind};
use super::ports::{
    ConnectionFlow, ConnectionRepository, ConnectionStoreError, NotificationRepository,
    NotificationStoreError, UserRepository, UserStoreError,
};
use super::user::{User, UserId};

/// Connection lifecycle service implementing the driving port.
#[derive(Clone)]
pub struct ConnectionService<U, C, N> {
    users: Arc<U>,
    connections: Arc<C>,
    notifications: Arc<N>,
}

impl<U, C, N> ConnectionService<U, C, N> {
    /// Create a new service with the given repositories.
    pub fn new(users: Arc<U>, connections: Arc<C>, notifications: Arc<N>) -> Self {
        Self {
            users,
            connections,
            notifications,
        }
    }
}

fn map_user_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserStoreError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
    }
}

fn map_connection_error(error: ConnectionStoreError) -> Error {
    match error {
        ConnectionStoreError::Connection { message } => {
            Error::service_unavailable(format!("connection store unavailable: {message}"))
        }
        ConnectionStoreError::Query { message } => {
            Error::internal(format!("connection store error: {message}"))
        }
    }
}

fn map_notification_error(error: NotificationStoreError) -> Error {
    match error {
        NotificationStoreError::Connection { message } => {
            Error::service_unavailable(format!("notification store unavailable: {message}"))
        }
        NotificationStoreError::Query { message } => {
            Error::internal(format!("notification store error: {message}"))
        }
    }
}

fn pair_for(a: &UserId, b: &UserId) -> Result<PairKey, Error> {
    PairKey::new(a, b)
        .map_err(|_| Error::invalid_request("cannot send a connection request to yourself"))
}

impl<U, C, N> ConnectionService<U, C, N>
where
    U: UserRepository,
    C: ConnectionRepository,
    N: NotificationRepository,
{
    async fn require_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn notify(&self, notification: Notification) -> Result<(), Error> {
        self.notifications
            .insert(&notification)
            .await
            .map_err(map_notification_error)
    }
}

#[async_trait]
impl<U, C, N> ConnectionFlow for ConnectionService<U, C, N>
where
    U: UserRepository,
    C: ConnectionRepository,
    N: NotificationRepository,
{
    async fn send_request(&self, requester: &UserId, target: &UserId) -> Result<(), Error> {
        let pair = pair_for(requester, target)?;
        let requester_user = self.require_user(requester).await?;
        self.require_user(target).await?;

        match self
            .connections
            .find(&pair)
            .await
            .map_err(map_connection_error)?
        {
            None => {
                let edge = ConnectionEdge::pending(requester, target, Utc::now())
                    .map_err(|_| Error::invalid_request("cannot connect a user to themselves"))?;
                let created = self
                    .connections
                    .insert_pending(&edge)
                    .await
                    .map_err(map_connection_error)?;
                // A lost insert race means the edge already exists; treat it
                // like a duplicate send and skip the notification.
                if created {
                    self.notify(Notification::new(
                        target.clone(),
                        Some(requester.clone()),
                        NotificationKind::ConnectionRequest,
                        format!(
                            "{} sent you a connection request",
                            requester_user.display_name()
                        ),
                        Some(requester.to_string()),
                        Utc::now(),
                    ))
                    .await?;
                } else {
                    debug!(%requester, %target, "connection request already pending");
                }
                Ok(())
            }
            Some(edge) if edge.is_pending() && edge.requested_by() == requester => {
                debug!(%requester, %target, "duplicate connection request ignored");
                Ok(())
            }
            Some(edge) if edge.is_pending() => Err(Error::conflict(
                "this user has already sent you a connection request",
            )
            .with_details(json!({ "code": "reverse_request_pending" }))),
            Some(edge) => {
                debug_assert_eq!(edge.state(), ConnectionState::Connected);
                Err(Error::conflict("users are already connected"))
            }
        }
    }

    async fn respond(
        &self,
        target: &UserId,
        requester: &UserId,
        action: ConnectionAction,
    ) -> Result<(), Error> {
        let pair = pair_for(target, requester)?;

        match action {
            ConnectionAction::Accept => {
                let updated = self
                    .connections
                    .connect_pending(&pair, requester)
                    .await
                    .map_err(map_connection_error)?;
                if !updated {
                    return Err(Error::not_found("no pending request from this user"));
                }
                let target_user = self.require_user(target).await?;
                self.notify(Notification::new(
                    requester.clone(),
                    Some(target.clone()),
                    NotificationKind::ConnectionAccepted,
                    format!(
                        "{} accepted your connection request",
                        target_user.display_name()
                    ),
                    Some(target.to_string()),
                    Utc::now(),
                ))
                .await
            }
            ConnectionAction::Decline => {
                let removed = self
                    .connections
                    .remove_pending(&pair, requester)
                    .await
                    .map_err(map_connection_error)?;
                if !removed {
                    return Err(Error::not_found("no pending request from this user"));
                }
                Ok(())
            }
        }
    }
}
