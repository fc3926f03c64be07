//! Authenticated-profile read model.
//!
//! Assembles the `GET /auth/me` payload: the user record, the three derived
//! relationship id-lists, and the recent notification feed.

use std::sync::Arc;

use async_trait::async_trait;

use super::connection::RelationshipSummary;
use super::error::Error;
use super::notification::DEFAULT_FEED_LIMIT;
use super::ports::{
    ConnectionRepository, ConnectionStoreError, CurrentUserProfile, NotificationRepository,
    NotificationStoreError, ProfileQuery, UserRepository, UserStoreError,
};
use super::user::UserId;

/// Profile query service implementing the driving port.
#[derive(Clone)]
pub struct ProfileService<U, C, N> {
    users: Arc<U>,
    connections: Arc<C>,
    notifications: Arc<N>,
}

impl<U, C, N> ProfileService<U, C, N> {
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

#[async_trait]
impl<U, C, N> ProfileQuery for ProfileService<U, C, N>
where
    U: UserRepository,
    C: ConnectionRepository,
    N: NotificationRepository,
{
    async fn profile(&self, user: &UserId) -> Result<CurrentUserProfile, Error> {
        let record = self
            .users
            .find_by_id(user)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;

        let edges = self
            .connections
            .edges_for(user)
            .await
            .map_err(map_connection_error)?;

        let notifications = self
            .notifications
            .recent(user, DEFAULT_FEED_LIMIT)
            .await
            .map_err(map_notification_error)?;

        Ok(CurrentUserProfile {
            user: record,
            relationships: RelationshipSummary::from_edges(user, &edges),
            notifications,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Profile assembly coverage over in-memory adapters.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::auth::hash_password;
    use crate::domain::connection::ConnectionEdge;
    use crate::domain::notification::{Notification, NotificationKind};
    use crate::domain::ports::UserAccount;
    use crate::domain::user::User;
    use crate::outbound::persistence::{
        MemoryConnectionRepository, MemoryNotificationRepository, MemoryUserRepository,
    };
    use chrono::Utc;

    fn service_fixture() -> (
        Arc<MemoryUserRepository>,
        Arc<MemoryConnectionRepository>,
        Arc<MemoryNotificationRepository>,
        ProfileService<MemoryUserRepository, MemoryConnectionRepository, MemoryNotificationRepository>,
    ) {
        let users = Arc::new(MemoryUserRepository::default());
        let connections = Arc::new(MemoryConnectionRepository::default());
        let notifications = Arc::new(MemoryNotificationRepository::default());
        let service = ProfileService::new(
            Arc::clone(&users),
            Arc::clone(&connections),
            Arc::clone(&notifications),
        );
        (users, connections, notifications, service)
    }

    #[actix_web::test]
    async fn profile_of_unknown_user_is_not_found() {
        let (_, _, _, service) = service_fixture();
        let error = service
            .profile(&UserId::random())
            .await
            .expect_err("unknown user");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[actix_web::test]
    async fn profile_bundles_user_relationships_and_feed() {
        let (users, connections, notifications, service) = service_fixture();
        let ada = UserId::random();
        let babbage = UserId::random();
        users.seed(UserAccount {
            user: User::try_from_strings(ada.to_string(), "Ada").expect("valid user"),
            username: "ada".to_owned(),
            password_hash: hash_password("password"),
        });
        let edge = ConnectionEdge::pending(&babbage, &ada, Utc::now()).expect("pending edge");
        assert!(connections.insert_pending(&edge).await.expect("insert edge"));
        notifications
            .insert(&Notification::new(
                ada.clone(),
                Some(babbage.clone()),
                NotificationKind::ConnectionRequest,
                "Babbage sent you a connection request",
                Some(babbage.to_string()),
                Utc::now(),
            ))
            .await
            .expect("insert notification");

        let profile = service.profile(&ada).await.expect("profile load");
        assert_eq!(profile.user.display_name().as_ref(), "Ada");
        assert_eq!(profile.relationships.incoming_requests, vec![babbage]);
        assert_eq!(profile.notifications.len(), 1);
    }
}
