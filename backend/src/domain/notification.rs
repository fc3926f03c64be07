//! Notification records: append-only events targeted at one recipient.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

/// Default number of notifications returned on profile load.
pub const DEFAULT_FEED_LIMIT: usize = 10;

/// Validation errors returned by [`NotificationId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationValidationError {
    #[error("notification id must be a valid UUID")]
    InvalidId,
}

/// Stable notification identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NotificationId(Uuid);

impl NotificationId {
    /// Validate and construct a [`NotificationId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, NotificationValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| NotificationValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`NotificationId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NotificationId> for String {
    fn from(value: NotificationId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for NotificationId {
    type Error = NotificationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Event category carried by a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Someone sent the recipient a connection request.
    ConnectionRequest,
    /// The recipient's outgoing request was accepted.
    ConnectionAccepted,
    /// Someone applied to a job the recipient posted.
    JobApplication,
}

impl NotificationKind {
    /// Stable storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConnectionRequest => "connection_request",
            Self::ConnectionAccepted => "connection_accepted",
            Self::JobApplication => "job_application",
        }
    }

    /// Parse the storage representation.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "connection_request" => Some(Self::ConnectionRequest),
            "connection_accepted" => Some(Self::ConnectionAccepted),
            "job_application" => Some(Self::JobApplication),
            _ => None,
        }
    }
}

/// Append-only event record targeted at one recipient.
///
/// Lifecycle: created by any action that targets a user; only the `read` flag
/// is ever mutated afterwards; records are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: NotificationId,
    #[schema(value_type = String)]
    pub recipient: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub sender: Option<UserId>,
    pub kind: NotificationKind,
    pub message: String,
    /// Identifier of the entity the event refers to, e.g. a job or user id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_id: Option<String>,
    pub read: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Build a fresh unread notification with a random identifier.
    pub fn new(
        recipient: UserId,
        sender: Option<UserId>,
        kind: NotificationKind,
        message: impl Into<String>,
        related_id: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: NotificationId::random(),
            recipient,
            sender,
            kind,
            message: message.into(),
            related_id,
            read: false,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NotificationKind::ConnectionRequest, "connection_request")]
    #[case(NotificationKind::ConnectionAccepted, "connection_accepted")]
    #[case(NotificationKind::JobApplication, "job_application")]
    fn kind_storage_round_trips(#[case] kind: NotificationKind, #[case] raw: &str) {
        assert_eq!(kind.as_str(), raw);
        assert_eq!(NotificationKind::parse(raw), Some(kind));
    }

    #[rstest]
    fn unknown_kind_is_rejected() {
        assert_eq!(NotificationKind::parse("poke"), None);
    }

    #[rstest]
    fn new_notifications_start_unread() {
        let notification = Notification::new(
            UserId::random(),
            None,
            NotificationKind::JobApplication,
            "someone applied",
            Some("job-42".to_owned()),
            Utc::now(),
        );
        assert!(!notification.read);
        assert_eq!(notification.related_id.as_deref(), Some("job-42"));
    }

    #[rstest]
    fn serialises_camel_case_and_omits_absent_sender() {
        let notification = Notification::new(
            UserId::random(),
            None,
            NotificationKind::ConnectionRequest,
            "hello",
            None,
            Utc::now(),
        );
        let value = serde_json::to_value(&notification).expect("serialise notification");
        assert_eq!(value["kind"], "connection_request");
        assert!(value.get("sender").is_none());
        assert!(value.get("createdAt").is_some());
    }
}
