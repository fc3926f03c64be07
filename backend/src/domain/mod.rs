//! Domain primitives, services, and ports.
//!
//! Purpose: define strongly typed entities for the connection-request
//! lifecycle and notification fan-out, plus the services implementing the
//! driving ports. Keep types immutable where practical and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.

pub mod auth;
pub mod connection;
pub mod connection_service;
pub mod error;
pub mod notification;
pub mod notification_service;
pub mod ports;
pub mod profile_service;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError, PasswordLoginService, hash_password};
pub use self::connection::{
    ConnectionAction, ConnectionEdge, ConnectionState, PairKey, PairValidationError,
    RelationshipSummary,
};
pub use self::connection_service::ConnectionService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::notification::{
    DEFAULT_FEED_LIMIT, Notification, NotificationId, NotificationKind,
    NotificationValidationError,
};
pub use self::notification_service::NotificationService;
pub use self::profile_service::ProfileService;
pub use self::user::{DisplayName, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
