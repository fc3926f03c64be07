//! Driving port for the connection-request lifecycle.

use async_trait::async_trait;

use crate::domain::connection::ConnectionAction;
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Use-case surface exposed to inbound adapters for connection requests.
#[async_trait]
pub trait ConnectionFlow: Send + Sync {
    /// Send (or idempotently re-send) a connection request.
    async fn send_request(&self, requester: &UserId, target: &UserId) -> Result<(), Error>;

    /// Accept or decline a pending request directed at `target`.
    async fn respond(
        &self,
        target: &UserId,
        requester: &UserId,
        action: ConnectionAction,
    ) -> Result<(), Error>;
}
