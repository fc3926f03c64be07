//! Port abstraction for relationship-edge persistence adapters.
//!
//! Each mutation is specified as a single conditional statement so adapters
//! can make it atomic at the row level: concurrent accept/decline calls on
//! the same pending pair resolve to exactly one winner.

use async_trait::async_trait;

use crate::domain::connection::{ConnectionEdge, PairKey};
use crate::domain::user::UserId;

use super::macros::define_store_error;

define_store_error! {
    /// Persistence errors raised by connection repository adapters.
    ConnectionStoreError, "connection"
}

/// Driven port for relationship edges.
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Fetch the edge for a pair, if any.
    async fn find(&self, pair: &PairKey) -> Result<Option<ConnectionEdge>, ConnectionStoreError>;

    /// Insert a pending edge unless the pair already has one.
    ///
    /// Returns `true` when the edge was created, `false` when an edge for the
    /// pair already existed (idempotent duplicate send).
    async fn insert_pending(&self, edge: &ConnectionEdge) -> Result<bool, ConnectionStoreError>;

    /// Flip a pending edge requested by `requester` to connected.
    ///
    /// Returns `false` when no matching pending edge exists.
    async fn connect_pending(
        &self,
        pair: &PairKey,
        requester: &UserId,
    ) -> Result<bool, ConnectionStoreError>;

    /// Delete a pending edge requested by `requester`.
    ///
    /// Returns `false` when no matching pending edge exists.
    async fn remove_pending(
        &self,
        pair: &PairKey,
        requester: &UserId,
    ) -> Result<bool, ConnectionStoreError>;

    /// All edges involving the given user, most recent first.
    async fn edges_for(&self, user: &UserId) -> Result<Vec<ConnectionEdge>, ConnectionStoreError>;
}
