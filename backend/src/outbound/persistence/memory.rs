//! In-memory repository adapters.
//!
//! Back the server when no `DATABASE_URL` is configured and serve as the
//! store for unit and integration tests. Interior mutability uses std
//! `RwLock`; no lock is held across an await point.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::connection::{ConnectionEdge, ConnectionState, PairKey};
use crate::domain::notification::{Notification, NotificationId};
use crate::domain::ports::{
    ConnectionRepository, ConnectionStoreError, NotificationRepository, NotificationStoreError,
    UserAccount, UserRepository, UserStoreError,
};
use crate::domain::user::{User, UserId};

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory user directory keyed by id.
#[derive(Default)]
pub struct MemoryUserRepository {
    accounts: RwLock<HashMap<UserId, UserAccount>>,
}

impl MemoryUserRepository {
    /// Insert an account without going through the async port.
    pub fn seed(&self, account: UserAccount) {
        write_lock(&self.accounts).insert(account.user.id().clone(), account);
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        Ok(read_lock(&self.accounts)
            .get(id)
            .map(|account| account.user.clone()))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserStoreError> {
        Ok(read_lock(&self.accounts)
            .values()
            .find(|account| account.username == username)
            .cloned())
    }

    async fn upsert(&self, account: &UserAccount) -> Result<(), UserStoreError> {
        self.seed(account.clone());
        Ok(())
    }
}

/// In-memory edge store keyed by the canonical pair.
#[derive(Default)]
pub struct MemoryConnectionRepository {
    edges: RwLock<HashMap<PairKey, ConnectionEdge>>,
}

#[async_trait]
impl ConnectionRepository for MemoryConnectionRepository {
    async fn find(&self, pair: &PairKey) -> Result<Option<ConnectionEdge>, ConnectionStoreError> {
        Ok(read_lock(&self.edges).get(pair).cloned())
    }

    async fn insert_pending(&self, edge: &ConnectionEdge) -> Result<bool, ConnectionStoreError> {
        let mut edges = write_lock(&self.edges);
        if edges.contains_key(edge.pair()) {
            return Ok(false);
        }
        edges.insert(edge.pair().clone(), edge.clone());
        Ok(true)
    }

    async fn connect_pending(
        &self,
        pair: &PairKey,
        requester: &UserId,
    ) -> Result<bool, ConnectionStoreError> {
        let mut edges = write_lock(&self.edges);
        match edges.get(pair) {
            Some(edge) if edge.is_pending() && edge.requested_by() == requester => {
                let connected = ConnectionEdge::from_parts(
                    edge.pair().clone(),
                    edge.requested_by().clone(),
                    ConnectionState::Connected,
                    edge.created_at(),
                );
                edges.insert(pair.clone(), connected);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn remove_pending(
        &self,
        pair: &PairKey,
        requester: &UserId,
    ) -> Result<bool, ConnectionStoreError> {
        let mut edges = write_lock(&self.edges);
        match edges.get(pair) {
            Some(edge) if edge.is_pending() && edge.requested_by() == requester => {
                edges.remove(pair);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn edges_for(&self, user: &UserId) -> Result<Vec<ConnectionEdge>, ConnectionStoreError> {
        let mut edges: Vec<ConnectionEdge> = read_lock(&self.edges)
            .values()
            .filter(|edge| edge.pair().contains(user))
            .cloned()
            .collect();
        edges.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(edges)
    }
}

/// In-memory append-only notification log.
#[derive(Default)]
pub struct MemoryNotificationRepository {
    records: RwLock<Vec<Notification>>,
}

#[async_trait]
impl NotificationRepository for MemoryNotificationRepository {
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationStoreError> {
        write_lock(&self.records).push(notification.clone());
        Ok(())
    }

    async fn recent(
        &self,
        recipient: &UserId,
        limit: usize,
    ) -> Result<Vec<Notification>, NotificationStoreError> {
        let mut records: Vec<Notification> = read_lock(&self.records)
            .iter()
            .filter(|record| &record.recipient == recipient)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        Ok(records)
    }

    async fn mark_read(
        &self,
        id: &NotificationId,
        recipient: &UserId,
    ) -> Result<bool, NotificationStoreError> {
        let mut records = write_lock(&self.records);
        match records
            .iter_mut()
            .find(|record| &record.id == id && &record.recipient == recipient)
        {
            Some(record) => {
                record.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, recipient: &UserId) -> Result<u64, NotificationStoreError> {
        let mut records = write_lock(&self.records);
        let mut updated = 0_u64;
        for record in records
            .iter_mut()
            .filter(|record| &record.recipient == recipient && !record.read)
        {
            record.read = true;
            updated += 1;
        }
        Ok(updated)
    }
}
