//! PostgreSQL-backed `ConnectionRepository` implementation using Diesel ORM.
//!
//! Every lifecycle mutation is one conditional statement against the single
//! edge row for the pair, so the database's row-level atomicity resolves
//! concurrent accept/decline races without multi-statement transactions.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::connection::{ConnectionEdge, ConnectionState, PairKey};
use crate::domain::ports::{ConnectionRepository, ConnectionStoreError};
use crate::domain::user::UserId;

use super::models::{ConnectionEdgeRow, NewConnectionEdgeRow};
use super::pool::{DbPool, PoolError};
use super::schema::connection_edges;

/// Diesel-backed implementation of the `ConnectionRepository` port.
#[derive(Clone)]
pub struct DieselConnectionRepository {
    pool: DbPool,
}

impl DieselConnectionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ConnectionStoreError {
    ConnectionStoreError::connection(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error) -> ConnectionStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "diesel connection operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ConnectionStoreError::connection("database connection error")
        }
        _ => ConnectionStoreError::query("database error"),
    }
}

fn row_to_edge(row: ConnectionEdgeRow) -> Result<ConnectionEdge, ConnectionStoreError> {
    let pair = PairKey::new(
        &UserId::from_uuid(row.user_lo),
        &UserId::from_uuid(row.user_hi),
    )
    .map_err(|err| ConnectionStoreError::query(format!("corrupt edge row: {err}")))?;
    let state = ConnectionState::parse(&row.state).ok_or_else(|| {
        ConnectionStoreError::query(format!("corrupt edge row: unknown state {:?}", row.state))
    })?;
    Ok(ConnectionEdge::from_parts(
        pair,
        UserId::from_uuid(row.requested_by),
        state,
        row.created_at,
    ))
}

#[async_trait]
impl ConnectionRepository for DieselConnectionRepository {
    async fn find(&self, pair: &PairKey) -> Result<Option<ConnectionEdge>, ConnectionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ConnectionEdgeRow> = connection_edges::table
            .filter(connection_edges::user_lo.eq(*pair.lo().as_uuid()))
            .filter(connection_edges::user_hi.eq(*pair.hi().as_uuid()))
            .select(ConnectionEdgeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_edge).transpose()
    }

    async fn insert_pending(&self, edge: &ConnectionEdge) -> Result<bool, ConnectionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewConnectionEdgeRow {
            user_lo: *edge.pair().lo().as_uuid(),
            user_hi: *edge.pair().hi().as_uuid(),
            requested_by: *edge.requested_by().as_uuid(),
            state: edge.state().as_str(),
            created_at: edge.created_at(),
        };

        let inserted = diesel::insert_into(connection_edges::table)
            .values(&new_row)
            .on_conflict((connection_edges::user_lo, connection_edges::user_hi))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(inserted > 0)
    }

    async fn connect_pending(
        &self,
        pair: &PairKey,
        requester: &UserId,
    ) -> Result<bool, ConnectionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(
            connection_edges::table
                .filter(connection_edges::user_lo.eq(*pair.lo().as_uuid()))
                .filter(connection_edges::user_hi.eq(*pair.hi().as_uuid()))
                .filter(connection_edges::state.eq(ConnectionState::Pending.as_str()))
                .filter(connection_edges::requested_by.eq(*requester.as_uuid())),
        )
        .set((
            connection_edges::state.eq(ConnectionState::Connected.as_str()),
            connection_edges::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn remove_pending(
        &self,
        pair: &PairKey,
        requester: &UserId,
    ) -> Result<bool, ConnectionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(
            connection_edges::table
                .filter(connection_edges::user_lo.eq(*pair.lo().as_uuid()))
                .filter(connection_edges::user_hi.eq(*pair.hi().as_uuid()))
                .filter(connection_edges::state.eq(ConnectionState::Pending.as_str()))
                .filter(connection_edges::requested_by.eq(*requester.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn edges_for(&self, user: &UserId) -> Result<Vec<ConnectionEdge>, ConnectionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ConnectionEdgeRow> = connection_edges::table
            .filter(
                connection_edges::user_lo
                    .eq(*user.as_uuid())
                    .or(connection_edges::user_hi.eq(*user.as_uuid())),
            )
            .order(connection_edges::created_at.desc())
            .select(ConnectionEdgeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_edge).collect()
    }
}
