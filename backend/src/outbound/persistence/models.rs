//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{connection_edges, notifications, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub password_hash: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub display_name: &'a str,
    pub password_hash: &'a str,
}

/// Changeset struct for updating existing user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub username: &'a str,
    pub display_name: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the connection_edges table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = connection_edges)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ConnectionEdgeRow {
    pub user_lo: Uuid,
    pub user_hi: Uuid,
    pub requested_by: Uuid,
    pub state: String,
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new pending edges.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = connection_edges)]
pub(crate) struct NewConnectionEdgeRow<'a> {
    pub user_lo: Uuid,
    pub user_hi: Uuid,
    pub requested_by: Uuid,
    pub state: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the notifications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub sender_id: Option<Uuid>,
    pub kind: String,
    pub message: String,
    pub related_id: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for appending notification records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub(crate) struct NewNotificationRow<'a> {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub sender_id: Option<Uuid>,
    pub kind: &'a str,
    pub message: &'a str,
    pub related_id: Option<&'a str>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
