//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the SQL migrations exactly. They are used by
//! Diesel for compile-time query validation and type-safe SQL generation.
//! When migrations change the schema, regenerate with `diesel print-schema`
//! or update by hand.

diesel::table! {
    /// User accounts: public profile plus login credentials.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Human-readable display name.
        display_name -> Varchar,
        /// Hex-encoded SHA-256 digest of the password.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One relationship edge per user pair, keyed by the sorted pair.
    ///
    /// `user_lo < user_hi` is enforced by a check constraint, so a pair can
    /// never hold both a pending and a connected record.
    connection_edges (user_lo, user_hi) {
        /// Lower-ordered member of the pair.
        user_lo -> Uuid,
        /// Higher-ordered member of the pair.
        user_hi -> Uuid,
        /// User who initiated the request.
        requested_by -> Uuid,
        /// Lifecycle state: `pending` or `connected`.
        state -> Varchar,
        /// Edge creation timestamp.
        created_at -> Timestamptz,
        /// Last state transition timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only notification log keyed by recipient.
    notifications (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// User the event targets.
        recipient_id -> Uuid,
        /// Originating user, when the event has one.
        sender_id -> Nullable<Uuid>,
        /// Event category, e.g. `connection_request`.
        kind -> Varchar,
        /// Free-text message shown in the feed.
        message -> Text,
        /// Identifier of the related entity, when the event has one.
        related_id -> Nullable<Varchar>,
        /// Read-state flag; the only mutable column.
        read -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, connection_edges, notifications);
