//! Connection-edge primitives for the relationship state machine.
//!
//! A relationship between two users is a single shared edge record keyed by
//! the sorted id pair. Keeping one record per pair makes every lifecycle
//! mutation (request, accept, decline) a single-row atomic update and rules
//! out a pair being simultaneously pending and connected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserId;

/// Validation errors returned when constructing a [`PairKey`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PairValidationError {
    #[error("a connection pair must reference two distinct users")]
    SelfReference,
}

/// Canonical sorted user pair identifying a relationship edge.
///
/// ## Invariants
/// - `lo < hi` under UUID ordering; the pair never references one user twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey {
    lo: UserId,
    hi: UserId,
}

impl PairKey {
    /// Construct the canonical pair for two users, in either order.
    pub fn new(a: &UserId, b: &UserId) -> Result<Self, PairValidationError> {
        if a == b {
            return Err(PairValidationError::SelfReference);
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        Ok(Self {
            lo: lo.clone(),
            hi: hi.clone(),
        })
    }

    /// Lower-ordered member of the pair.
    pub fn lo(&self) -> &UserId {
        &self.lo
    }

    /// Higher-ordered member of the pair.
    pub fn hi(&self) -> &UserId {
        &self.hi
    }

    /// Whether the pair references the given user.
    pub fn contains(&self, user: &UserId) -> bool {
        &self.lo == user || &self.hi == user
    }

    /// The member of the pair that is not `user`, if `user` is a member.
    pub fn other(&self, user: &UserId) -> Option<&UserId> {
        if &self.lo == user {
            Some(&self.hi)
        } else if &self.hi == user {
            Some(&self.lo)
        } else {
            None
        }
    }
}

/// Lifecycle state of a relationship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// A directed, unconfirmed connection intent awaiting a response.
    Pending,
    /// A confirmed, symmetric relationship between the two users.
    Connected,
}

impl ConnectionState {
    /// Stable storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Connected => "connected",
        }
    }

    /// Parse the storage representation.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "connected" => Some(Self::Connected),
            _ => None,
        }
    }
}

/// Relationship edge shared by a pair of users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionEdge {
    pair: PairKey,
    requested_by: UserId,
    state: ConnectionState,
    created_at: DateTime<Utc>,
}

impl ConnectionEdge {
    /// Build a fresh pending edge from `requester` toward `target`.
    pub fn pending(
        requester: &UserId,
        target: &UserId,
        created_at: DateTime<Utc>,
    ) -> Result<Self, PairValidationError> {
        Ok(Self {
            pair: PairKey::new(requester, target)?,
            requested_by: requester.clone(),
            state: ConnectionState::Pending,
            created_at,
        })
    }

    /// Rehydrate an edge from storage.
    pub fn from_parts(
        pair: PairKey,
        requested_by: UserId,
        state: ConnectionState,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            pair,
            requested_by,
            state,
            created_at,
        }
    }

    /// Canonical pair key for the edge.
    pub fn pair(&self) -> &PairKey {
        &self.pair
    }

    /// User who initiated the request.
    pub fn requested_by(&self) -> &UserId {
        &self.requested_by
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Edge creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the edge is still awaiting a response.
    pub fn is_pending(&self) -> bool {
        self.state == ConnectionState::Pending
    }
}

/// Response to a pending connection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionAction {
    Accept,
    Decline,
}

/// Per-user view of the relationship graph, derived from edges.
///
/// The three id-lists are projections of the same edge records, so the
/// symmetry invariant (`B` in `A`'s outgoing iff `A` in `B`'s incoming) holds
/// by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipSummary {
    /// Confirmed, symmetric relationships.
    #[schema(value_type = Vec<String>)]
    pub connections: Vec<UserId>,
    /// Pending requests directed toward this user.
    #[schema(value_type = Vec<String>)]
    pub incoming_requests: Vec<UserId>,
    /// Pending requests this user has sent.
    #[schema(value_type = Vec<String>)]
    pub outgoing_requests: Vec<UserId>,
}

impl RelationshipSummary {
    /// Project a user's edges into the three id-lists.
    ///
    /// Edges not involving `user` are ignored rather than treated as errors,
    /// so callers may pass unfiltered edge sets.
    pub fn from_edges(user: &UserId, edges: &[ConnectionEdge]) -> Self {
        let mut summary = Self::default();
        for edge in edges {
            let Some(other) = edge.pair().other(user) else {
                continue;
            };
            match edge.state() {
                ConnectionState::Connected => summary.connections.push(other.clone()),
                ConnectionState::Pending if edge.requested_by() == user => {
                    summary.outgoing_requests.push(other.clone());
                }
                ConnectionState::Pending => summary.incoming_requests.push(other.clone()),
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn user(n: u128) -> UserId {
        UserId::from_uuid(uuid::Uuid::from_u128(n))
    }

    #[rstest]
    fn pair_key_is_order_independent() {
        let a = user(1);
        let b = user(2);
        let ab = PairKey::new(&a, &b).expect("distinct users");
        let ba = PairKey::new(&b, &a).expect("distinct users");
        assert_eq!(ab, ba);
        assert_eq!(ab.other(&a), Some(&b));
        assert_eq!(ab.other(&b), Some(&a));
    }

    #[rstest]
    fn pair_key_rejects_self_reference() {
        let a = user(7);
        assert_eq!(PairKey::new(&a, &a), Err(PairValidationError::SelfReference));
    }

    #[rstest]
    #[case("accept", ConnectionAction::Accept)]
    #[case("decline", ConnectionAction::Decline)]
    fn actions_deserialise_lowercase(#[case] raw: &str, #[case] expected: ConnectionAction) {
        let parsed: ConnectionAction =
            serde_json::from_str(&format!("\"{raw}\"")).expect("valid action");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn unknown_action_is_rejected() {
        let parsed: Result<ConnectionAction, _> = serde_json::from_str("\"block\"");
        assert!(parsed.is_err());
    }

    #[rstest]
    fn summary_projects_edges_per_user() {
        let a = user(1);
        let b = user(2);
        let c = user(3);
        let now = Utc::now();
        let edges = vec![
            ConnectionEdge::from_parts(
                PairKey::new(&a, &b).expect("pair"),
                a.clone(),
                ConnectionState::Connected,
                now,
            ),
            ConnectionEdge::pending(&c, &b, now).expect("pending edge"),
        ];

        let b_view = RelationshipSummary::from_edges(&b, &edges);
        assert_eq!(b_view.connections, vec![a.clone()]);
        assert_eq!(b_view.incoming_requests, vec![c.clone()]);
        assert!(b_view.outgoing_requests.is_empty());

        let c_view = RelationshipSummary::from_edges(&c, &edges);
        assert_eq!(c_view.outgoing_requests, vec![b.clone()]);
        assert!(c_view.connections.is_empty());

        let a_view = RelationshipSummary::from_edges(&a, &edges);
        assert_eq!(a_view.connections, vec![b]);
    }
}
