//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports describe what inbound adapters may ask of the domain;
//! driven ports describe how the domain expects to talk to persistence.
//! Each driven port exposes strongly typed errors so adapters map their
//! failures into predictable variants instead of returning `anyhow::Result`.

mod macros;

mod connection_flow;
mod connection_repository;
mod login_service;
mod notification_feed;
mod notification_repository;
mod profile_query;
mod user_repository;

pub use connection_flow::ConnectionFlow;
pub use connection_repository::{ConnectionRepository, ConnectionStoreError};
pub use login_service::LoginService;
pub use notification_feed::NotificationFeed;
pub use notification_repository::{NotificationRepository, NotificationStoreError};
pub use profile_query::{CurrentUserProfile, ProfileQuery};
pub use user_repository::{UserAccount, UserRepository, UserStoreError};
