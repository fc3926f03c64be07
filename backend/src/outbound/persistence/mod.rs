//! Persistence adapters implementing the domain's driven ports.
//!
//! Two families live here: Diesel-backed adapters for PostgreSQL and
//! in-memory adapters for tests and dependency-free local runs. Both sides
//! of every port share the same behavioural contract, so the domain services
//! cannot tell them apart.

mod diesel_connection_repository;
mod diesel_notification_repository;
mod diesel_user_repository;
mod memory;
mod models;
mod pool;
pub(crate) mod schema;

pub use diesel_connection_repository::DieselConnectionRepository;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use memory::{MemoryConnectionRepository, MemoryNotificationRepository, MemoryUserRepository};
pub use pool::{DbPool, PoolConfig, PoolError};
