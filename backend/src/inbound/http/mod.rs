//! HTTP inbound adapter exposing the REST endpoints.

pub mod connections;
pub mod error;
pub mod health;
pub mod notifications;
pub mod session;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod users;

pub use crate::domain::ApiResult;
