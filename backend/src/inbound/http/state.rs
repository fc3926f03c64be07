//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data`, so they depend
//! only on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ConnectionFlow, LoginService, NotificationFeed, ProfileQuery};

/// Dependency bundle handed to every HTTP handler.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn ProfileQuery>,
    pub connections: Arc<dyn ConnectionFlow>,
    pub notifications: Arc<dyn NotificationFeed>,
}

impl HttpState {
    /// Bundle the port implementations for handler injection.
    pub fn new(
        login: Arc<dyn LoginService>,
        profile: Arc<dyn ProfileQuery>,
        connections: Arc<dyn ConnectionFlow>,
        notifications: Arc<dyn NotificationFeed>,
    ) -> Self {
        Self {
            login,
            profile,
            connections,
            notifications,
        }
    }
}
