//! Builders selecting Diesel-backed or in-memory port implementations.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use backend::domain::ports::UserAccount;
use backend::domain::{
    ConnectionService, NotificationService, PasswordLoginService, ProfileService, User, UserId,
    hash_password,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DbPool, DieselConnectionRepository, DieselNotificationRepository, DieselUserRepository,
    MemoryConnectionRepository, MemoryNotificationRepository, MemoryUserRepository,
};

use super::ServerConfig;

const DEMO_PASSWORD: &str = "password";

fn demo_account(id: u128, username: &str, display_name: &str) -> UserAccount {
    let id = UserId::from_uuid(uuid::Uuid::from_u128(id));
    let user =
        User::try_from_strings(id.to_string(), display_name).expect("demo user is well formed");
    UserAccount {
        user,
        username: username.to_owned(),
        password_hash: hash_password(DEMO_PASSWORD),
    }
}

fn build_diesel_state(pool: &DbPool) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let connections = Arc::new(DieselConnectionRepository::new(pool.clone()));
    let notifications = Arc::new(DieselNotificationRepository::new(pool.clone()));

    HttpState::new(
        Arc::new(PasswordLoginService::new(users.clone())),
        Arc::new(ProfileService::new(
            users.clone(),
            connections.clone(),
            notifications.clone(),
        )),
        Arc::new(ConnectionService::new(
            users,
            connections,
            notifications.clone(),
        )),
        Arc::new(NotificationService::new(notifications)),
    )
}

fn build_memory_state() -> HttpState {
    warn!("no database configured; using seeded in-memory stores (dev only)");

    let users = Arc::new(MemoryUserRepository::default());
    users.seed(demo_account(0xA1, "ada", "Ada Lovelace"));
    users.seed(demo_account(0xB2, "babbage", "Charles Babbage"));
    users.seed(demo_account(0xC3, "curie", "Marie Curie"));

    let connections = Arc::new(MemoryConnectionRepository::default());
    let notifications = Arc::new(MemoryNotificationRepository::default());

    HttpState::new(
        Arc::new(PasswordLoginService::new(users.clone())),
        Arc::new(ProfileService::new(
            users.clone(),
            connections.clone(),
            notifications.clone(),
        )),
        Arc::new(ConnectionService::new(users, connections, notifications.clone())),
        Arc::new(NotificationService::new(notifications)),
    )
}

/// Build the shared HTTP state for the configured persistence mode.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => build_diesel_state(pool),
        None => build_memory_state(),
    };
    web::Data::new(state)
}
