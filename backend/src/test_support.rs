//! Test utilities shared by unit tests (in `src/`) and integration tests
//! (in `tests/`). Compiled only for tests or with the `test-support` feature.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::ports::UserAccount;
use crate::domain::{
    ConnectionService, NotificationService, PasswordLoginService, ProfileService, User, UserId,
    hash_password,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    MemoryConnectionRepository, MemoryNotificationRepository, MemoryUserRepository,
};

/// Password shared by every seeded account.
pub const TEST_PASSWORD: &str = "password";

/// Seeded user ids, stable across test runs.
pub fn ada_id() -> UserId {
    UserId::from_uuid(Uuid::from_u128(0xA1))
}

pub fn babbage_id() -> UserId {
    UserId::from_uuid(Uuid::from_u128(0xB2))
}

pub fn curie_id() -> UserId {
    UserId::from_uuid(Uuid::from_u128(0xC3))
}

/// In-memory adapters plus the HTTP state wired over them.
pub struct TestBackend {
    pub state: HttpState,
    pub users: Arc<MemoryUserRepository>,
    pub connections: Arc<MemoryConnectionRepository>,
    pub notifications: Arc<MemoryNotificationRepository>,
}

fn account(id: UserId, username: &str, display_name: &str) -> UserAccount {
    let user = User::try_from_strings(id.to_string(), display_name).expect("valid seed user");
    UserAccount {
        user,
        username: username.to_owned(),
        password_hash: hash_password(TEST_PASSWORD),
    }
}

/// Build a backend over memory adapters, seeded with three known users.
pub fn seeded_backend() -> TestBackend {
    let users = Arc::new(MemoryUserRepository::default());
    users.seed(account(ada_id(), "ada", "Ada Lovelace"));
    users.seed(account(babbage_id(), "babbage", "Charles Babbage"));
    users.seed(account(curie_id(), "curie", "Marie Curie"));

    let connections = Arc::new(MemoryConnectionRepository::default());
    let notifications = Arc::new(MemoryNotificationRepository::default());

    let state = HttpState::new(
        Arc::new(PasswordLoginService::new(users.clone())),
        Arc::new(ProfileService::new(
            users.clone(),
            connections.clone(),
            notifications.clone(),
        )),
        Arc::new(ConnectionService::new(
            users.clone(),
            connections.clone(),
            notifications.clone(),
        )),
        Arc::new(NotificationService::new(notifications.clone())),
    );

    TestBackend {
        state,
        users,
        connections,
        notifications,
    }
}
