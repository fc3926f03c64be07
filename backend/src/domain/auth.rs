//! Authentication primitives and the password-based login service.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::error::Error;
use super::ports::{LoginService, UserRepository, UserStoreError};
use super::user::UserId;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Display for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never render the password, even in debug logs.
        write!(f, "LoginCredentials(username={})", self.username)
    }
}

/// Hex-encoded SHA-256 digest of a password, as stored in the user directory.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// [`LoginService`] implementation backed by the user directory.
///
/// Unknown usernames and wrong passwords produce the same error so the
/// endpoint does not leak which usernames exist.
#[derive(Clone)]
pub struct PasswordLoginService<U> {
    users: Arc<U>,
}

impl<U> PasswordLoginService<U> {
    /// Create a new service over the given user repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

fn map_user_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserStoreError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
    }
}

#[async_trait]
impl<U> LoginService for PasswordLoginService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_store_error)?
            .ok_or_else(|| Error::unauthorized("invalid credentials"))?;

        if hash_password(credentials.password()) == account.password_hash {
            Ok(account.user.id().clone())
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::UserAccount;
    use crate::domain::user::User;
    use crate::outbound::persistence::MemoryUserRepository;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials_are_rejected(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        assert_eq!(
            LoginCredentials::try_from_parts(username, password),
            Err(expected)
        );
    }

    #[rstest]
    fn username_is_trimmed() {
        let creds = LoginCredentials::try_from_parts("  ada  ", "pw").expect("valid creds");
        assert_eq!(creds.username(), "ada");
        assert_eq!(creds.password(), "pw");
    }

    #[rstest]
    fn hash_is_stable_hex_sha256() {
        assert_eq!(
            hash_password("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    fn seeded_repo() -> Arc<MemoryUserRepository> {
        let repo = Arc::new(MemoryUserRepository::default());
        let user = User::try_from_strings("3fa85f64-5717-4562-b3fc-2c963f66afa6", "Ada Lovelace")
            .expect("valid user");
        repo.seed(UserAccount {
            user,
            username: "ada".to_owned(),
            password_hash: hash_password("password"),
        });
        repo
    }

    #[actix_web::test]
    async fn authenticate_accepts_known_credentials() {
        let service = PasswordLoginService::new(seeded_repo());
        let creds = LoginCredentials::try_from_parts("ada", "password").expect("valid creds");
        let id = service.authenticate(&creds).await.expect("login succeeds");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    #[case("ada", "wrong")]
    #[case("nobody", "password")]
    #[actix_web::test]
    async fn authenticate_rejects_bad_credentials(#[case] username: &str, #[case] password: &str) {
        let service = PasswordLoginService::new(seeded_repo());
        let creds = LoginCredentials::try_from_parts(username, password).expect("valid shape");
        let error = service
            .authenticate(&creds)
            .await
            .expect_err("login must fail");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), "invalid credentials");
    }
}
