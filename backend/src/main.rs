//! Backend entry-point: wires REST endpoints and OpenAPI docs.

mod server;

use std::env;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};
use server::{ServerConfig, create_server};

const MAX_DB_WAIT_ATTEMPTS: u32 = 6;

fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

/// Build the database pool and wait for it to answer a health check,
/// backing off between attempts. Databases often come up after the app
/// under orchestration.
async fn connect_db(database_url: &str) -> std::io::Result<DbPool> {
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("failed to build database pool: {e}")))?;

    let mut delay = Duration::from_millis(500);
    for attempt in 1..=MAX_DB_WAIT_ATTEMPTS {
        match pool.health_check().await {
            Ok(()) => {
                info!(attempt, "database is reachable");
                return Ok(pool);
            }
            Err(e) if attempt < MAX_DB_WAIT_ATTEMPTS => {
                warn!(attempt, error = %e, "database not ready, retrying");
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(Duration::from_secs(8));
            }
            Err(e) => {
                return Err(std::io::Error::other(format!(
                    "database unreachable after {attempt} attempts: {e}"
                )));
            }
        }
    }
    unreachable!("loop returns on success or final failure")
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let bind_addr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let mut config = ServerConfig::new(key, cookie_secure, SameSite::Lax, bind_addr);
    if let Ok(database_url) = env::var("DATABASE_URL") {
        config = config.with_db_pool(connect_db(&database_url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
