use std::env;

use crate::error::AppError;

/// Database profile enum for different environments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    /// Production Postgres database
    Prod,
    /// Test Postgres database - enforces safety rules
    Test,
    /// Private SQLite in-memory database, one per connection pool
    InMemory,
}

/// Storage selected through `BACKEND_DB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// SeaORM stores on the given profile
    Database(DbProfile),
    /// Process-local stores, no database at all
    Memory,
}

pub const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

/// Read `BACKEND_DB`: `postgres` (default), `sqlite-memory` or `memory`.
pub fn store_backend_from_env() -> Result<StoreBackend, AppError> {
    let raw = env::var("BACKEND_DB").unwrap_or_else(|_| "postgres".to_string());
    match raw.trim().to_ascii_lowercase().as_str() {
        "postgres" => Ok(StoreBackend::Database(DbProfile::Prod)),
        "postgres-test" => Ok(StoreBackend::Database(DbProfile::Test)),
        "sqlite-memory" => Ok(StoreBackend::Database(DbProfile::InMemory)),
        "memory" => Ok(StoreBackend::Memory),
        other => Err(AppError::config(format!(
            "BACKEND_DB must be one of postgres, postgres-test, sqlite-memory, memory; got '{other}'"
        ))),
    }
}

/// Builds a database URL from environment variables based on profile
pub fn db_url(profile: DbProfile) -> Result<String, AppError> {
    if profile == DbProfile::InMemory {
        return Ok(SQLITE_MEMORY_URL.to_string());
    }

    let host = host();
    let port = port();
    let db_name = db_name(profile)?;
    let (username, password) = credentials()?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

/// Get database host from environment (defaults to localhost)
fn host() -> String {
    env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// Get database port from environment (defaults to 5432)
fn port() -> String {
    env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string())
}

fn db_name(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => must_var("PROD_DB"),
        DbProfile::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
        DbProfile::InMemory => Ok(String::new()),
    }
}

fn credentials() -> Result<(String, String), AppError> {
    let username = must_var("APP_DB_USER")?;
    let password = must_var("APP_DB_PASSWORD")?;
    Ok((username, password))
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
