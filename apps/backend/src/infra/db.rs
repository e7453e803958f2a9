use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

/// Connect to the database for `profile`. Does NOT run migrations.
///
/// An in-memory SQLite database exists per connection, so that profile is
/// pinned to a single pooled connection that is never recycled.
pub async fn connect_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let database_url = db_url(profile)?;

    let mut opts = ConnectOptions::new(database_url);
    opts.sqlx_logging(false);
    match profile {
        DbProfile::InMemory => {
            opts.max_connections(1)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(u32::MAX as u64))
                .max_lifetime(Duration::from_secs(u32::MAX as u64));
        }
        DbProfile::Prod | DbProfile::Test => {
            opts.max_connections(10)
                .connect_timeout(Duration::from_secs(5))
                .acquire_timeout(Duration::from_secs(5));
        }
    }

    Ok(Database::connect(opts).await?)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile).await?;
    migration::migrate(&conn).await?;
    info!(profile = ?profile, "database ready");
    Ok(conn)
}
