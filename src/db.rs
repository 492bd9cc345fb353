use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS employees (
        id                 INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name         TEXT NOT NULL,
        middle_initial     TEXT NOT NULL,
        last_name          TEXT NOT NULL,
        date_of_birth      DATE NOT NULL,
        date_of_employment DATE NOT NULL,
        status             TEXT NOT NULL DEFAULT 'ACTIVE'
    )
"#;

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // Connections are never recycled: for `sqlite::memory:` that would drop the data.
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await?;

    sqlx::query(SCHEMA).execute(&pool).await?;
    debug!(database_url, max_connections, "Employee schema ready");

    Ok(pool)
}
