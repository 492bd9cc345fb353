use std::env;
use std::str::FromStr;

use anyhow::Context;
use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub database_max_connections: u32,

    // Single in-memory principal guarding DELETE
    pub admin_username: String,
    pub admin_password: String,
    pub auth_realm: String,

    pub seed_database: bool,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080"),
            database_url: var_or("DATABASE_URL", "sqlite::memory:"),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,

            admin_username: var_or("ADMIN_USERNAME", "admin"),
            admin_password: var_or("ADMIN_PASSWORD", "admin"),
            auth_realm: var_or("AUTH_REALM", "admin"),

            seed_database: parse_var("SEED_DATABASE", true)?,
            log_dir: var_or("LOG_DIR", "logs"),
        })
    }

    /// An in-memory SQLite database lives and dies with its connection, so the
    /// pool is pinned to one.
    pub fn pool_size(&self) -> u32 {
        if is_memory_url(&self.database_url) {
            1
        } else {
            self.database_max_connections.max(1)
        }
    }
}

pub fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}
