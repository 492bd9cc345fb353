use actix_web::HttpServer;
use actix_web::web::Data;
use anyhow::Context;
use dotenvy::dotenv;

mod api;
mod app;
mod auth;
mod config;
mod db;
mod docs;
mod model;
mod repository;
mod routes;
mod seed;

use config::Config;
use db::init_db;

use crate::app::build_app;
use crate::auth::security::{SecurityConfig, WebSecurity};
use crate::repository::EmployeeRepository;
use tracing::info;
use tracing_appender::rolling;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(addr = %config.server_addr, database = %config.database_url, "Server starting...");

    let pool = init_db(&config.database_url, config.pool_size())
        .await
        .context("Failed to connect to database")?;
    let repository = EmployeeRepository::new(pool);

    if config.seed_database {
        seed::load_database(&repository)
            .await
            .context("Failed to preload employees")?;
    }

    let security = WebSecurity::build(SecurityConfig::from_config(&config))
        .map_err(|e| anyhow::anyhow!("Failed to hash configured credentials: {e}"))?;

    let repository = Data::new(repository);
    let security = Data::new(security);

    HttpServer::new(move || build_app(repository.clone(), security.clone()))
    .bind(&config.server_addr)?
    .run()
    .await?;

    Ok(())
}
