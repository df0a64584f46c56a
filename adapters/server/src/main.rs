#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Counter server for Grid Rescue.

use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use grid_rescue_server::{config::ServerConfig, configure, AppState};

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!("starting grid rescue counters: listen={}", config.listen);

    let state = web::Data::new(AppState::default());
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(config.listen)
    .with_context(|| format!("failed to bind {}", config.listen))?
    .run()
    .await
    .context("counter server stopped unexpectedly")
}
