#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! HTTP surface for the Grid Rescue aggregate counters.
//!
//! Every route answers with JSON. Reads return the full [`Counters`] record;
//! increments return only the counter they touched, keyed the same way.
//!
//! [`Counters`]: grid_rescue_core::Counters

pub mod config;
mod handlers;
mod response;

use std::sync::Mutex;

use actix_web::web;
use grid_rescue_system_tally::InMemoryCounters;

/// Shared state handed to every request handler.
#[derive(Debug, Default)]
pub struct AppState {
    counters: Mutex<InMemoryCounters>,
}

impl AppState {
    /// Creates state backed by an existing store.
    #[must_use]
    pub fn new(counters: InMemoryCounters) -> Self {
        Self {
            counters: Mutex::new(counters),
        }
    }
}

/// Registers the counter routes on an application or scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let _ = cfg
        .route("/counters", web::get().to(handlers::get_counters))
        .route("/counters/visit", web::post().to(handlers::record_visit))
        .route(
            "/counters/game-played",
            web::post().to(handlers::record_game_played),
        )
        .route(
            "/counters/game-won",
            web::post().to(handlers::record_game_won),
        );
}
