use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use grid_rescue_core::CounterStore;
use grid_rescue_system_tally::InMemoryCounters;
use serde::Serialize;

use crate::{response::json_error_with_code, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VisitsCount {
    visits_count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GamesPlayedCount {
    games_played_count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GamesWonCount {
    games_won_count: u64,
}

fn with_store<T, F>(state: &AppState, action: F) -> Result<T, HttpResponse>
where
    F: FnOnce(&mut InMemoryCounters) -> T,
{
    match state.counters.lock() {
        Ok(mut store) => Ok(action(&mut store)),
        Err(_) => {
            tracing::error!("counter store lock poisoned");
            Err(json_error_with_code(
                StatusCode::INTERNAL_SERVER_ERROR,
                "counter store unavailable",
                Some("store_unavailable"),
            ))
        }
    }
}

pub(crate) async fn get_counters(state: web::Data<AppState>) -> impl Responder {
    match with_store(&state, |store| store.counters()) {
        Ok(counters) => HttpResponse::Ok().json(counters),
        Err(response) => response,
    }
}

pub(crate) async fn record_visit(state: web::Data<AppState>) -> impl Responder {
    match with_store(&state, |store| store.record_visit()) {
        Ok(visits_count) => HttpResponse::Ok().json(VisitsCount { visits_count }),
        Err(response) => response,
    }
}

pub(crate) async fn record_game_played(state: web::Data<AppState>) -> impl Responder {
    match with_store(&state, |store| store.record_game_played()) {
        Ok(games_played_count) => HttpResponse::Ok().json(GamesPlayedCount { games_played_count }),
        Err(response) => response,
    }
}

pub(crate) async fn record_game_won(state: web::Data<AppState>) -> impl Responder {
    match with_store(&state, |store| store.record_game_won()) {
        Ok(games_won_count) => HttpResponse::Ok().json(GamesWonCount { games_won_count }),
        Err(response) => response,
    }
}
