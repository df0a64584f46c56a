//! Text rendering of the active session.

use std::fmt::Write as _;

use grid_rescue_core::{CellCoord, GameState, ObstacleKind};
use grid_rescue_world::{query, World};

fn obstacle_glyph(kind: ObstacleKind) -> char {
    match kind {
        ObstacleKind::Puddle => '~',
        ObstacleKind::FallenTree => '#',
        ObstacleKind::TrafficCone => '^',
        ObstacleKind::BouncingBall => 'o',
        ObstacleKind::Goose => 'g',
    }
}

/// Draws the board one row per line followed by a status line.
pub(crate) fn board(world: &World, resolving: bool) -> String {
    let size = query::config(world).size();
    let agent = query::agent(world);
    let target = query::target(world);

    let mut out = String::new();
    for row in 0..size.rows() {
        for column in 0..size.columns() {
            let cell = CellCoord::new(column, row);
            let glyph = if cell == agent {
                'T'
            } else if cell == target {
                'F'
            } else {
                query::obstacle_at(world, cell).map_or('.', obstacle_glyph)
            };
            out.push(glyph);
            if column + 1 < size.columns() {
                out.push(' ');
            }
        }
        out.push('\n');
    }

    let _ = write!(out, "{}", status(world, resolving));
    out
}

fn status(world: &World, resolving: bool) -> String {
    let config = query::config(world);
    let size = config.size();
    let headline = match query::state(world) {
        GameState::Ready => "ready: type `start` to roll out",
        GameState::Playing if resolving => "spraying water on the fire...",
        GameState::Playing => "driving",
        GameState::Stopped => "paused: type `start` to resume",
        GameState::Won => "fire out! type `reset` for another",
    };
    format!(
        "[{}x{}, {} obstacles] {headline}",
        size.columns(),
        size.rows(),
        query::obstacles(world).len()
    )
}

/// Legend printed once at boot.
pub(crate) const LEGEND: &str =
    "T truck  F fire  ~ puddle  # fallen tree  ^ traffic cone  o bouncing ball  g goose";
