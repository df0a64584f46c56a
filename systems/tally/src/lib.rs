#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Aggregate counters fed by world events.

mod file;

use grid_rescue_core::{CounterStore, Counters, Event, GameState};

pub use file::{JsonFileCounters, StoreError};

/// Counter store that lives for the duration of the process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryCounters {
    counters: Counters,
}

impl InMemoryCounters {
    /// Creates a store seeded with previously persisted values.
    #[must_use]
    pub fn with_counters(counters: Counters) -> Self {
        Self { counters }
    }
}

impl CounterStore for InMemoryCounters {
    fn counters(&self) -> Counters {
        self.counters
    }

    fn record_visit(&mut self) -> u64 {
        self.counters.visits_count = self.counters.visits_count.saturating_add(1);
        self.counters.visits_count
    }

    fn record_game_played(&mut self) -> u64 {
        self.counters.games_played_count = self.counters.games_played_count.saturating_add(1);
        self.counters.games_played_count
    }

    fn record_game_won(&mut self) -> u64 {
        self.counters.games_won_count = self.counters.games_won_count.saturating_add(1);
        self.counters.games_won_count
    }
}

/// Pure system that forwards lifecycle events to a [`CounterStore`].
///
/// Every accepted start counts as a game played, including resumes from
/// [`GameState::Stopped`]. Every win counts once.
#[derive(Debug, Default)]
pub struct Tally;

impl Tally {
    /// Records the counters implied by `events` into `store`.
    pub fn handle<S>(&self, events: &[Event], store: &mut S)
    where
        S: CounterStore + ?Sized,
    {
        for event in events {
            match event {
                Event::PlayStateChanged {
                    to: GameState::Playing,
                    ..
                } => {
                    let played = store.record_game_played();
                    tracing::debug!(played, "recorded game played");
                }
                Event::GameWon { session } => {
                    let won = store.record_game_won();
                    tracing::debug!(session = session.get(), won, "recorded game won");
                }
                _ => {}
            }
        }
    }
}
