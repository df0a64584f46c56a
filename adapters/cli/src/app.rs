//! Game loop gluing the world to the approach and tally systems.

use std::{
    fmt,
    time::{Duration, Instant},
};

use grid_rescue_core::{Command, CounterStore, Direction, Event, GridConfig};
use grid_rescue_system_approach::Approach;
use grid_rescue_system_tally::Tally;
use grid_rescue_world::{self as world, query, World};

const RESOLVE_FRAME: Duration = Duration::from_millis(50);

/// Player-facing feedback raised by world events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cue {
    /// A step ran into an obstacle or the grid edge.
    Bump,
    /// The truck reached the fire and the win was confirmed.
    FireOut,
}

impl Cue {
    fn for_event(event: &Event) -> Option<Self> {
        match event {
            Event::MoveBlocked { .. } => Some(Self::Bump),
            Event::GameWon { .. } => Some(Self::FireOut),
            _ => None,
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bump => f.write_str("*bump* the truck can't go that way"),
            Self::FireOut => f.write_str("*whoosh* the fire is out!"),
        }
    }
}

/// Owns the world and its systems for the lifetime of the process.
#[derive(Debug)]
pub(crate) struct Game<S> {
    world: World,
    approach: Approach,
    tally: Tally,
    counters: S,
    events: Vec<Event>,
    cues: Vec<Cue>,
    last_tick: Instant,
}

impl<S: CounterStore> Game<S> {
    /// Starts a game over `world`, counting the visit in `counters`.
    pub(crate) fn new(world: World, mut counters: S) -> Self {
        let visits = counters.record_visit();
        tracing::debug!(visits, "recorded visit");
        Self {
            world,
            approach: Approach::default(),
            tally: Tally,
            counters,
            events: Vec::new(),
            cues: Vec::new(),
            last_tick: Instant::now(),
        }
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn counters(&self) -> &S {
        &self.counters
    }

    /// Drains the feedback raised since the last call.
    pub(crate) fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    pub(crate) fn is_resolving(&self) -> bool {
        self.approach.is_resolving()
    }

    /// Applies a lifecycle or configuration command and lets systems react.
    pub(crate) fn submit(&mut self, command: Command) {
        self.catch_up();
        self.apply(command);
        self.pump(None);
    }

    /// Forwards a step intent through the approach protocol.
    pub(crate) fn step(&mut self, direction: Direction) {
        self.catch_up();
        self.pump(Some(direction));
    }

    /// Advances the clock to now without any player action.
    pub(crate) fn refresh(&mut self) {
        self.catch_up();
        self.pump(None);
    }

    /// Drives the clock in small frames until a pending approach completes.
    ///
    /// Stops early with the first error returned by `on_frame`.
    pub(crate) fn finish_resolving<F, E>(&mut self, mut on_frame: F) -> Result<(), E>
    where
        F: FnMut(&Self) -> Result<(), E>,
    {
        while self.approach.is_resolving() {
            on_frame(self)?;
            std::thread::sleep(RESOLVE_FRAME);
            self.refresh();
        }
        Ok(())
    }

    fn catch_up(&mut self) {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        self.apply(Command::Tick { dt });
    }

    fn apply(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut self.events);
    }

    fn pump(&mut self, mut intent: Option<Direction>) {
        loop {
            let events = std::mem::take(&mut self.events);
            self.tally.handle(&events, &mut self.counters);
            log_feedback(&events);
            self.cues.extend(events.iter().filter_map(Cue::for_event));

            let session = query::session(&self.world);
            let mut commands = Vec::new();
            self.approach
                .handle(&events, &session, intent.take(), &mut commands);

            if commands.is_empty() {
                return;
            }
            for command in commands {
                self.apply(command);
            }
        }
    }
}

fn log_feedback(events: &[Event]) {
    for event in events {
        match event {
            Event::MoveBlocked { from, direction, .. } => {
                tracing::debug!(?from, ?direction, "bump");
            }
            Event::GameWon { session } => {
                tracing::debug!(session = session.get(), "fire extinguished");
            }
            Event::MoveVectorRejected { dx, dy } => {
                tracing::warn!(dx, dy, "rejected move vector");
            }
            _ => {}
        }
    }
}

/// Builds the initial world from command-line options.
pub(crate) fn boot_world(config: GridConfig, seed: Option<u64>) -> World {
    match seed {
        Some(seed) => World::with_config(config, Default::default(), seed),
        None => {
            let mut world = World::new();
            let mut events = Vec::new();
            let size = config.size();
            world::apply(
                &mut world,
                Command::ConfigureGrid {
                    columns: size.columns(),
                    rows: size.rows(),
                },
                &mut events,
            );
            world::apply(
                &mut world,
                Command::SetObstacleCount {
                    count: config.obstacle_count(),
                },
                &mut events,
            );
            world
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_rescue_core::{CellCoord, GameState, Layout, SessionId};
    use grid_rescue_system_tally::InMemoryCounters;
    use grid_rescue_world::WorldTuning;

    fn game_with_agent_at(agent: CellCoord) -> Game<InMemoryCounters> {
        let layout = Layout {
            agent,
            target: CellCoord::new(1, 0),
            obstacles: Vec::new(),
        };
        let world =
            World::with_layout(GridConfig::new(3, 3, 0), WorldTuning::default(), layout, 5)
                .expect("fixture layout is valid");
        Game::new(world, InMemoryCounters::default())
    }

    #[test]
    fn boot_counts_a_visit() {
        let game = Game::new(World::with_seed(1), InMemoryCounters::default());
        assert_eq!(game.counters().counters().visits_count, 1);
    }

    #[test]
    fn blocked_step_raises_a_bump_cue() {
        let mut game = game_with_agent_at(CellCoord::new(1, 2));
        game.submit(Command::Start);
        assert!(game.take_cues().is_empty());

        game.step(Direction::South);

        let cues = game.take_cues();
        assert_eq!(cues, vec![Cue::Bump]);
        assert!(cues[0].to_string().contains("bump"));
        assert_eq!(query::agent(game.world()), CellCoord::new(1, 2));
        assert!(game.take_cues().is_empty());
    }

    #[test]
    fn only_bumps_and_wins_are_cued() {
        let won = Event::GameWon {
            session: SessionId::new(2),
        };
        assert_eq!(Cue::for_event(&won), Some(Cue::FireOut));
        assert!(Cue::FireOut.to_string().contains("fire is out"));
        assert_eq!(Cue::for_event(&Event::MoveVectorRejected { dx: 2, dy: 0 }), None);
    }

    #[test]
    fn frame_errors_stop_the_resolving_loop() {
        let mut game = game_with_agent_at(CellCoord::new(1, 1));
        game.submit(Command::Start);
        game.step(Direction::North);
        assert!(game.is_resolving());

        let mut frames = 0;
        let outcome = game.finish_resolving(|_| {
            frames += 1;
            Err("terminal closed")
        });

        assert_eq!(outcome, Err("terminal closed"));
        assert_eq!(frames, 1);
        assert!(game.is_resolving());
    }

    #[test]
    fn starting_play_is_tallied() {
        let mut game = Game::new(World::with_seed(1), InMemoryCounters::default());
        game.submit(Command::Start);
        assert_eq!(query::state(game.world()), GameState::Playing);
        assert_eq!(game.counters().counters().games_played_count, 1);
    }

    #[test]
    fn seeded_boot_honours_the_configuration() {
        let world = boot_world(GridConfig::new(4, 6, 3), Some(7));
        let config = query::config(&world);
        assert_eq!(config.size().columns(), 4);
        assert_eq!(config.size().rows(), 6);
        assert_eq!(config.obstacle_count(), 3);
    }

    #[test]
    fn unseeded_boot_applies_the_configuration() {
        let world = boot_world(GridConfig::new(5, 5, 2), None);
        assert_eq!(query::config(&world), GridConfig::new(5, 5, 2));
    }
}
