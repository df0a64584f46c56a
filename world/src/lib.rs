#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state for Grid Rescue.
//!
//! The [`World`] owns the grid configuration and the single active session.
//! It is mutated exclusively through [`apply`], which reports every observable
//! change as an [`Event`]. Sessions are never patched: a configuration change
//! or reset discards the current session and generates a new one with a fresh
//! [`SessionId`].

mod layout;

use std::time::Duration;

use grid_rescue_core::{
    CellCoord, Command, Direction, Event, GameState, GridConfig, Layout, Obstacle, SessionId,
};
use grid_rescue_system_generation::{connectivity::BlockedCells, generate, GenerationTuning};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use layout::LayoutError;

const MOVE_COOLDOWN: Duration = Duration::from_millis(150);

/// Tuning knobs for the world and the generator it drives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldTuning {
    /// Window after each move attempt during which further moves are ignored.
    pub move_cooldown: Duration,
    /// Bounds for the obstacle placement search.
    pub generation: GenerationTuning,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            move_cooldown: MOVE_COOLDOWN,
            generation: GenerationTuning::default(),
        }
    }
}

/// Represents the authoritative Grid Rescue world state.
#[derive(Debug)]
pub struct World {
    config: GridConfig,
    tuning: WorldTuning,
    rng: ChaCha8Rng,
    session: Session,
}

impl World {
    /// Creates a world with the default configuration seeded from entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(GridConfig::default(), WorldTuning::default(), ChaCha8Rng::from_entropy())
    }

    /// Creates a world with the default configuration and a reproducible seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(GridConfig::default(), WorldTuning::default(), seed)
    }

    /// Creates a world from an explicit configuration, tuning, and seed.
    #[must_use]
    pub fn with_config(config: GridConfig, tuning: WorldTuning, seed: u64) -> Self {
        Self::from_rng(config, tuning, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a world whose first session uses the supplied layout.
    ///
    /// Later resets generate layouts from `config` and `seed` as usual.
    pub fn with_layout(
        config: GridConfig,
        tuning: WorldTuning,
        layout: Layout,
        seed: u64,
    ) -> Result<Self, LayoutError> {
        let blocked = layout::validate(config.size(), &layout)?;
        Ok(Self {
            config,
            tuning,
            rng: ChaCha8Rng::seed_from_u64(seed),
            session: Session::from_layout(SessionId::new(0), layout, blocked),
        })
    }

    fn from_rng(config: GridConfig, tuning: WorldTuning, mut rng: ChaCha8Rng) -> Self {
        let layout = generate(&config, &tuning.generation, &mut rng);
        let blocked = BlockedCells::from_obstacles(config.size(), &layout.obstacles);
        Self {
            config,
            tuning,
            rng,
            session: Session::from_layout(SessionId::new(0), layout, blocked),
        }
    }

    fn regenerate(&mut self, out_events: &mut Vec<Event>) {
        let layout = generate(&self.config, &self.tuning.generation, &mut self.rng);
        let blocked = BlockedCells::from_obstacles(self.config.size(), &layout.obstacles);
        let id = self.session.id.next();
        self.session = Session::from_layout(id, layout, blocked);

        let obstacle_count = u32::try_from(self.session.obstacles.len()).unwrap_or(u32::MAX);
        tracing::debug!(
            session = id.get(),
            requested = self.config.obstacle_count(),
            placed = obstacle_count,
            "generated session"
        );
        out_events.push(Event::SessionCreated {
            session: id,
            agent: self.session.agent,
            target: self.session.target,
            obstacle_count,
        });
    }

    fn transition(&mut self, requested: GameState, out_events: &mut Vec<Event>) {
        let current = self.session.state;
        let legal = match requested {
            GameState::Playing => current.can_start(),
            GameState::Stopped => current.can_stop(),
            GameState::Ready | GameState::Won => false,
        };

        if !legal {
            tracing::debug!(?current, ?requested, "rejected state transition");
            out_events.push(Event::TransitionRejected { requested, current });
            return;
        }

        self.session.state = requested;
        out_events.push(Event::PlayStateChanged {
            session: self.session.id,
            from: current,
            to: requested,
        });
    }

    fn move_agent(&mut self, dx: i32, dy: i32, out_events: &mut Vec<Event>) {
        let Some(direction) = Direction::from_delta(dx, dy) else {
            out_events.push(Event::MoveVectorRejected { dx, dy });
            return;
        };

        let session = &mut self.session;
        if session.state != GameState::Playing || !session.cooldown.is_zero() {
            return;
        }

        session.cooldown = self.tuning.move_cooldown;

        let from = session.agent;
        let size = self.config.size();
        let destination = from.step(direction).filter(|cell| {
            *cell == session.target || (size.contains(*cell) && !session.blocked.contains(*cell))
        });

        match destination {
            Some(to) => {
                session.agent = to;
                out_events.push(Event::AgentMoved {
                    session: session.id,
                    from,
                    to,
                });
            }
            None => out_events.push(Event::MoveBlocked {
                session: session.id,
                from,
                direction,
            }),
        }
    }

    fn advance_cooldown(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let session = &mut self.session;
        if session.cooldown.is_zero() {
            return;
        }

        session.cooldown = session.cooldown.saturating_sub(dt);
        if session.cooldown.is_zero() {
            out_events.push(Event::CooldownElapsed {
                session: session.id,
            });
        }
    }

    fn check_win(&mut self, out_events: &mut Vec<Event>) {
        let session = &mut self.session;
        if session.state != GameState::Playing || session.agent != session.target {
            return;
        }

        session.state = GameState::Won;
        tracing::debug!(session = session.id.get(), "session won");
        out_events.push(Event::PlayStateChanged {
            session: session.id,
            from: GameState::Playing,
            to: GameState::Won,
        });
        out_events.push(Event::GameWon {
            session: session.id,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid { columns, rows } => {
            world.config = world.config.with_size(columns, rows);
            out_events.push(Event::GridConfigured {
                config: world.config,
            });
            world.regenerate(out_events);
        }
        Command::SetObstacleCount { count } => {
            world.config = world.config.with_obstacle_count(count);
            out_events.push(Event::GridConfigured {
                config: world.config,
            });
            world.regenerate(out_events);
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            world.advance_cooldown(dt, out_events);
        }
        Command::MoveAgent { dx, dy } => world.move_agent(dx, dy, out_events),
        Command::CheckWin => world.check_win(out_events),
        Command::Start => world.transition(GameState::Playing, out_events),
        Command::Stop => world.transition(GameState::Stopped, out_events),
        Command::Reset => world.regenerate(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use grid_rescue_core::{
        CellCoord, GameState, GridConfig, Obstacle, ObstacleKind, SessionId, SessionSnapshot,
    };

    /// Configuration the current session was generated from.
    #[must_use]
    pub fn config(world: &World) -> GridConfig {
        world.config
    }

    /// Identifier of the active session.
    #[must_use]
    pub fn session_id(world: &World) -> SessionId {
        world.session.id
    }

    /// Lifecycle state of the active session.
    #[must_use]
    pub fn state(world: &World) -> GameState {
        world.session.state
    }

    /// Cell currently occupied by the agent.
    #[must_use]
    pub fn agent(world: &World) -> CellCoord {
        world.session.agent
    }

    /// Cell the agent must reach.
    #[must_use]
    pub fn target(world: &World) -> CellCoord {
        world.session.target
    }

    /// Obstacles placed in the active session.
    #[must_use]
    pub fn obstacles(world: &World) -> &[Obstacle] {
        &world.session.obstacles
    }

    /// Kind of the obstacle covering the cell, if any.
    #[must_use]
    pub fn obstacle_at(world: &World, cell: CellCoord) -> Option<ObstacleKind> {
        world
            .session
            .obstacles
            .iter()
            .find(|obstacle| obstacle.covers(cell))
            .map(Obstacle::kind)
    }

    /// Reports whether movement is currently suppressed by the cooldown.
    #[must_use]
    pub fn cooldown_active(world: &World) -> bool {
        !world.session.cooldown.is_zero()
    }

    /// Captures an immutable snapshot of the active session.
    #[must_use]
    pub fn session(world: &World) -> SessionSnapshot {
        let session = &world.session;
        SessionSnapshot {
            id: session.id,
            config: world.config,
            agent: session.agent,
            target: session.target,
            obstacles: session.obstacles.clone(),
            state: session.state,
            cooldown_active: !session.cooldown.is_zero(),
        }
    }
}

#[derive(Debug)]
struct Session {
    id: SessionId,
    agent: CellCoord,
    target: CellCoord,
    obstacles: Vec<Obstacle>,
    blocked: BlockedCells,
    state: GameState,
    cooldown: Duration,
}

impl Session {
    fn from_layout(id: SessionId, layout: Layout, blocked: BlockedCells) -> Self {
        Self {
            id,
            agent: layout.agent,
            target: layout.target,
            obstacles: layout.obstacles,
            blocked,
            state: GameState::Ready,
            cooldown: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_rescue_core::GridSize;

    #[test]
    fn new_world_starts_ready_with_default_grid() {
        let world = World::with_seed(5);
        assert_eq!(query::state(&world), GameState::Ready);
        assert_eq!(query::config(&world).size(), GridSize::new(10, 10));
        assert_eq!(query::session_id(&world), SessionId::new(0));
        assert!(!query::cooldown_active(&world));
    }

    #[test]
    fn configure_grid_clamps_and_regenerates() {
        let mut world = World::with_seed(11);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::ConfigureGrid {
                columns: 1,
                rows: 25,
            },
            &mut events,
        );

        let config = query::config(&world);
        assert_eq!(config.size(), GridSize::new(3, 10));
        assert_eq!(config.obstacle_count(), 15);
        assert_eq!(events.first(), Some(&Event::GridConfigured { config }));
        assert!(matches!(
            events.get(1),
            Some(Event::SessionCreated { session, .. }) if *session == SessionId::new(1)
        ));
    }

    #[test]
    fn regeneration_always_returns_to_ready() {
        let mut world = World::with_seed(2);
        let mut events = Vec::new();
        apply(&mut world, Command::Start, &mut events);
        assert_eq!(query::state(&world), GameState::Playing);

        apply(&mut world, Command::SetObstacleCount { count: 3 }, &mut events);
        assert_eq!(query::state(&world), GameState::Ready);
        assert_eq!(query::config(&world).obstacle_count(), 3);
    }

    #[test]
    fn cooldown_expires_after_enough_ticks() {
        let layout = Layout {
            agent: CellCoord::new(1, 4),
            target: CellCoord::new(1, 0),
            obstacles: Vec::new(),
        };
        let mut world =
            World::with_layout(GridConfig::new(3, 5, 0), WorldTuning::default(), layout, 0)
                .expect("open layout is valid");
        let mut events = Vec::new();
        apply(&mut world, Command::Start, &mut events);
        apply(&mut world, Command::MoveAgent { dx: 0, dy: -1 }, &mut events);
        assert!(query::cooldown_active(&world));

        events.clear();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(100),
            },
            &mut events,
        );
        assert!(query::cooldown_active(&world));

        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(50),
            },
            &mut events,
        );
        assert!(!query::cooldown_active(&world));
        assert_eq!(
            events.last(),
            Some(&Event::CooldownElapsed {
                session: SessionId::new(0)
            })
        );
    }

    #[test]
    fn explicit_layout_honours_custom_tuning() {
        let layout = Layout {
            agent: CellCoord::new(1, 2),
            target: CellCoord::new(1, 0),
            obstacles: Vec::new(),
        };
        let tuning = WorldTuning {
            move_cooldown: Duration::from_millis(40),
            ..WorldTuning::default()
        };
        let mut world = World::with_layout(GridConfig::new(3, 3, 0), tuning, layout, 0)
            .expect("open layout is valid");
        let mut events = Vec::new();
        apply(&mut world, Command::Start, &mut events);
        apply(&mut world, Command::MoveAgent { dx: 0, dy: -1 }, &mut events);
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(40),
            },
            &mut events,
        );
        assert!(!query::cooldown_active(&world));
    }
}
