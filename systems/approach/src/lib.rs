#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Two-phase approach protocol for the final step onto the target.
//!
//! Ordinary steps are forwarded to the world immediately. A step that would
//! land on the target instead enters a resolving phase: the move is deferred
//! until the resolve delay elapses, and the win check follows after a second,
//! shorter delay. Time only advances through [`Event::TimeAdvanced`], so the
//! whole sequence is deterministic under a simulated clock.

use std::time::Duration;

use grid_rescue_core::{Command, Direction, Event, GameState, SessionId, SessionSnapshot};

const RESOLVE_DELAY: Duration = Duration::from_millis(1_500);
const WIN_CHECK_DELAY: Duration = Duration::from_millis(300);

/// Delays applied by the approach protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApproachTuning {
    /// Time between the final step request and the deferred move.
    pub resolve_delay: Duration,
    /// Time between the deferred move and the win check.
    pub win_check_delay: Duration,
}

impl Default for ApproachTuning {
    fn default() -> Self {
        Self {
            resolve_delay: RESOLVE_DELAY,
            win_check_delay: WIN_CHECK_DELAY,
        }
    }
}

/// Observable phase of the approach protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApproachPhase {
    /// No deferred continuation is pending.
    Idle,
    /// Waiting to issue the deferred move onto the target.
    Resolving,
    /// The move was issued; waiting to request the win check.
    Committing,
}

/// Pure system that turns step intents into world commands.
#[derive(Debug, Default)]
pub struct Approach {
    tuning: ApproachTuning,
    pending: Option<Pending>,
}

impl Approach {
    /// Creates the system with explicit delays.
    #[must_use]
    pub fn new(tuning: ApproachTuning) -> Self {
        Self {
            tuning,
            pending: None,
        }
    }

    /// Current phase of the protocol.
    #[must_use]
    pub fn phase(&self) -> ApproachPhase {
        match self.pending.as_ref().map(|pending| pending.stage) {
            None => ApproachPhase::Idle,
            Some(Stage::Resolving) => ApproachPhase::Resolving,
            Some(Stage::Committing) => ApproachPhase::Committing,
        }
    }

    /// Reports whether a deferred sequence is in flight.
    ///
    /// Adapters use this to play a transient cue and to keep their clock
    /// running while the player is idle.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.pending.is_some()
    }

    /// Consumes world events, the current session, and an optional step
    /// intent, emitting the commands the world should apply next.
    ///
    /// `session` must reflect the world after `events` were produced. A
    /// pending continuation is dropped when a new session was created, the
    /// session identifier no longer matches, or play left
    /// [`GameState::Playing`].
    pub fn handle(
        &mut self,
        events: &[Event],
        session: &SessionSnapshot,
        intent: Option<Direction>,
        out: &mut Vec<Command>,
    ) {
        let mut elapsed = Duration::ZERO;
        let mut session_replaced = false;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => elapsed = elapsed.saturating_add(*dt),
                Event::SessionCreated { .. } => session_replaced = true,
                _ => {}
            }
        }

        let playing = session.state == GameState::Playing;
        if let Some(pending) = &self.pending {
            if session_replaced || pending.session != session.id || !playing {
                tracing::debug!(
                    session = pending.session.get(),
                    "discarding stale approach continuation"
                );
                self.pending = None;
            }
        }

        self.advance(elapsed, out);

        let Some(direction) = intent else {
            return;
        };

        if self.pending.is_some() || !playing || session.cooldown_active {
            return;
        }

        if session.agent.direction_to(session.target) == Some(direction) {
            self.pending = Some(Pending {
                session: session.id,
                direction,
                stage: Stage::Resolving,
                elapsed: Duration::ZERO,
            });
            self.advance(Duration::ZERO, out);
            return;
        }

        out.push(move_command(direction));
    }

    fn advance(&mut self, dt: Duration, out: &mut Vec<Command>) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        pending.elapsed = pending.elapsed.saturating_add(dt);

        if pending.stage == Stage::Resolving {
            if pending.elapsed < self.tuning.resolve_delay {
                return;
            }
            out.push(move_command(pending.direction));
            pending.elapsed -= self.tuning.resolve_delay;
            pending.stage = Stage::Committing;
        }

        if pending.elapsed >= self.tuning.win_check_delay {
            out.push(Command::CheckWin);
            self.pending = None;
        }
    }
}

fn move_command(direction: Direction) -> Command {
    let (dx, dy) = direction.delta();
    Command::MoveAgent { dx, dy }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Resolving,
    Committing,
}

#[derive(Debug)]
struct Pending {
    session: SessionId,
    direction: Direction,
    stage: Stage,
    elapsed: Duration,
}
