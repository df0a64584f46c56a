#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural layout generation that never seals the agent off from the target.
//!
//! [`generate`] is a pure function of its configuration, tuning, and random
//! source. Obstacles are placed one at a time and the layout is re-checked for
//! connectivity after every tentative placement, so a later obstacle can never
//! retroactively close the only path.

pub mod connectivity;

use grid_rescue_core::{CellCoord, CellRect, GridConfig, GridSize, Layout, Obstacle, ObstacleKind};
use rand::{seq::SliceRandom, Rng};

use crate::connectivity::{is_reachable, BlockedCells};

/// Tuning knobs that bound the placement search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationTuning {
    /// Tentative placements a single pass may spend before it restarts.
    pub attempts_per_pass: u32,
    /// Passes allowed before the best partial set is accepted.
    pub max_passes: u32,
    /// Upper bound on bulky obstacles in one layout.
    pub max_bulky: u32,
    /// Places a bulky obstacle before any other when the grid admits one.
    pub lead_with_bulky: bool,
}

impl Default for GenerationTuning {
    fn default() -> Self {
        Self {
            attempts_per_pass: 100,
            max_passes: 5,
            max_bulky: 3,
            lead_with_bulky: true,
        }
    }
}

/// Generates a fresh layout for the provided configuration.
///
/// The agent spawns at bottom centre, the target somewhere in the top third,
/// and up to `config.obstacle_count()` obstacles fill the rest. When the
/// attempt budget runs out the largest valid set found is returned instead.
pub fn generate<R: Rng>(config: &GridConfig, tuning: &GenerationTuning, rng: &mut R) -> Layout {
    let size = config.size();
    let agent = agent_spawn(size);
    let target = sample_target(size, agent, rng);
    let obstacles = place_obstacles(size, agent, target, config.obstacle_count(), tuning, rng);
    Layout {
        agent,
        target,
        obstacles,
    }
}

/// Cell the agent spawns in: bottom row, centre column.
#[must_use]
pub fn agent_spawn(size: GridSize) -> CellCoord {
    CellCoord::new(size.columns() / 2, size.rows().saturating_sub(1))
}

/// Samples a target cell in the top third of the grid that differs from `agent`.
pub fn sample_target<R: Rng>(size: GridSize, agent: CellCoord, rng: &mut R) -> CellCoord {
    let band = (size.rows() / 3).max(1);
    let mut candidates: Vec<CellCoord> = size
        .cells()
        .filter(|cell| cell.row() < band && *cell != agent)
        .collect();

    if candidates.is_empty() {
        candidates = size.cells().filter(|cell| *cell != agent).collect();
    }

    candidates.choose(rng).copied().unwrap_or(agent)
}

fn place_obstacles<R: Rng>(
    size: GridSize,
    agent: CellCoord,
    target: CellCoord,
    count: u32,
    tuning: &GenerationTuning,
    rng: &mut R,
) -> Vec<Obstacle> {
    let wanted = usize::try_from(count).unwrap_or(usize::MAX);
    if wanted == 0 {
        return Vec::new();
    }

    let mut best: Vec<Obstacle> = Vec::new();
    let mut lead_required = tuning.lead_with_bulky && tuning.max_bulky > 0;

    for pass in 0..tuning.max_passes {
        let mut placement = Placement::new(size, agent, target);
        let mut budget = tuning.attempts_per_pass;

        if lead_required && !placement.place_lead(rng, &mut budget) {
            tracing::debug!(pass, "bulky lead exhausted its attempts, restarting without it");
            lead_required = false;
            continue;
        }

        placement.fill(wanted, tuning.max_bulky, rng, &mut budget);
        if placement.obstacles.len() >= wanted {
            return placement.obstacles;
        }

        tracing::debug!(
            pass,
            placed = placement.obstacles.len(),
            wanted,
            "placement pass exhausted its attempts"
        );
        if placement.obstacles.len() > best.len() {
            best = placement.obstacles;
        }
    }

    tracing::warn!(
        requested = wanted,
        placed = best.len(),
        "obstacle generation settled for a smaller set"
    );
    best
}

/// Working state of a single placement pass.
struct Placement {
    size: GridSize,
    agent: CellCoord,
    target: CellCoord,
    blocked: BlockedCells,
    obstacles: Vec<Obstacle>,
    bulky: u32,
}

impl Placement {
    fn new(size: GridSize, agent: CellCoord, target: CellCoord) -> Self {
        Self {
            size,
            agent,
            target,
            blocked: BlockedCells::new(size),
            obstacles: Vec::new(),
            bulky: 0,
        }
    }

    fn place_lead<R: Rng>(&mut self, rng: &mut R, budget: &mut u32) -> bool {
        while *budget > 0 {
            *budget -= 1;
            let Some(anchor) = self.sample_anchor(ObstacleKind::FallenTree, rng) else {
                return false;
            };
            if self.try_place(Obstacle::new(ObstacleKind::FallenTree, anchor)) {
                return true;
            }
        }
        false
    }

    fn fill<R: Rng>(&mut self, wanted: usize, max_bulky: u32, rng: &mut R, budget: &mut u32) {
        while self.obstacles.len() < wanted && *budget > 0 {
            *budget -= 1;

            let Some(obstacle) = self.sample_obstacle(max_bulky, rng) else {
                break;
            };
            let _ = self.try_place(obstacle);
        }
    }

    fn sample_obstacle<R: Rng>(&self, max_bulky: u32, rng: &mut R) -> Option<Obstacle> {
        let kind = ObstacleKind::ALL.choose(rng).copied()?;
        if kind.is_bulky() && self.bulky < max_bulky {
            if let Some(anchor) = self.sample_anchor(kind, rng) {
                return Some(Obstacle::new(kind, anchor));
            }
        }

        let kind = ObstacleKind::SINGLE_CELL.choose(rng).copied()?;
        let anchor = self.sample_anchor(kind, rng)?;
        Some(Obstacle::new(kind, anchor))
    }

    fn sample_anchor<R: Rng>(&self, kind: ObstacleKind, rng: &mut R) -> Option<CellCoord> {
        let footprint = kind.footprint();
        let anchors: Vec<CellCoord> = self
            .size
            .cells()
            .filter(|anchor| {
                self.fits(CellRect::from_origin_and_size(*anchor, footprint))
            })
            .collect();
        anchors.choose(rng).copied()
    }

    fn fits(&self, rect: CellRect) -> bool {
        self.size.contains_rect(rect)
            && !rect.contains(self.agent)
            && !rect.contains(self.target)
            && self.blocked.is_clear(rect)
    }

    fn try_place(&mut self, obstacle: Obstacle) -> bool {
        let footprint = obstacle.footprint();
        if !self.fits(footprint) {
            return false;
        }

        self.blocked.insert(footprint);
        self.obstacles.push(obstacle);

        let blocked = &self.blocked;
        if is_reachable(self.size, self.agent, self.target, |cell| blocked.contains(cell)) {
            if obstacle.kind().is_bulky() {
                self.bulky += 1;
            }
            return true;
        }

        let _ = self.obstacles.pop();
        self.blocked.remove(footprint);
        false
    }
}
