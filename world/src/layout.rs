//! Validation of explicitly supplied layouts.

use grid_rescue_core::{CellCoord, GridSize, Layout};
use grid_rescue_system_generation::connectivity::{is_reachable, BlockedCells};
use thiserror::Error;

/// Reasons an explicit layout cannot back a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The agent or target lies outside the grid.
    #[error("cell ({}, {}) lies outside the {}x{} grid", .cell.column(), .cell.row(), .size.columns(), .size.rows())]
    OutOfBounds {
        /// Offending cell.
        cell: CellCoord,
        /// Grid the layout was checked against.
        size: GridSize,
    },
    /// The agent starts on the target.
    #[error("agent and target share cell ({}, {})", .cell.column(), .cell.row())]
    AgentOnTarget {
        /// Cell claimed by both.
        cell: CellCoord,
    },
    /// An obstacle footprint extends beyond the grid.
    #[error("obstacle anchored at ({}, {}) extends beyond the grid", .anchor.column(), .anchor.row())]
    ObstacleOutOfBounds {
        /// Anchor of the offending obstacle.
        anchor: CellCoord,
    },
    /// An obstacle footprint covers the agent or the target.
    #[error("obstacle anchored at ({}, {}) covers the agent or the target", .anchor.column(), .anchor.row())]
    CoversFixedCell {
        /// Anchor of the offending obstacle.
        anchor: CellCoord,
    },
    /// Two obstacle footprints share a cell.
    #[error("obstacles anchored at ({}, {}) and ({}, {}) overlap", .first.column(), .first.row(), .second.column(), .second.row())]
    Overlap {
        /// Anchor of the earlier obstacle.
        first: CellCoord,
        /// Anchor of the later obstacle.
        second: CellCoord,
    },
    /// No obstacle-free path joins the agent and the target.
    #[error("no obstacle-free path joins the agent and the target")]
    Unreachable,
}

/// Checks every session invariant and returns the expanded blocked cells.
pub(crate) fn validate(size: GridSize, layout: &Layout) -> Result<BlockedCells, LayoutError> {
    for cell in [layout.agent, layout.target] {
        if !size.contains(cell) {
            return Err(LayoutError::OutOfBounds { cell, size });
        }
    }

    if layout.agent == layout.target {
        return Err(LayoutError::AgentOnTarget { cell: layout.agent });
    }

    for (index, obstacle) in layout.obstacles.iter().enumerate() {
        let footprint = obstacle.footprint();
        if !size.contains_rect(footprint) {
            return Err(LayoutError::ObstacleOutOfBounds {
                anchor: obstacle.anchor(),
            });
        }

        if footprint.contains(layout.agent) || footprint.contains(layout.target) {
            return Err(LayoutError::CoversFixedCell {
                anchor: obstacle.anchor(),
            });
        }

        if let Some(earlier) = layout.obstacles[..index]
            .iter()
            .find(|earlier| earlier.footprint().overlaps(&footprint))
        {
            return Err(LayoutError::Overlap {
                first: earlier.anchor(),
                second: obstacle.anchor(),
            });
        }
    }

    let blocked = BlockedCells::from_obstacles(size, &layout.obstacles);
    if !is_reachable(size, layout.agent, layout.target, |cell| {
        blocked.contains(cell)
    }) {
        return Err(LayoutError::Unreachable);
    }

    Ok(blocked)
}
