//! Breadth-first reachability checks over a grid with blocked cells.

use std::collections::VecDeque;

use grid_rescue_core::{CellCoord, CellRect, GridSize, Obstacle};

/// Dense set of blocked cells mirroring the grid dimensions.
///
/// Multi-cell obstacles are expanded into every covered cell on insertion, so
/// reachability queries never need to know about obstacle shapes.
#[derive(Clone, Debug)]
pub struct BlockedCells {
    size: GridSize,
    cells: Vec<bool>,
}

impl BlockedCells {
    /// Creates an empty set sized for the provided grid.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        let capacity = usize::try_from(size.cell_count()).unwrap_or(0);
        Self {
            size,
            cells: vec![false; capacity],
        }
    }

    /// Builds the set covered by the footprints of `obstacles`.
    #[must_use]
    pub fn from_obstacles(size: GridSize, obstacles: &[Obstacle]) -> Self {
        let mut blocked = Self::new(size);
        for obstacle in obstacles {
            blocked.insert(obstacle.footprint());
        }
        blocked
    }

    /// Marks every in-bounds cell of the rectangle as blocked.
    pub fn insert(&mut self, rect: CellRect) {
        self.fill(rect, true);
    }

    /// Clears every in-bounds cell of the rectangle.
    pub fn remove(&mut self, rect: CellRect) {
        self.fill(rect, false);
    }

    /// Reports whether the cell is blocked. Out-of-bounds cells are not.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(false)
    }

    /// Reports whether no cell of the rectangle is blocked.
    #[must_use]
    pub fn is_clear(&self, rect: CellRect) -> bool {
        rect.cells().all(|cell| !self.contains(cell))
    }

    fn fill(&mut self, rect: CellRect, value: bool) {
        for cell in rect.cells() {
            if let Some(index) = self.index(cell) {
                if let Some(slot) = self.cells.get_mut(index) {
                    *slot = value;
                }
            }
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.size.contains(cell) {
            return None;
        }
        let width = usize::try_from(self.size.columns()).ok()?;
        index(width, cell)
    }
}

/// Reports whether `goal` can be reached from `start` through orthogonal steps.
///
/// The search expands only in-bounds cells for which `is_blocked` returns
/// `false`. A blocked goal is unreachable unless it equals `start`.
pub fn is_reachable<F>(
    size: GridSize,
    start: CellCoord,
    goal: CellCoord,
    mut is_blocked: F,
) -> bool
where
    F: FnMut(CellCoord) -> bool,
{
    if !size.contains(start) || !size.contains(goal) {
        return false;
    }

    if start == goal {
        return true;
    }

    let Ok(width) = usize::try_from(size.columns()) else {
        return false;
    };
    let cell_count = usize::try_from(size.cell_count()).unwrap_or(0);
    let mut visited = vec![false; cell_count];

    let Some(start_index) = index(width, start) else {
        return false;
    };
    visited[start_index] = true;

    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        for neighbor in neighbors(cell, size) {
            let Some(neighbor_index) = index(width, neighbor) else {
                continue;
            };

            if visited[neighbor_index] {
                continue;
            }
            visited[neighbor_index] = true;

            if is_blocked(neighbor) {
                continue;
            }

            if neighbor == goal {
                return true;
            }

            queue.push_back(neighbor);
        }
    }

    false
}

fn neighbors(cell: CellCoord, size: GridSize) -> impl Iterator<Item = CellCoord> {
    let mut candidates = [None; 4];
    let mut count = 0;

    if let Some(row) = cell.row().checked_sub(1) {
        candidates[count] = Some(CellCoord::new(cell.column(), row));
        count += 1;
    }

    if let Some(column) = cell.column().checked_add(1) {
        if column < size.columns() {
            candidates[count] = Some(CellCoord::new(column, cell.row()));
            count += 1;
        }
    }

    if let Some(row) = cell.row().checked_add(1) {
        if row < size.rows() {
            candidates[count] = Some(CellCoord::new(cell.column(), row));
            count += 1;
        }
    }

    if let Some(column) = cell.column().checked_sub(1) {
        candidates[count] = Some(CellCoord::new(column, cell.row()));
        count += 1;
    }

    candidates.into_iter().take(count).flatten()
}

fn index(width: usize, cell: CellCoord) -> Option<usize> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}
