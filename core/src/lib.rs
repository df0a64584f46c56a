#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Grid Rescue engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams, query immutable snapshots such as
//! [`SessionSnapshot`], and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Smallest permitted grid dimension along either axis.
pub const MIN_GRID_DIMENSION: u32 = 3;

/// Largest permitted grid dimension along either axis.
pub const MAX_GRID_DIMENSION: u32 = 10;

/// Grid dimension used along both axes when the experience boots.
pub const DEFAULT_GRID_DIMENSION: u32 = 10;

/// Share of grid cells, in percent, that may hold obstacles.
pub const OBSTACLE_DENSITY_PERCENT: u32 = 50;

/// Lifecycle states of a single game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    /// Freshly generated layout awaiting the first start.
    Ready,
    /// The agent accepts movement.
    Playing,
    /// Play was paused; the layout is kept.
    Stopped,
    /// The agent reached the target. Only a reset leaves this state.
    Won,
}

impl GameState {
    /// Reports whether `start` is a legal transition from this state.
    #[must_use]
    pub const fn can_start(self) -> bool {
        matches!(self, Self::Ready | Self::Stopped)
    }

    /// Reports whether `stop` is a legal transition from this state.
    #[must_use]
    pub const fn can_stop(self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Resizes the grid and regenerates the session.
    ConfigureGrid {
        /// Requested number of columns, clamped to the permitted range.
        columns: u32,
        /// Requested number of rows, clamped to the permitted range.
        rows: u32,
    },
    /// Changes the requested obstacle count and regenerates the session.
    SetObstacleCount {
        /// Requested obstacle count, clamped to the density ceiling.
        count: u32,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the agent step by the provided unit vector.
    MoveAgent {
        /// Horizontal component; positive values move toward higher columns.
        dx: i32,
        /// Vertical component; positive values move toward higher rows.
        dy: i32,
    },
    /// Requests evaluation of the win condition.
    CheckWin,
    /// Requests entry into [`GameState::Playing`].
    Start,
    /// Requests a pause of active play.
    Stop,
    /// Discards the session and generates a fresh layout.
    Reset,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms the grid configuration after clamping.
    GridConfigured {
        /// Configuration that is now authoritative.
        config: GridConfig,
    },
    /// Announces that a new session replaced the previous one.
    SessionCreated {
        /// Identifier of the new session.
        session: SessionId,
        /// Cell the agent starts from.
        agent: CellCoord,
        /// Cell the agent must reach.
        target: CellCoord,
        /// Number of obstacles actually placed.
        obstacle_count: u32,
    },
    /// Confirms a play state transition.
    PlayStateChanged {
        /// Session whose state changed.
        session: SessionId,
        /// State before the transition.
        from: GameState,
        /// State after the transition.
        to: GameState,
    },
    /// Reports that a requested transition is not legal from the current state.
    TransitionRejected {
        /// State the caller asked for.
        requested: GameState,
        /// State the session remained in.
        current: GameState,
    },
    /// Confirms that the agent moved between two cells.
    AgentMoved {
        /// Session the move belongs to.
        session: SessionId,
        /// Cell the agent occupied before moving.
        from: CellCoord,
        /// Cell the agent occupies after moving.
        to: CellCoord,
    },
    /// Reports a collision with an obstacle or the grid edge.
    MoveBlocked {
        /// Session the attempt belongs to.
        session: SessionId,
        /// Cell the agent stayed in.
        from: CellCoord,
        /// Direction of the rejected step.
        direction: Direction,
    },
    /// Reports a move request whose vector is not one of the four unit steps.
    MoveVectorRejected {
        /// Horizontal component supplied by the caller.
        dx: i32,
        /// Vertical component supplied by the caller.
        dy: i32,
    },
    /// Announces that the movement cooldown window closed.
    CooldownElapsed {
        /// Session the cooldown belonged to.
        session: SessionId,
    },
    /// Announces that the agent reached the target.
    GameWon {
        /// Session that was won.
        session: SessionId,
    },
}

/// Cardinal movement directions available to the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All directions in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Interprets a movement vector, accepting only the four unit steps.
    ///
    /// Diagonal, zero, and longer vectors yield `None`; they are never
    /// normalised.
    #[must_use]
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Self::North),
            (1, 0) => Some(Self::East),
            (0, 1) => Some(Self::South),
            (-1, 0) => Some(Self::West),
            _ => None,
        }
    }

    /// Unit vector for the direction as `(dx, dy)`.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Identifier issued to every generated session.
///
/// Identifiers grow monotonically within a world, so a deferred continuation
/// can tell whether the session it captured is still current.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Creates a new session identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Identifier that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Reports whether the cells are orthogonal neighbours.
    ///
    /// Identical and diagonal cells are not adjacent.
    #[must_use]
    pub fn is_adjacent_to(self, other: CellCoord) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Cell reached by stepping once in `direction`, if it has non-negative
    /// coordinates. Upper bounds are the caller's concern.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (dx, dy) = direction.delta();
        let column = self.column.checked_add_signed(dx)?;
        let row = self.row.checked_add_signed(dy)?;
        Some(CellCoord::new(column, row))
    }

    /// Direction leading from `self` to an adjacent `other`.
    #[must_use]
    pub fn direction_to(self, other: CellCoord) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| self.step(*direction) == Some(other))
    }
}

/// Dimensions of the playing grid measured in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    columns: u32,
    rows: u32,
}

impl GridSize {
    /// Creates a grid size without clamping.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells covered by the grid.
    #[must_use]
    pub const fn cell_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Reports whether every cell of the rectangle lies inside the grid.
    #[must_use]
    pub const fn contains_rect(&self, rect: CellRect) -> bool {
        if rect.size.width() == 0 || rect.size.height() == 0 {
            return false;
        }
        match (rect.right(), rect.bottom()) {
            (Some(right), Some(bottom)) => right <= self.columns && bottom <= self.rows,
            _ => false,
        }
    }

    /// Iterates every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.columns;
        (0..self.rows)
            .flat_map(move |row| (0..columns).map(move |column| CellCoord::new(column, row)))
    }
}

/// Axis-aligned rectangle expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    origin: CellCoord,
    size: CellRectSize,
}

impl CellRect {
    /// Constructs a rectangle from an origin cell and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: CellCoord, size: CellRectSize) -> Self {
        Self { origin, size }
    }

    /// Upper-left cell that anchors the rectangle.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Dimensions of the rectangle measured in whole cells.
    #[must_use]
    pub const fn size(&self) -> CellRectSize {
        self.size
    }

    /// Reports whether the rectangle covers the cell.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() >= self.origin.column()
            && cell.row() >= self.origin.row()
            && cell.column() - self.origin.column() < self.size.width()
            && cell.row() - self.origin.row() < self.size.height()
    }

    /// Reports whether two rectangles share at least one cell.
    #[must_use]
    pub const fn overlaps(&self, other: &CellRect) -> bool {
        let left = self.origin.column() as u64;
        let top = self.origin.row() as u64;
        let other_left = other.origin.column() as u64;
        let other_top = other.origin.row() as u64;
        left < other_left + other.size.width() as u64
            && other_left < left + self.size.width() as u64
            && top < other_top + other.size.height() as u64
            && other_top < top + self.size.height() as u64
    }

    /// Iterates the covered cells in row-major order.
    ///
    /// Cells whose coordinates would exceed `u32::MAX` are skipped.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let origin = self.origin;
        let width = self.size.width();
        (0..self.size.height()).flat_map(move |dy| {
            (0..width).filter_map(move |dx| {
                Some(CellCoord::new(
                    origin.column().checked_add(dx)?,
                    origin.row().checked_add(dy)?,
                ))
            })
        })
    }

    /// Column one past the right edge, if representable.
    const fn right(&self) -> Option<u32> {
        self.origin.column().checked_add(self.size.width())
    }

    /// Row one past the bottom edge, if representable.
    const fn bottom(&self) -> Option<u32> {
        self.origin.row().checked_add(self.size.height())
    }
}

/// Size of a [`CellRect`] measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRectSize {
    width: u32,
    height: u32,
}

impl CellRectSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the rectangle in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rectangle in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Varieties of obstacle that can block the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObstacleKind {
    /// Single-cell puddle.
    Puddle,
    /// Bulky fallen tree spanning a 2x2 block.
    FallenTree,
    /// Single-cell traffic cone.
    TrafficCone,
    /// Single-cell bouncing ball.
    BouncingBall,
    /// Single-cell goose.
    Goose,
}

impl ObstacleKind {
    /// Every obstacle kind in declaration order.
    pub const ALL: [ObstacleKind; 5] = [
        Self::Puddle,
        Self::FallenTree,
        Self::TrafficCone,
        Self::BouncingBall,
        Self::Goose,
    ];

    /// Kinds that occupy exactly one cell.
    pub const SINGLE_CELL: [ObstacleKind; 4] = [
        Self::Puddle,
        Self::TrafficCone,
        Self::BouncingBall,
        Self::Goose,
    ];

    /// Reports the footprint size associated with the kind.
    #[must_use]
    pub const fn footprint(self) -> CellRectSize {
        match self {
            Self::FallenTree => CellRectSize::new(2, 2),
            Self::Puddle | Self::TrafficCone | Self::BouncingBall | Self::Goose => {
                CellRectSize::new(1, 1)
            }
        }
    }

    /// Reports whether the kind spans more than a single cell.
    #[must_use]
    pub const fn is_bulky(self) -> bool {
        matches!(self, Self::FallenTree)
    }
}

/// Obstacle placed on the grid, anchored at its upper-left cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Obstacle {
    kind: ObstacleKind,
    anchor: CellCoord,
}

impl Obstacle {
    /// Creates an obstacle of `kind` anchored at `anchor`.
    #[must_use]
    pub const fn new(kind: ObstacleKind, anchor: CellCoord) -> Self {
        Self { kind, anchor }
    }

    /// Variety of the obstacle.
    #[must_use]
    pub const fn kind(&self) -> ObstacleKind {
        self.kind
    }

    /// Upper-left cell of the footprint.
    #[must_use]
    pub const fn anchor(&self) -> CellCoord {
        self.anchor
    }

    /// Full set of cells occupied by the obstacle.
    #[must_use]
    pub const fn footprint(&self) -> CellRect {
        CellRect::from_origin_and_size(self.anchor, self.kind.footprint())
    }

    /// Reports whether the obstacle's footprint covers the cell.
    #[must_use]
    pub const fn covers(&self, cell: CellCoord) -> bool {
        self.footprint().contains(cell)
    }
}

/// Placement of the agent, the target, and every obstacle for one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Cell the agent starts from.
    pub agent: CellCoord,
    /// Cell the agent must reach.
    pub target: CellCoord,
    /// Obstacles placed on the grid.
    pub obstacles: Vec<Obstacle>,
}

/// Grid dimensions together with the requested obstacle count.
///
/// Construction clamps every field: dimensions to
/// [`MIN_GRID_DIMENSION`]..=[`MAX_GRID_DIMENSION`] and the obstacle count to
/// the density ceiling of the resulting grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridConfig {
    size: GridSize,
    obstacle_count: u32,
}

impl GridConfig {
    /// Creates a configuration, clamping every field into its valid range.
    #[must_use]
    pub fn new(columns: u32, rows: u32, obstacle_count: u32) -> Self {
        let size = GridSize::new(clamp_dimension(columns), clamp_dimension(rows));
        Self {
            size,
            obstacle_count: obstacle_count.min(obstacle_ceiling(size)),
        }
    }

    /// Grid dimensions.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Requested number of obstacles.
    #[must_use]
    pub const fn obstacle_count(&self) -> u32 {
        self.obstacle_count
    }

    /// Largest obstacle count the current grid admits.
    #[must_use]
    pub fn obstacle_ceiling(&self) -> u32 {
        obstacle_ceiling(self.size)
    }

    /// Returns a copy resized to the provided dimensions.
    ///
    /// The obstacle count is clamped down when the grid shrinks; it is never
    /// raised when the grid grows.
    #[must_use]
    pub fn with_size(self, columns: u32, rows: u32) -> Self {
        Self::new(columns, rows, self.obstacle_count)
    }

    /// Returns a copy requesting `count` obstacles, clamped to the ceiling.
    #[must_use]
    pub fn with_obstacle_count(self, count: u32) -> Self {
        Self::new(self.size.columns(), self.size.rows(), count)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        let size = GridSize::new(DEFAULT_GRID_DIMENSION, DEFAULT_GRID_DIMENSION);
        Self {
            size,
            obstacle_count: obstacle_ceiling(size),
        }
    }
}

fn clamp_dimension(value: u32) -> u32 {
    value.clamp(MIN_GRID_DIMENSION, MAX_GRID_DIMENSION)
}

fn obstacle_ceiling(size: GridSize) -> u32 {
    size.cell_count() * OBSTACLE_DENSITY_PERCENT / 100
}

/// Immutable representation of the active session used for queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Identifier of the session.
    pub id: SessionId,
    /// Grid configuration the session was generated from.
    pub config: GridConfig,
    /// Cell currently occupied by the agent.
    pub agent: CellCoord,
    /// Cell the agent must reach.
    pub target: CellCoord,
    /// Obstacles placed on the grid.
    pub obstacles: Vec<Obstacle>,
    /// Current lifecycle state.
    pub state: GameState,
    /// Indicates whether movement is currently suppressed by the cooldown.
    pub cooldown_active: bool,
}

/// Aggregate counters tracked across sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counters {
    /// Number of times the experience was opened.
    pub visits_count: u64,
    /// Number of games started.
    pub games_played_count: u64,
    /// Number of games won.
    pub games_won_count: u64,
}

/// Externally owned store for aggregate counters.
///
/// Each increment returns the updated count.
pub trait CounterStore {
    /// Reads the current counter values.
    fn counters(&self) -> Counters;

    /// Records a visit.
    fn record_visit(&mut self) -> u64;

    /// Records a started game.
    fn record_game_played(&mut self) -> u64;

    /// Records a won game.
    fn record_game_won(&mut self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::{
        CellCoord, CellRect, CellRectSize, Direction, GridConfig, GridSize, Obstacle, ObstacleKind,
    };

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn adjacency_excludes_diagonals_and_identity() {
        let cell = CellCoord::new(2, 2);
        assert!(cell.is_adjacent_to(CellCoord::new(2, 1)));
        assert!(cell.is_adjacent_to(CellCoord::new(3, 2)));
        assert!(!cell.is_adjacent_to(CellCoord::new(3, 3)));
        assert!(!cell.is_adjacent_to(cell));
        assert!(!cell.is_adjacent_to(CellCoord::new(2, 4)));
    }

    #[test]
    fn grid_size_contains_only_in_bounds_cells() {
        let size = GridSize::new(4, 3);
        assert!(size.contains(CellCoord::new(0, 0)));
        assert!(size.contains(CellCoord::new(3, 2)));
        assert!(!size.contains(CellCoord::new(4, 0)));
        assert!(!size.contains(CellCoord::new(0, 3)));
        assert_eq!(size.cells().count(), 12);
    }

    #[test]
    fn direction_rejects_non_unit_vectors() {
        assert_eq!(Direction::from_delta(0, -1), Some(Direction::North));
        assert_eq!(Direction::from_delta(-1, 0), Some(Direction::West));
        assert_eq!(Direction::from_delta(1, 1), None);
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(0, 2), None);
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(direction));
        }
    }

    #[test]
    fn step_refuses_negative_coordinates() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.step(Direction::North), None);
        assert_eq!(corner.step(Direction::West), None);
        assert_eq!(corner.step(Direction::East), Some(CellCoord::new(1, 0)));
        assert_eq!(
            corner.direction_to(CellCoord::new(0, 1)),
            Some(Direction::South)
        );
        assert_eq!(corner.direction_to(CellCoord::new(1, 1)), None);
    }

    #[test]
    fn bulky_footprint_covers_two_by_two_block() {
        let tree = Obstacle::new(ObstacleKind::FallenTree, CellCoord::new(1, 1));
        let covered: Vec<_> = tree.footprint().cells().collect();
        assert_eq!(
            covered,
            vec![
                CellCoord::new(1, 1),
                CellCoord::new(2, 1),
                CellCoord::new(1, 2),
                CellCoord::new(2, 2),
            ]
        );
        assert!(!tree.covers(CellCoord::new(0, 1)));
        assert!(!tree.covers(CellCoord::new(3, 2)));
    }

    #[test]
    fn rect_overlap_detects_shared_cells() {
        let block = CellRect::from_origin_and_size(CellCoord::new(0, 0), CellRectSize::new(2, 2));
        let touching =
            CellRect::from_origin_and_size(CellCoord::new(2, 0), CellRectSize::new(1, 1));
        let sharing = CellRect::from_origin_and_size(CellCoord::new(1, 1), CellRectSize::new(2, 2));
        assert!(!block.overlaps(&touching));
        assert!(block.overlaps(&sharing));
        assert!(sharing.overlaps(&block));
    }

    #[test]
    fn contains_rect_rejects_overhanging_footprints() {
        let size = GridSize::new(3, 3);
        let inside = CellRect::from_origin_and_size(CellCoord::new(1, 1), CellRectSize::new(2, 2));
        let overhang =
            CellRect::from_origin_and_size(CellCoord::new(2, 1), CellRectSize::new(2, 2));
        assert!(size.contains_rect(inside));
        assert!(!size.contains_rect(overhang));
    }

    #[test]
    fn rects_near_the_coordinate_limit_never_fit_or_wrap() {
        let size = GridSize::new(3, 3);
        let far = CellRect::from_origin_and_size(
            CellCoord::new(u32::MAX, u32::MAX),
            CellRectSize::new(2, 2),
        );
        let near = CellRect::from_origin_and_size(CellCoord::new(0, 0), CellRectSize::new(2, 2));
        assert!(!size.contains_rect(far));
        assert!(!far.overlaps(&near));
        assert!(far.overlaps(&far));
        assert_eq!(far.cells().collect::<Vec<_>>(), vec![CellCoord::new(u32::MAX, u32::MAX)]);
    }

    #[test]
    fn config_clamps_dimensions_and_density() {
        let config = GridConfig::new(1, 40, 1_000);
        assert_eq!(config.size(), GridSize::new(3, 10));
        assert_eq!(config.obstacle_count(), 15);
    }

    #[test]
    fn config_clamps_obstacles_down_but_never_up() {
        let config = GridConfig::new(10, 10, 50);
        let shrunk = config.with_size(3, 3);
        assert_eq!(shrunk.obstacle_count(), 4);
        let regrown = shrunk.with_size(10, 10);
        assert_eq!(regrown.obstacle_count(), 4);
    }

    #[test]
    fn default_config_starts_at_ceiling() {
        let config = GridConfig::default();
        assert_eq!(config.size(), GridSize::new(10, 10));
        assert_eq!(config.obstacle_count(), 50);
    }

    #[test]
    fn counters_serialise_in_camel_case() {
        let counters = super::Counters {
            visits_count: 3,
            games_played_count: 2,
            games_won_count: 1,
        };
        let json = serde_json::to_value(counters).expect("counters serialise");
        assert_eq!(
            json,
            serde_json::json!({
                "visitsCount": 3,
                "gamesPlayedCount": 2,
                "gamesWonCount": 1,
            })
        );
    }

    #[test]
    fn wire_names_are_stable() {
        let state = serde_json::to_string(&super::GameState::Playing).expect("state serialises");
        assert_eq!(state, "\"playing\"");
        let kind = serde_json::to_string(&ObstacleKind::FallenTree).expect("kind serialises");
        assert_eq!(kind, "\"fallen-tree\"");
    }
}
