#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Ring Board engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative session world, and pure systems. Systems resolve moves into
//! [`ResolvedPath`] values and submit them as [`Command`] values, the world
//! executes those commands via its `apply` entry point, and then broadcasts
//! [`Event`] values that adapters animate and systems react to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Ring Board.";

/// Number of achievement cells a player must collect in the reference game.
pub const DEFAULT_TOTAL_PROGRESS: u32 = 10;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the piece travel along a resolved path.
    BeginMove {
        /// Path computed from the world's current cursor.
        route: ResolvedPath,
    },
    /// Signals that the presentation layer finished animating the active move.
    CompleteMove,
    /// Requests that the progress counter advance by one, saturating at its total.
    AdvanceProgress,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that the piece committed to a path and animation may begin.
    MoveStarted {
        /// Cell the piece occupied before the move.
        from: GridPosition,
        /// Direction of travel for the move.
        direction: TravelDirection,
        /// Cells crossed by the piece in chronological order.
        path: Vec<GridPosition>,
    },
    /// Reports that a move request was ignored.
    MoveRejected {
        /// Specific reason the move was refused.
        reason: MoveRejection,
    },
    /// Reports that a resolved path stopped short of the requested step count.
    PathTruncated {
        /// One-based index of the step that could not be taken.
        step: u32,
        /// Magnitude of the step count the path was resolved for.
        requested: u32,
        /// Cell the failed step attempted to enter.
        candidate: GridPosition,
        /// Why the step was refused.
        cause: TruncationCause,
    },
    /// Announces that the piece finished animating onto its destination.
    PieceArrived {
        /// Cell the piece now occupies.
        cell: GridPosition,
        /// Classification of the cell, or `None` when the cell is off the track.
        cell_type: Option<CellType>,
        /// Message configured for the cell, if any.
        message: Option<String>,
    },
    /// Confirms that the progress counter was advanced.
    ProgressAdvanced {
        /// Counter value after the update.
        progress: Progress,
    },
}

/// Reasons a move request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// Another move is still being animated.
    MoveInFlight,
    /// The submitted path does not start at the cursor or skips cells.
    DisconnectedPath,
}

/// Reasons a path stopped before covering every requested step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TruncationCause {
    /// The candidate cell fails the board's extended validity check.
    OffTrack,
    /// No traversal rule covers the cursor, so the candidate equals the cursor.
    Stalled,
}

/// Classification attached to special board cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellType {
    /// Cell where a new game begins.
    Start,
    /// Junction that redirects a move starting on it onto a spoke.
    Turn,
    /// Cell granting a reward.
    Reward,
    /// Cell that triggers a question.
    Question,
    /// Cell that triggers a special event.
    Event,
    /// Cell that advances the progress counter.
    Achievement,
    /// Ordinary on-track cell.
    Normal,
}

/// Sense in which the piece travels around the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelDirection {
    /// Forward travel, produced by positive step counts.
    Clockwise,
    /// Backward travel, produced by negative step counts.
    CounterClockwise,
}

impl TravelDirection {
    /// Direction implied by a signed step count. Zero maps to counter-clockwise.
    #[must_use]
    pub const fn of_steps(steps: i32) -> Self {
        if steps > 0 {
            Self::Clockwise
        } else {
            Self::CounterClockwise
        }
    }
}

/// Cardinal unit moves on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
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

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Serialised as a two-element `[column, row]` array so board configuration
/// documents stay compact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct GridPosition {
    column: u32,
    row: u32,
}

impl GridPosition {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index (x) of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index (y) of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: GridPosition) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }

    /// Reports whether the two positions are exactly one unit move apart.
    #[must_use]
    pub fn is_adjacent(self, other: GridPosition) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Position reached by a single unit move, or `None` when it would leave
    /// the non-negative quadrant.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<GridPosition> {
        let (column, row) = match direction {
            Direction::North => (Some(self.column), self.row.checked_sub(1)),
            Direction::East => (self.column.checked_add(1), Some(self.row)),
            Direction::South => (Some(self.column), self.row.checked_add(1)),
            Direction::West => (self.column.checked_sub(1), Some(self.row)),
        };
        Some(GridPosition::new(column?, row?))
    }
}

impl From<[u32; 2]> for GridPosition {
    fn from([column, row]: [u32; 2]) -> Self {
        Self::new(column, row)
    }
}

impl From<GridPosition> for [u32; 2] {
    fn from(position: GridPosition) -> Self {
        [position.column, position.row]
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Why a resolved path ended early.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Truncation {
    /// One-based index of the step that could not be taken.
    pub step: u32,
    /// Cell the failed step attempted to enter.
    pub candidate: GridPosition,
    /// Why the step was refused.
    pub cause: TruncationCause,
}

/// Ordered cells a piece crosses for a single move.
///
/// Cells are always listed in chronological travel order, oldest first, for
/// both travel directions. The origin itself is never part of the path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPath {
    origin: GridPosition,
    direction: TravelDirection,
    requested: u32,
    cells: Vec<GridPosition>,
    truncation: Option<Truncation>,
}

impl ResolvedPath {
    /// Assembles a path from its parts.
    #[must_use]
    pub fn from_parts(
        origin: GridPosition,
        direction: TravelDirection,
        requested: u32,
        cells: Vec<GridPosition>,
        truncation: Option<Truncation>,
    ) -> Self {
        Self {
            origin,
            direction,
            requested,
            cells,
            truncation,
        }
    }

    /// Cursor the path was resolved from.
    #[must_use]
    pub const fn origin(&self) -> GridPosition {
        self.origin
    }

    /// Direction of travel.
    #[must_use]
    pub const fn direction(&self) -> TravelDirection {
        self.direction
    }

    /// Magnitude of the step count that was requested.
    #[must_use]
    pub const fn requested(&self) -> u32 {
        self.requested
    }

    /// Cells crossed in chronological order.
    #[must_use]
    pub fn cells(&self) -> &[GridPosition] {
        &self.cells
    }

    /// Final cell of the path, if the piece moves at all.
    #[must_use]
    pub fn destination(&self) -> Option<GridPosition> {
        self.cells.last().copied()
    }

    /// Details of the step that cut the path short, if any.
    #[must_use]
    pub const fn truncation(&self) -> Option<Truncation> {
        self.truncation
    }

    /// Reports whether the path contains no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Consumes the path, yielding the crossed cells.
    #[must_use]
    pub fn into_cells(self) -> Vec<GridPosition> {
        self.cells
    }
}

/// Session progress counter fed by achievement cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Progress {
    current: u32,
    total: u32,
}

impl Progress {
    /// Creates an empty counter capped at `total`.
    #[must_use]
    pub const fn new(total: u32) -> Self {
        Self { current: 0, total }
    }

    /// Collected achievements so far.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Maximum value the counter may reach.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Reports whether the counter reached its cap.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.current >= self.total
    }

    /// Counter advanced by one, never exceeding the total.
    #[must_use]
    pub fn advanced(self) -> Self {
        Self {
            current: self.current.saturating_add(1).min(self.total),
            total: self.total,
        }
    }
}

/// Phase of the single-flight move guard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MovePhase {
    /// No move is in flight; new moves are accepted.
    #[default]
    Idle,
    /// A committed path is being animated; new moves are rejected.
    Animating,
}

/// One entry of the static board configuration.
///
/// The display asset and message are opaque payload carried through to the
/// presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialCell {
    /// Cell the entry classifies.
    pub position: GridPosition,
    /// Classification applied to the cell.
    #[serde(rename = "type")]
    pub cell_type: CellType,
    /// Asset the presentation layer draws for the cell.
    #[serde(default)]
    pub display_asset: String,
    /// Message shown when the piece lands on the cell.
    #[serde(default)]
    pub message: String,
}

/// Static description of a board, consumed once when a session starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Schema version of the configuration document.
    pub version: u32,
    /// Number of cells along each side of the square board.
    pub board_size: u32,
    /// Cap applied to the progress counter.
    #[serde(default = "default_total_progress")]
    pub total_progress: u32,
    /// Cell the piece starts on; defaults to the bottom-left corner.
    #[serde(default)]
    pub start: Option<GridPosition>,
    /// Special cells in configuration order. Later entries win on duplicates.
    #[serde(default)]
    pub special_cells: Vec<SpecialCell>,
}

impl BoardConfig {
    /// Cell the piece occupies when a new game begins.
    #[must_use]
    pub fn start_cell(&self) -> GridPosition {
        self.start
            .unwrap_or_else(|| GridPosition::new(0, self.board_size.saturating_sub(1)))
    }
}

fn default_total_progress() -> u32 {
    DEFAULT_TOTAL_PROGRESS
}
