//! Board topology: which cells form the track and which carry a special type.

use std::collections::HashMap;

use log::warn;
use ring_board_core::{CellType, GridPosition, SpecialCell};

use crate::config::ConfigurationError;

/// Smallest board whose inner ring sits strictly inside the outer ring.
pub const MIN_BOARD_SIZE: u32 = 11;

/// Distance between the board midline and the inner ring.
const RING_INSET: u32 = 4;

/// Ring and spoke coordinates derived from the board size.
///
/// For the reference 19x19 board the inner ring spans 5..=13 and the spokes
/// run along column and row 9.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingGeometry {
    size: u32,
    mid: u32,
    inner_start: u32,
    inner_end: u32,
}

impl RingGeometry {
    /// Derives the geometry for a square board, or `None` when the board is
    /// too small to hold an inner ring.
    #[must_use]
    pub const fn for_board(size: u32) -> Option<Self> {
        if size < MIN_BOARD_SIZE {
            return None;
        }

        let mid = size / 2;
        Some(Self {
            size,
            mid,
            inner_start: mid - RING_INSET,
            inner_end: mid + RING_INSET,
        })
    }

    /// Number of cells along each side of the board.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Index of the last row and column, shared by the outer ring.
    #[must_use]
    pub const fn last(&self) -> u32 {
        self.size - 1
    }

    /// Column and row hosting the spokes.
    #[must_use]
    pub const fn mid(&self) -> u32 {
        self.mid
    }

    /// First row and column of the inner ring.
    #[must_use]
    pub const fn inner_start(&self) -> u32 {
        self.inner_start
    }

    /// Last row and column of the inner ring.
    #[must_use]
    pub const fn inner_end(&self) -> u32 {
        self.inner_end
    }

    /// Reports whether the position lies inside the board bounds.
    #[must_use]
    pub const fn contains(&self, position: GridPosition) -> bool {
        position.column() < self.size && position.row() < self.size
    }

    /// Reports whether the position is part of the playable track.
    #[must_use]
    pub fn is_on_track(&self, position: GridPosition) -> bool {
        if !self.contains(position) {
            return false;
        }

        let (x, y) = (position.column(), position.row());
        let (lo, hi, last) = (self.inner_start, self.inner_end, self.last());

        let outer_ring = x == 0 || y == 0 || x == last || y == last;
        let inner_ring = ((lo..=hi).contains(&x) && (y == lo || y == hi))
            || ((lo..=hi).contains(&y) && (x == lo || x == hi));

        outer_ring || inner_ring || self.on_corridor(position)
    }

    /// Extended validity used to accept traversal candidates.
    ///
    /// Accepts every track cell plus the corridors and the band bordering the
    /// inner ring, so approach cells next to ring and spoke junctions pass.
    #[must_use]
    pub fn admits(&self, position: GridPosition) -> bool {
        if !self.contains(position) {
            return false;
        }

        self.is_on_track(position) || self.on_corridor(position) || self.on_bridge(position)
    }

    fn on_corridor(&self, position: GridPosition) -> bool {
        let (x, y) = (position.column(), position.row());
        let (lo, mid, hi) = (self.inner_start, self.mid, self.inner_end);

        (x == mid && (y <= lo || y >= hi)) || (y == mid && (x <= lo || x >= hi))
    }

    fn on_bridge(&self, position: GridPosition) -> bool {
        let (x, y) = (position.column(), position.row());
        let (lo, hi) = (self.inner_start, self.inner_end);
        let band = (lo - 1)..=(hi + 1);

        (band.contains(&x) && (y == lo || y == hi)) || (band.contains(&y) && (x == lo || x == hi))
    }
}

/// Free-standing track predicate for a board of the given size.
///
/// Boards too small to hold an inner ring have no track.
#[must_use]
pub fn is_on_track(column: u32, row: u32, board_size: u32) -> bool {
    RingGeometry::for_board(board_size)
        .is_some_and(|geometry| geometry.is_on_track(GridPosition::new(column, row)))
}

/// Immutable classification of the board, built once from configuration.
#[derive(Clone, Debug)]
pub struct BoardTopology {
    geometry: RingGeometry,
    special: HashMap<GridPosition, SpecialCell>,
}

impl BoardTopology {
    /// Builds the topology, rejecting special cells that fall off the board
    /// or off the track.
    pub fn new(board_size: u32, special_cells: &[SpecialCell]) -> Result<Self, ConfigurationError> {
        let geometry =
            RingGeometry::for_board(board_size).ok_or(ConfigurationError::BoardTooSmall {
                size: board_size,
                minimum: MIN_BOARD_SIZE,
            })?;

        let mut special = HashMap::with_capacity(special_cells.len());

        for cell in special_cells {
            if !geometry.contains(cell.position) {
                return Err(ConfigurationError::OutOfBounds {
                    position: cell.position,
                    cell_type: cell.cell_type,
                    size: board_size,
                });
            }

            if !geometry.is_on_track(cell.position) {
                return Err(ConfigurationError::OffTrack {
                    position: cell.position,
                    cell_type: cell.cell_type,
                });
            }

            if let Some(previous) = special.insert(cell.position, cell.clone()) {
                warn!(
                    "special cell {} reconfigured from {:?} to {:?}",
                    cell.position, previous.cell_type, cell.cell_type
                );
            }
        }

        Ok(Self { geometry, special })
    }

    /// Ring geometry backing the topology.
    #[must_use]
    pub const fn geometry(&self) -> &RingGeometry {
        &self.geometry
    }

    /// Reports whether the position is part of the playable track.
    #[must_use]
    pub fn is_on_track(&self, position: GridPosition) -> bool {
        self.geometry.is_on_track(position)
    }

    /// Extended validity used to accept traversal candidates.
    #[must_use]
    pub fn admits(&self, position: GridPosition) -> bool {
        self.geometry.admits(position)
    }

    /// Classification of the cell, or `None` when the cell is off the track.
    ///
    /// On-track cells without a configured entry are [`CellType::Normal`].
    #[must_use]
    pub fn type_at(&self, position: GridPosition) -> Option<CellType> {
        if !self.is_on_track(position) {
            return None;
        }

        Some(
            self.special_cell(position)
                .map_or(CellType::Normal, |cell| cell.cell_type),
        )
    }

    /// Configuration entry attached to the cell, if any.
    #[must_use]
    pub fn special_cell(&self, position: GridPosition) -> Option<&SpecialCell> {
        self.special.get(&position)
    }

    /// Iterator over every on-track cell in row-major order.
    pub fn track_cells(&self) -> impl Iterator<Item = GridPosition> + '_ {
        let size = self.geometry.size();
        (0..size)
            .flat_map(move |row| (0..size).map(move |column| GridPosition::new(column, row)))
            .filter(|position| self.is_on_track(*position))
    }
}
