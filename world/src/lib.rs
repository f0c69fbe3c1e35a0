#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for Ring Board.
//!
//! The world owns the board topology, the piece's cursor, the single-flight
//! move guard and the progress counter. It only changes in response to
//! [`Command`] values passed to [`apply`], and reports every change as an
//! [`Event`].

mod config;
mod topology;

use log::{debug, warn};
use ring_board_core::{
    BoardConfig, Command, Event, GridPosition, MovePhase, MoveRejection, Progress, ResolvedPath,
    WELCOME_BANNER,
};

pub use config::{parse_config, reference_config, ConfigurationError, SUPPORTED_CONFIG_VERSION};
pub use topology::{is_on_track, BoardTopology, RingGeometry, MIN_BOARD_SIZE};

/// Represents the authoritative Ring Board session.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    topology: BoardTopology,
    start: GridPosition,
    cursor: GridPosition,
    phase: MovePhase,
    progress: Progress,
}

impl World {
    /// Creates a session for the provided board, placing the piece on the
    /// configured start cell.
    pub fn new(config: &BoardConfig) -> Result<Self, ConfigurationError> {
        let topology = BoardTopology::new(config.board_size, &config.special_cells)?;
        let start = config.start_cell();
        if !topology.is_on_track(start) {
            return Err(ConfigurationError::StartOffTrack { position: start });
        }

        Ok(Self {
            banner: WELCOME_BANNER,
            topology,
            start,
            cursor: start,
            phase: MovePhase::Idle,
            progress: Progress::new(config.total_progress),
        })
    }

    /// Creates a session on the reference 19x19 board.
    pub fn reference() -> Result<Self, ConfigurationError> {
        Self::new(&reference_config()?)
    }

    fn begin_move(&mut self, route: ResolvedPath, out_events: &mut Vec<Event>) {
        if self.phase == MovePhase::Animating {
            debug!(
                "move from {} rejected: another move is in flight",
                route.origin()
            );
            out_events.push(Event::MoveRejected {
                reason: MoveRejection::MoveInFlight,
            });
            return;
        }

        if !self.is_connected(&route) {
            warn!(
                "rejecting path resolved from {} while the cursor is at {}",
                route.origin(),
                self.cursor
            );
            out_events.push(Event::MoveRejected {
                reason: MoveRejection::DisconnectedPath,
            });
            return;
        }

        if let Some(truncation) = route.truncation() {
            out_events.push(Event::PathTruncated {
                step: truncation.step,
                requested: route.requested(),
                candidate: truncation.candidate,
                cause: truncation.cause,
            });
        }

        let Some(destination) = route.destination() else {
            return;
        };

        let from = self.cursor;
        self.cursor = destination;
        self.phase = MovePhase::Animating;
        out_events.push(Event::MoveStarted {
            from,
            direction: route.direction(),
            path: route.into_cells(),
        });
    }

    fn complete_move(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != MovePhase::Animating {
            debug!("ignoring move completion while idle");
            return;
        }

        self.phase = MovePhase::Idle;
        let cell = self.cursor;
        out_events.push(Event::PieceArrived {
            cell,
            cell_type: self.topology.type_at(cell),
            message: self
                .topology
                .special_cell(cell)
                .map(|special| special.message.clone())
                .filter(|message| !message.is_empty()),
        });
    }

    fn is_connected(&self, route: &ResolvedPath) -> bool {
        if route.origin() != self.cursor {
            return false;
        }

        let mut previous = route.origin();
        for &cell in route.cells() {
            if !previous.is_adjacent(cell) || !self.topology.admits(cell) {
                return false;
            }
            previous = cell;
        }
        true
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::BeginMove { route } => world.begin_move(route, out_events),
        Command::CompleteMove => world.complete_move(out_events),
        Command::AdvanceProgress => {
            world.progress = world.progress.advanced();
            out_events.push(Event::ProgressAdvanced {
                progress: world.progress,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use ring_board_core::{CellType, GridPosition, MovePhase, Progress};

    use super::{BoardTopology, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the board topology.
    #[must_use]
    pub fn topology(world: &World) -> &BoardTopology {
        &world.topology
    }

    /// Cell the piece occupies, or will occupy once the active move finishes.
    #[must_use]
    pub fn cursor(world: &World) -> GridPosition {
        world.cursor
    }

    /// Cell the piece started the session on.
    #[must_use]
    pub fn start_cell(world: &World) -> GridPosition {
        world.start
    }

    /// Current phase of the single-flight move guard.
    #[must_use]
    pub fn move_phase(world: &World) -> MovePhase {
        world.phase
    }

    /// Current value of the progress counter.
    #[must_use]
    pub fn progress(world: &World) -> Progress {
        world.progress
    }

    /// Classification of the cell, or `None` when the cell is off the track.
    #[must_use]
    pub fn cell_type(world: &World, position: GridPosition) -> Option<CellType> {
        world.topology.type_at(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ring_board_core::{CellType, SpecialCell, TravelDirection, Truncation, TruncationCause};

    fn route(origin: GridPosition, cells: &[(u32, u32)]) -> ResolvedPath {
        let cells: Vec<_> = cells
            .iter()
            .map(|&(column, row)| GridPosition::new(column, row))
            .collect();
        let requested = cells.len() as u32;
        ResolvedPath::from_parts(origin, TravelDirection::Clockwise, requested, cells, None)
    }

    fn reference_world() -> World {
        World::reference().expect("reference board is valid")
    }

    #[test]
    fn new_world_starts_idle_on_start_cell() {
        let world = reference_world();
        assert_eq!(query::cursor(&world), GridPosition::new(0, 18));
        assert_eq!(query::start_cell(&world), GridPosition::new(0, 18));
        assert_eq!(query::move_phase(&world), MovePhase::Idle);
        assert_eq!(query::progress(&world), Progress::new(10));
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn begin_move_commits_destination_and_animates() {
        let mut world = reference_world();
        let mut events = Vec::new();
        let origin = query::cursor(&world);

        apply(
            &mut world,
            Command::BeginMove {
                route: route(origin, &[(0, 17), (0, 16)]),
            },
            &mut events,
        );

        assert_eq!(query::cursor(&world), GridPosition::new(0, 16));
        assert_eq!(query::move_phase(&world), MovePhase::Animating);
        assert_eq!(
            events,
            vec![Event::MoveStarted {
                from: origin,
                direction: TravelDirection::Clockwise,
                path: vec![GridPosition::new(0, 17), GridPosition::new(0, 16)],
            }]
        );
    }

    #[test]
    fn second_move_is_rejected_while_animating() {
        let mut world = reference_world();
        let mut events = Vec::new();
        let origin = query::cursor(&world);

        apply(
            &mut world,
            Command::BeginMove {
                route: route(origin, &[(0, 17)]),
            },
            &mut events,
        );
        events.clear();

        apply(
            &mut world,
            Command::BeginMove {
                route: route(GridPosition::new(0, 17), &[(0, 16)]),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::MoveRejected {
                reason: MoveRejection::MoveInFlight,
            }]
        );
        assert_eq!(query::cursor(&world), GridPosition::new(0, 17));
    }

    #[test]
    fn complete_move_reports_arrival_and_returns_to_idle() {
        let mut world = reference_world();
        let mut events = Vec::new();
        let origin = query::cursor(&world);

        apply(
            &mut world,
            Command::BeginMove {
                route: route(origin, &[(0, 17)]),
            },
            &mut events,
        );
        events.clear();
        apply(&mut world, Command::CompleteMove, &mut events);

        assert_eq!(query::move_phase(&world), MovePhase::Idle);
        assert_eq!(
            events,
            vec![Event::PieceArrived {
                cell: GridPosition::new(0, 17),
                cell_type: Some(CellType::Question),
                message: Some("Answer the question!".to_owned()),
            }]
        );
    }

    #[test]
    fn complete_move_while_idle_is_ignored() {
        let mut world = reference_world();
        let mut events = Vec::new();

        apply(&mut world, Command::CompleteMove, &mut events);

        assert!(events.is_empty());
        assert_eq!(query::move_phase(&world), MovePhase::Idle);
    }

    #[test]
    fn disconnected_paths_are_rejected() {
        let mut world = reference_world();
        let mut events = Vec::new();
        let origin = query::cursor(&world);

        apply(
            &mut world,
            Command::BeginMove {
                route: route(origin, &[(0, 17), (0, 15)]),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::BeginMove {
                route: route(GridPosition::new(0, 0), &[(1, 0)]),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::MoveRejected {
                    reason: MoveRejection::DisconnectedPath,
                },
                Event::MoveRejected {
                    reason: MoveRejection::DisconnectedPath,
                },
            ]
        );
        assert_eq!(query::cursor(&world), origin);
        assert_eq!(query::move_phase(&world), MovePhase::Idle);
    }

    #[test]
    fn empty_truncated_path_keeps_cursor_and_stays_idle() {
        let mut world = reference_world();
        let mut events = Vec::new();
        let origin = query::cursor(&world);
        let truncation = Truncation {
            step: 1,
            candidate: GridPosition::new(0, 19),
            cause: TruncationCause::OffTrack,
        };

        apply(
            &mut world,
            Command::BeginMove {
                route: ResolvedPath::from_parts(
                    origin,
                    TravelDirection::CounterClockwise,
                    3,
                    Vec::new(),
                    Some(truncation),
                ),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::PathTruncated {
                step: 1,
                requested: 3,
                candidate: GridPosition::new(0, 19),
                cause: TruncationCause::OffTrack,
            }]
        );
        assert_eq!(query::cursor(&world), origin);
        assert_eq!(query::move_phase(&world), MovePhase::Idle);
    }

    #[test]
    fn progress_saturates_at_configured_total() {
        let mut world = reference_world();
        let mut events = Vec::new();

        for _ in 0..12 {
            apply(&mut world, Command::AdvanceProgress, &mut events);
        }

        assert_eq!(events.len(), 12);
        assert_eq!(query::progress(&world).current(), 10);
        assert_eq!(
            events.last(),
            Some(&Event::ProgressAdvanced {
                progress: query::progress(&world),
            })
        );
    }

    #[test]
    fn start_cell_must_be_on_track() {
        let config = BoardConfig {
            version: SUPPORTED_CONFIG_VERSION,
            board_size: 19,
            total_progress: 10,
            start: Some(GridPosition::new(3, 3)),
            special_cells: Vec::new(),
        };

        let error = World::new(&config).expect_err("start off the track");
        assert!(matches!(error, ConfigurationError::StartOffTrack { .. }));
    }

    #[test]
    fn large_board_session_starts_in_the_bottom_left_corner() {
        let config = BoardConfig {
            version: SUPPORTED_CONFIG_VERSION,
            board_size: 100_000,
            total_progress: 10,
            start: None,
            special_cells: Vec::new(),
        };

        let world = World::new(&config).expect("large board is valid");
        assert_eq!(query::cursor(&world), GridPosition::new(0, 99_999));
        assert_eq!(
            query::cell_type(&world, query::cursor(&world)),
            Some(CellType::Normal)
        );
    }

    #[test]
    fn configuration_errors_surface_from_world_construction() {
        let config = BoardConfig {
            version: SUPPORTED_CONFIG_VERSION,
            board_size: 19,
            total_progress: 10,
            start: None,
            special_cells: vec![SpecialCell {
                position: GridPosition::new(7, 7),
                cell_type: CellType::Reward,
                display_asset: "reward.webp".to_owned(),
                message: String::new(),
            }],
        };

        let error = World::new(&config).expect_err("reward off the track");
        assert!(matches!(error, ConfigurationError::OffTrack { .. }));
    }

    #[test]
    fn reference_board_overrides_duplicate_entries() {
        let world = reference_world();
        assert_eq!(
            query::cell_type(&world, GridPosition::new(17, 18)),
            Some(CellType::Achievement)
        );
        assert_eq!(
            query::cell_type(&world, GridPosition::new(1, 18)),
            Some(CellType::Event)
        );
        assert_eq!(
            query::cell_type(&world, GridPosition::new(0, 18)),
            Some(CellType::Normal)
        );
    }
}
