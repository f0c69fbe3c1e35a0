#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic traversal system that resolves dice rolls into board paths.
//!
//! A signed step count becomes a [`ResolvedPath`]: one cell per unit step,
//! listed in chronological order, cut short at the first candidate the board
//! does not admit. The system never mutates the world; it submits the path
//! as a [`Command::BeginMove`] and lets the world commit the cursor.

mod rules;

use log::{debug, warn};
use ring_board_core::{
    CellType, Command, GridPosition, ResolvedPath, TravelDirection, Truncation, TruncationCause,
};
use ring_board_world::BoardTopology;

use crate::rules::RouteTable;

/// Pure system that turns step counts into move commands.
#[derive(Debug, Default)]
pub struct Traversal;

impl Traversal {
    /// Creates a new traversal system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves `steps` from `cursor` and emits the matching move command.
    ///
    /// A zero step count emits nothing.
    pub fn handle(
        &self,
        topology: &BoardTopology,
        cursor: GridPosition,
        steps: i32,
        out: &mut Vec<Command>,
    ) {
        if steps == 0 {
            return;
        }

        out.push(Command::BeginMove {
            route: resolve_path(topology, cursor, steps),
        });
    }
}

/// Computes the cells crossed when moving `steps` cells from `current`.
///
/// Positive counts travel clockwise, negative counts counter-clockwise. The
/// result is always in chronological order. A candidate that fails the
/// board's extended validity check, or a cursor no rule covers, ends the path
/// early; the cells accumulated up to that point are kept.
#[must_use]
pub fn resolve_path(topology: &BoardTopology, current: GridPosition, steps: i32) -> ResolvedPath {
    let direction = TravelDirection::of_steps(steps);
    let requested = steps.unsigned_abs();
    let table = RouteTable::new(topology.geometry(), direction);

    let mut cells = Vec::new();
    let mut truncation = None;
    let mut cursor = current;

    for step in 1..=requested {
        let candidate = next_with(&table, topology, cursor, step == 1);

        let cause = if candidate == cursor {
            Some(TruncationCause::Stalled)
        } else if !topology.admits(candidate) {
            Some(TruncationCause::OffTrack)
        } else {
            None
        };

        if let Some(cause) = cause {
            warn!(
                "path from {current} stopped at step {step}/{requested}: {cause:?} at {candidate}"
            );
            truncation = Some(Truncation {
                step,
                candidate,
                cause,
            });
            break;
        }

        cells.push(candidate);
        cursor = candidate;
    }

    debug!(
        "resolved {direction:?} path from {current} ({} of {requested} steps): {cells:?}",
        cells.len()
    );

    ResolvedPath::from_parts(current, direction, requested, cells, truncation)
}

/// Cell one step from `current` in the given direction.
///
/// When `first_step` is set and `current` is a TURN cell listed in the
/// direction's redirection table, the redirection wins over the ring rules.
/// Returns `current` unchanged when no rule covers it.
#[must_use]
pub fn next_cell(
    topology: &BoardTopology,
    current: GridPosition,
    direction: TravelDirection,
    first_step: bool,
) -> GridPosition {
    let table = RouteTable::new(topology.geometry(), direction);
    next_with(&table, topology, current, first_step)
}

fn next_with(
    table: &RouteTable,
    topology: &BoardTopology,
    current: GridPosition,
    first_step: bool,
) -> GridPosition {
    let redirect = if first_step && topology.type_at(current) == Some(CellType::Turn) {
        table.turn_heading(current)
    } else {
        None
    };

    let heading = redirect.or_else(|| table.rule_heading(current));
    match heading.and_then(|heading| current.step(heading)) {
        Some(next) => next,
        None => {
            warn!("no traversal rule covers {current}; topology inconsistency");
            current
        }
    }
}
