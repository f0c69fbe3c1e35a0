#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that rewards arrivals on achievement cells.

use ring_board_core::{CellType, Command, Event};

/// Translates arrival events into progress commands.
///
/// Every arrival on an [`CellType::Achievement`] cell requests one progress
/// increment; the world caps the counter at its configured total.
#[derive(Debug, Default)]
pub struct Achievements;

impl Achievements {
    /// Creates a new achievements system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Consumes world events and emits progress commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if let Event::PieceArrived {
                cell_type: Some(CellType::Achievement),
                ..
            } = event
            {
                out.push(Command::AdvanceProgress);
            }
        }
    }
}
