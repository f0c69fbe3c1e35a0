use std::fmt::Write as _;

use ring_board_core::{CellType, GridPosition};
use ring_board_world::BoardTopology;

const PIECE: char = '@';
const OFF_TRACK: char = ' ';

/// Renders the board as one text row per grid row, marking the piece with `@`.
pub(crate) fn render(topology: &BoardTopology, piece: GridPosition) -> String {
    let size = topology.geometry().size();
    let mut map = String::new();

    for row in 0..size {
        let line: String = (0..size)
            .map(|column| {
                let position = GridPosition::new(column, row);
                if position == piece {
                    PIECE
                } else {
                    topology.type_at(position).map_or(OFF_TRACK, glyph)
                }
            })
            .collect();
        let _ = writeln!(map, "{}", line.trim_end());
    }

    map
}

fn glyph(cell_type: CellType) -> char {
    match cell_type {
        CellType::Start => 'S',
        CellType::Turn => 'T',
        CellType::Reward => 'R',
        CellType::Question => 'Q',
        CellType::Event => 'E',
        CellType::Achievement => 'A',
        CellType::Normal => '.',
    }
}
