//! Step rule tables for both travel directions.
//!
//! Every rule pins the cursor to a line (a fixed column or row) and bounds the
//! other coordinate. Rules are evaluated in order: outer ring, inner ring,
//! spokes. Turn redirections are consulted only for the first step of a move
//! that starts on a TURN cell.

use ring_board_core::{Direction, GridPosition, TravelDirection};
use ring_board_world::RingGeometry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Line {
    Column(u32),
    Row(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bound {
    Below(u32),
    Above(u32),
}

impl Bound {
    const fn admits(self, value: u32) -> bool {
        match self {
            Self::Below(limit) => value < limit,
            Self::Above(limit) => value > limit,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RouteRule {
    line: Line,
    bound: Bound,
    heading: Direction,
}

impl RouteRule {
    const fn new(line: Line, bound: Bound, heading: Direction) -> Self {
        Self {
            line,
            bound,
            heading,
        }
    }

    fn matches(&self, position: GridPosition) -> bool {
        let (on_line, along) = match self.line {
            Line::Column(column) => (position.column() == column, position.row()),
            Line::Row(row) => (position.row() == row, position.column()),
        };
        on_line && self.bound.admits(along)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TurnRedirect {
    from: GridPosition,
    heading: Direction,
}

/// Ordered step rules and turn redirections for one travel direction.
#[derive(Clone, Debug)]
pub(crate) struct RouteTable {
    rules: [RouteRule; 12],
    turns: [TurnRedirect; 4],
}

impl RouteTable {
    pub(crate) fn new(geometry: &RingGeometry, direction: TravelDirection) -> Self {
        match direction {
            TravelDirection::Clockwise => Self {
                rules: clockwise_rules(geometry),
                turns: clockwise_turns(geometry),
            },
            TravelDirection::CounterClockwise => Self {
                rules: counter_clockwise_rules(geometry),
                turns: counter_clockwise_turns(geometry),
            },
        }
    }

    /// Unit move a piece standing on a TURN cell takes on its first step.
    pub(crate) fn turn_heading(&self, position: GridPosition) -> Option<Direction> {
        self.turns
            .iter()
            .find(|turn| turn.from == position)
            .map(|turn| turn.heading)
    }

    /// Unit move prescribed by the first matching ring or spoke rule.
    pub(crate) fn rule_heading(&self, position: GridPosition) -> Option<Direction> {
        self.rules
            .iter()
            .find(|rule| rule.matches(position))
            .map(|rule| rule.heading)
    }
}

fn clockwise_rules(geometry: &RingGeometry) -> [RouteRule; 12] {
    let (lo, mid, hi, last) = corners(geometry);
    [
        // outer ring
        RouteRule::new(Line::Column(0), Bound::Above(0), Direction::North),
        RouteRule::new(Line::Row(0), Bound::Below(last), Direction::East),
        RouteRule::new(Line::Column(last), Bound::Below(last), Direction::South),
        RouteRule::new(Line::Row(last), Bound::Above(0), Direction::West),
        // inner ring
        RouteRule::new(Line::Column(lo), Bound::Above(lo), Direction::North),
        RouteRule::new(Line::Row(hi), Bound::Above(lo), Direction::West),
        RouteRule::new(Line::Column(hi), Bound::Below(hi), Direction::South),
        RouteRule::new(Line::Row(lo), Bound::Below(hi), Direction::East),
        // spokes
        RouteRule::new(Line::Column(mid), Bound::Below(lo), Direction::North),
        RouteRule::new(Line::Column(mid), Bound::Above(hi), Direction::South),
        RouteRule::new(Line::Row(mid), Bound::Below(lo), Direction::East),
        RouteRule::new(Line::Row(mid), Bound::Above(hi), Direction::West),
    ]
}

fn counter_clockwise_rules(geometry: &RingGeometry) -> [RouteRule; 12] {
    let (lo, mid, hi, last) = corners(geometry);
    [
        // outer ring
        RouteRule::new(Line::Column(0), Bound::Below(last), Direction::South),
        RouteRule::new(Line::Row(last), Bound::Below(last), Direction::East),
        RouteRule::new(Line::Column(last), Bound::Above(0), Direction::North),
        RouteRule::new(Line::Row(0), Bound::Above(0), Direction::West),
        // inner ring
        RouteRule::new(Line::Column(lo), Bound::Below(hi), Direction::South),
        RouteRule::new(Line::Row(lo), Bound::Above(lo), Direction::West),
        RouteRule::new(Line::Column(hi), Bound::Above(lo), Direction::North),
        RouteRule::new(Line::Row(hi), Bound::Below(hi), Direction::East),
        // spokes
        RouteRule::new(Line::Column(mid), Bound::Below(lo), Direction::South),
        RouteRule::new(Line::Column(mid), Bound::Above(hi), Direction::North),
        RouteRule::new(Line::Row(mid), Bound::Below(lo), Direction::West),
        RouteRule::new(Line::Row(mid), Bound::Above(hi), Direction::East),
    ]
}

fn clockwise_turns(geometry: &RingGeometry) -> [TurnRedirect; 4] {
    let (lo, mid, hi, last) = corners(geometry);
    [
        TurnRedirect {
            from: GridPosition::new(mid, lo),
            heading: Direction::North,
        },
        TurnRedirect {
            from: GridPosition::new(mid, hi),
            heading: Direction::South,
        },
        TurnRedirect {
            from: GridPosition::new(0, mid),
            heading: Direction::East,
        },
        TurnRedirect {
            from: GridPosition::new(last, mid),
            heading: Direction::West,
        },
    ]
}

// Sources sit one cell inside the inner ring, not on the outer ring like the
// clockwise table. Kept as is; see the asymmetry tests.
fn counter_clockwise_turns(geometry: &RingGeometry) -> [TurnRedirect; 4] {
    let (lo, mid, hi, _) = corners(geometry);
    [
        TurnRedirect {
            from: GridPosition::new(mid, lo + 1),
            heading: Direction::North,
        },
        TurnRedirect {
            from: GridPosition::new(mid, hi - 1),
            heading: Direction::South,
        },
        TurnRedirect {
            from: GridPosition::new(lo + 1, mid),
            heading: Direction::West,
        },
        TurnRedirect {
            from: GridPosition::new(hi - 1, mid),
            heading: Direction::East,
        },
    ]
}

fn corners(geometry: &RingGeometry) -> (u32, u32, u32, u32) {
    (
        geometry.inner_start(),
        geometry.mid(),
        geometry.inner_end(),
        geometry.last(),
    )
}
