use ring_board_core::{Command, Event, MoveRejection, TruncationCause};
use ring_board_system_progress::Achievements;
use ring_board_system_traversal::Traversal;
use ring_board_world::{self as world, query, World};

/// Drives the world and its systems the way an animating frontend would,
/// completing every move as soon as it starts.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    traversal: Traversal,
    achievements: Achievements,
}

impl Session {
    pub(crate) fn new(world: World) -> Self {
        Self {
            world,
            traversal: Traversal::new(),
            achievements: Achievements::new(),
        }
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Plays one roll and returns every event the world emitted for it.
    pub(crate) fn play(&mut self, steps: i32) -> Vec<Event> {
        let mut commands = Vec::new();
        self.traversal.handle(
            query::topology(&self.world),
            query::cursor(&self.world),
            steps,
            &mut commands,
        );

        let mut events = Vec::new();
        self.flush(commands, &mut events);

        let started = events
            .iter()
            .any(|event| matches!(event, Event::MoveStarted { .. }));
        if started {
            let first_arrival = events.len();
            self.flush(vec![Command::CompleteMove], &mut events);

            let mut rewards = Vec::new();
            self.achievements
                .handle(&events[first_arrival..], &mut rewards);
            self.flush(rewards, &mut events);
        }

        events
    }

    fn flush(&mut self, commands: Vec<Command>, events: &mut Vec<Event>) {
        for command in commands {
            world::apply(&mut self.world, command, events);
        }
    }
}

/// One-line human readable rendering of a world event.
pub(crate) fn describe(event: &Event) -> String {
    match event {
        Event::MoveStarted {
            from,
            direction,
            path,
        } => {
            let cells: Vec<String> = path.iter().map(ToString::to_string).collect();
            format!("{direction:?} from {from}: {}", cells.join(" "))
        }
        Event::MoveRejected { reason } => match reason {
            MoveRejection::MoveInFlight => "rejected: a move is already in flight".to_owned(),
            MoveRejection::DisconnectedPath => "rejected: path is not connected".to_owned(),
        },
        Event::PathTruncated {
            step,
            requested,
            candidate,
            cause,
        } => match cause {
            TruncationCause::OffTrack => {
                format!("step {step}/{requested} refused: {candidate} is off the track")
            }
            TruncationCause::Stalled => {
                format!("step {step}/{requested} refused: stuck on {candidate}")
            }
        },
        Event::PieceArrived {
            cell,
            cell_type,
            message,
        } => {
            let kind = cell_type.map_or_else(|| "off-track".to_owned(), |kind| format!("{kind:?}"));
            match message {
                Some(message) => format!("arrived on {cell} ({kind}): {message}"),
                None => format!("arrived on {cell} ({kind})"),
            }
        }
        Event::ProgressAdvanced { progress } if progress.is_complete() => {
            format!(
                "progress {}/{} (complete)",
                progress.current(),
                progress.total()
            )
        }
        Event::ProgressAdvanced { progress } => {
            format!("progress {}/{}", progress.current(), progress.total())
        }
    }
}

#[cfg(test)]
mod tests {
    use ring_board_core::{CellType, GridPosition, MovePhase, Progress, TravelDirection};

    use super::*;

    fn session() -> Session {
        Session::new(World::reference().expect("reference board is valid"))
    }

    #[test]
    fn each_roll_starts_and_completes_a_move() {
        let mut session = session();

        let events = session.play(5);

        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[0],
            Event::MoveStarted {
                direction: TravelDirection::Clockwise,
                ..
            }
        ));
        assert_eq!(
            events[1],
            Event::PieceArrived {
                cell: GridPosition::new(0, 13),
                cell_type: Some(CellType::Achievement),
                message: Some("Achievement unlocked!".to_owned()),
            }
        );
        assert!(matches!(events[2], Event::ProgressAdvanced { .. }));
        assert_eq!(query::move_phase(session.world()), MovePhase::Idle);
        assert_eq!(query::progress(session.world()).current(), 1);
    }

    #[test]
    fn zero_roll_emits_nothing() {
        let mut session = session();
        assert!(session.play(0).is_empty());
        assert_eq!(query::cursor(session.world()), GridPosition::new(0, 18));
    }

    #[test]
    fn backward_roll_returns_to_start() {
        let mut session = session();
        let _ = session.play(5);

        let events = session.play(-5);

        assert_eq!(query::cursor(session.world()), GridPosition::new(0, 18));
        assert!(events.iter().any(|event| matches!(
            event,
            Event::PieceArrived {
                cell_type: Some(CellType::Normal),
                ..
            }
        )));
    }

    #[test]
    fn describes_arrivals_with_their_message() {
        let event = Event::PieceArrived {
            cell: GridPosition::new(0, 17),
            cell_type: Some(CellType::Question),
            message: Some("Answer the question!".to_owned()),
        };
        assert_eq!(
            describe(&event),
            "arrived on (0, 17) (Question): Answer the question!"
        );
    }

    #[test]
    fn describes_truncations() {
        let event = Event::PathTruncated {
            step: 2,
            requested: 6,
            candidate: GridPosition::new(3, 5),
            cause: TruncationCause::OffTrack,
        };
        assert_eq!(
            describe(&event),
            "step 2/6 refused: (3, 5) is off the track"
        );
    }

    #[test]
    fn describes_completed_progress() {
        let mut progress = Progress::new(2);
        assert_eq!(
            describe(&Event::ProgressAdvanced {
                progress: progress.advanced(),
            }),
            "progress 1/2"
        );

        progress = progress.advanced().advanced();
        assert_eq!(
            describe(&Event::ProgressAdvanced { progress }),
            "progress 2/2 (complete)"
        );
    }
}
