#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Ring Board moves headlessly.

mod board_map;
mod session;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use ring_board_core::BoardConfig;
use ring_board_world::{parse_config, query, reference_config, World};

use crate::session::Session;

/// Ring Board - deterministic ring track traversal
#[derive(Debug, Parser)]
#[command(name = "ring-board", version)]
#[command(about = "Plays moves on a ring board and prints the resolved paths", long_about = None)]
struct Cli {
    /// Board configuration file; the embedded reference board is used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Print an ASCII map of the board
    Board,

    /// Play a sequence of moves from the start cell
    Play {
        /// Signed step counts; negative values move counter-clockwise
        #[arg(required = true, allow_negative_numbers = true)]
        steps: Vec<i32>,
    },
}

/// Entry point for the Ring Board command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    let world = World::new(&config).context("board configuration is invalid")?;
    println!("{}", query::welcome_banner(&world));

    match cli.command {
        Mode::Board => {
            print!(
                "{}",
                board_map::render(query::topology(&world), query::cursor(&world))
            );
        }
        Mode::Play { steps } => {
            let mut session = Session::new(world);
            for count in steps {
                println!("roll {count:+}");
                for event in session.play(count) {
                    println!("  {}", session::describe(&event));
                }
            }

            let progress = query::progress(session.world());
            println!(
                "finished on {} with progress {}/{}",
                query::cursor(session.world()),
                progress.current(),
                progress.total()
            );
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<BoardConfig> {
    let Some(path) = path else {
        info!("using the embedded reference board");
        return reference_config().context("embedded reference board is invalid");
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read board configuration {}", path.display()))?;
    parse_config(&contents)
        .with_context(|| format!("failed to parse board configuration {}", path.display()))
}
