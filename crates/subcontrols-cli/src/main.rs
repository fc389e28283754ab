//! Terminal console for the submarine control puzzles.
//!
//! Reads one command per line from standard input and prints the puzzle
//! responses. Type `help` at the prompt for the command list.
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin subcontrols
//! ```
//!
//! Replay a session with fixed secrets, showing them up front:
//!
//! ```sh
//! cargo run --bin subcontrols -- --seed 1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef --reveal
//! ```
//!
//! Set `RUST_LOG=debug` to trace every attempt.

use std::io::{self, BufRead as _, Write as _};

use clap::Parser;
use subcontrols_game::PuzzleRegistry;
use subcontrols_generator::SecretSeed;

use crate::{command::Command, handler::Flow};

mod command;
mod handler;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Session seed as 64 hex digits. Random when omitted.
    #[arg(long, value_name = "HEX")]
    seed: Option<SecretSeed>,

    /// Print every secret before the first prompt.
    #[arg(long)]
    reveal: bool,
}

fn main() -> io::Result<()> {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(SecretSeed::random);

    let mut registry = PuzzleRegistry::with_default_puzzles();
    registry.init_all(seed);
    log::info!("console started with {} puzzles", registry.ids().count());

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Submarine control console. Type `help` for commands.")?;
    writeln!(stdout, "Seed {seed}")?;
    if args.reveal {
        writeln!(stdout, "{}", registry.reveal_all())?;
    }

    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                if handler::handle(&mut registry, command, &mut stdout)?.is_quit() {
                    break;
                }
            }
            Err(err) => writeln!(stdout, "error: {err}")?,
        }
    }
    log::info!("console closed");
    Ok(())
}
