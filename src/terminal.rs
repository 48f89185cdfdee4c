//! Line-oriented terminal front-end.
//!
//! Reads commands from stdin and prints the board whenever the session
//! publishes a new state. Logging goes to a file so it doesn't interleave
//! with the board.

use crate::alerts::alert_for;
use crate::session::{SessionEvent, SessionHandle, Snapshot};
use anyhow::Result;
use noughts_engine::{Phase, Position};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Place a mark.
    Cell(Position),
    /// Start over.
    Reset,
    /// Leave the game.
    Quit,
    /// Anything else.
    Unknown,
}

impl Input {
    /// Parses one line.
    pub fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => Input::Quit,
            "r" | "reset" | "new" => Input::Reset,
            other => Position::parse(other).map_or(Input::Unknown, Input::Cell),
        }
    }
}

/// Runs the interactive game until the player quits or stdin closes.
#[instrument(skip_all)]
pub async fn run(
    handle: SessionHandle,
    mut events: mpsc::UnboundedReceiver<SessionEvent>,
) -> Result<()> {
    info!("Starting terminal game");
    println!("Tic-Tac-Toe: you are X. Type 1-9 or a cell name, 'r' to restart, 'q' to quit.\n");
    print_snapshot(&handle.snapshot());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Stdin closed");
                    break;
                };
                match Input::parse(&line) {
                    Input::Quit => break,
                    Input::Reset => handle.reset().await?,
                    Input::Cell(pos) => {
                        if !handle.human_move(pos.to_index()).await? {
                            explain_rejection(&handle.snapshot(), pos);
                        }
                    }
                    Input::Unknown => println!("Unrecognised input: {:?}", line.trim()),
                }
            }
            Some(event) = events.recv() => render(event),
        }
    }

    handle.shutdown();
    info!("Terminal game finished");
    Ok(())
}

fn render(event: SessionEvent) {
    match event {
        SessionEvent::StateChanged(snapshot) => print_snapshot(&snapshot),
        SessionEvent::ComputerThinking => println!("Computer is thinking..."),
        SessionEvent::MoveMade(mv) => debug!(%mv, "Move made"),
        SessionEvent::GameOver(result) => {
            println!("\n{}\n\nType 'r' to play again or 'q' to quit.", alert_for(result));
        }
    }
}

fn print_snapshot(snapshot: &Snapshot) {
    println!("\n{}\n", snapshot.board.display());
    match snapshot.phase {
        Phase::AwaitingHumanMove => println!("Your move. {}", snapshot.scoreboard),
        Phase::ComputerThinking => {}
        Phase::GameOver(_) => println!("{}", snapshot.scoreboard),
    }
}

fn explain_rejection(snapshot: &Snapshot, pos: Position) {
    if snapshot.input_enabled {
        warn!(%pos, "Cell already taken");
        println!("{} is already taken.", pos);
    } else {
        println!("Not your turn.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Input::parse("q"), Input::Quit);
        assert_eq!(Input::parse(" R "), Input::Reset);
        assert_eq!(Input::parse("5"), Input::Cell(Position::Center));
        assert_eq!(Input::parse("top right"), Input::Cell(Position::TopRight));
        assert_eq!(Input::parse("banana"), Input::Unknown);
    }
}
