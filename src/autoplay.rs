//! Scripted human players that drive a session without a keyboard.

use crate::session::{Scoreboard, SessionError, SessionHandle};
use noughts_engine::{Board, EngineError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, info, instrument, warn};

/// Picks cells on behalf of the human side.
pub trait HumanStrategy: Send {
    /// Chooses an empty cell, or `None` if there is none.
    fn choose(&mut self, board: &Board) -> Option<usize>;

    /// Display name.
    fn name(&self) -> &str;
}

/// Takes the first empty cell in index order.
#[derive(Debug, Clone, Default)]
pub struct SimpleHuman;

impl HumanStrategy for SimpleHuman {
    fn choose(&mut self, board: &Board) -> Option<usize> {
        board.available_cells().first().copied()
    }

    fn name(&self) -> &str {
        "Simple"
    }
}

/// Picks uniformly among the empty cells from a seeded generator.
#[derive(Debug, Clone)]
pub struct RandomHuman {
    rng: StdRng,
}

impl RandomHuman {
    /// Creates a random player. The same seed replays the same human choices.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl HumanStrategy for RandomHuman {
    fn choose(&mut self, board: &Board) -> Option<usize> {
        board.available_cells().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "Random"
    }
}

/// Plays `games` complete games through `handle`, resetting after each.
///
/// Returns the scoreboard after the last game.
#[instrument(skip(handle, strategy), fields(strategy = strategy.name()))]
pub async fn play_games(
    handle: &SessionHandle,
    strategy: &mut dyn HumanStrategy,
    games: u32,
) -> Result<Scoreboard, SessionError> {
    for game in 1..=games {
        loop {
            let snapshot = handle
                .wait_until(|s| s.input_enabled || s.phase.result().is_some())
                .await?;
            if let Some(result) = snapshot.phase.result() {
                info!(game, %result, "Game complete");
                break;
            }

            let index = strategy
                .choose(&snapshot.board)
                .ok_or(SessionError::Engine(EngineError::NoAvailableMove))?;
            debug!(game, index, "Scripted human moves");
            if !handle.human_move(index).await? {
                warn!(game, index, "Scripted human picked an unavailable cell");
                return Err(SessionError::Engine(EngineError::CellOccupied(index)));
            }
        }
        handle.reset().await?;
    }

    Ok(handle.snapshot().scoreboard)
}
