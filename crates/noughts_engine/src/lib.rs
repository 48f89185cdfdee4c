//! Tic-tac-toe engine for a human playing a rule-based computer.
//!
//! Pure, synchronous game logic with no I/O. Front-ends and the async
//! session layer build on it.
//!
//! # Architecture
//!
//! - **Board**: 9 optional move slots, the only place cells are filled
//! - **Rules**: win and draw detection over board snapshots
//! - **Strategy**: the computer's fixed-priority move selection
//! - **Game**: the turn state machine tying the three together
//!
//! # Example
//!
//! ```
//! use noughts_engine::{Game, Phase};
//!
//! let mut game = Game::new();
//! assert_eq!(game.process_human_move(0), Ok(Phase::ComputerThinking));
//!
//! let turn = game.play_computer_move().unwrap();
//! assert_eq!(turn.mv.index(), 4);
//! assert_eq!(game.phase(), Phase::AwaitingHumanMove);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod game;
mod position;
pub mod rules;
mod strategy;
mod types;

pub use error::EngineError;
pub use game::{ComputerTurn, Game, GameResult, Phase};
pub use position::Position;
pub use rules::{WIN_PATTERNS, check_draw, check_win, evaluate, winning_line};
pub use strategy::{CENTER, Choice, Rule, completing_cell, select_move, select_move_with};
pub use types::{Board, CELL_COUNT, Move, Player};
