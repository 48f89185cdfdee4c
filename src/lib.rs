//! Noughts library - play tic-tac-toe against a rule-based computer
//!
//! Wraps the pure [`noughts_engine`] in an async session with a paced,
//! cancellable computer reply.
//!
//! # Architecture
//!
//! - **Session**: single-writer actor owning the game; snapshots and events
//! - **Alerts**: end-of-game messages keyed by result
//! - **Autoplay**: scripted human players for demos and soak runs
//! - **Terminal**: line-oriented interactive front-end
//!
//! # Example
//!
//! ```no_run
//! use noughts::{GameSession, SessionConfig};
//! use tokio::sync::mpsc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let (event_tx, _events) = mpsc::unbounded_channel();
//! let handle = GameSession::spawn(&SessionConfig::default(), event_tx);
//!
//! handle.human_move(0).await?;
//! let snapshot = handle.wait_until(|s| s.input_enabled).await?;
//! assert_eq!(snapshot.board.occupied_count(), 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod alerts;
mod autoplay;
mod config;
mod session;
pub mod terminal;

pub use alerts::{AlertItem, alert_for};
pub use autoplay::{HumanStrategy, RandomHuman, SimpleHuman, play_games};
pub use config::{ConfigError, SessionConfig};
pub use session::{GameSession, Scoreboard, SessionError, SessionEvent, SessionHandle, Snapshot};

pub use noughts_engine::{
    Board, EngineError, Game, GameResult, Move, Phase, Player, Position, Rule,
};
