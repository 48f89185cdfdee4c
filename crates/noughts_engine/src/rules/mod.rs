//! Game rules for tic-tac-toe.
//!
//! Pure functions over board snapshots. Rules are kept apart from board
//! storage so the state machine and the computer strategy share them.

pub mod draw;
pub mod win;

pub use draw::{check_draw, evaluate};
pub use win::{WIN_PATTERNS, check_win, winning_line};
