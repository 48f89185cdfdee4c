//! End-of-game messages shown to the player.

use noughts_engine::GameResult;
use serde::Serialize;

/// Title, message, and button text for an end-of-game alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertItem {
    /// Alert title.
    pub title: &'static str,
    /// Alert body.
    pub message: &'static str,
    /// Dismiss button label.
    pub button: &'static str,
}

const HUMAN_WIN: AlertItem = AlertItem {
    title: "You Win!",
    message: "You're the winner! Good Game!",
    button: "OK",
};

const COMPUTER_WIN: AlertItem = AlertItem {
    title: "You lost...",
    message: "You're just lost.. Try it again!",
    button: "Try again",
};

const DRAW: AlertItem = AlertItem {
    title: "Draw!",
    message: "What a Battle! Try it again!",
    button: "Try again",
};

/// Looks up the alert for a result.
pub fn alert_for(result: GameResult) -> AlertItem {
    match result {
        GameResult::HumanWin => HUMAN_WIN,
        GameResult::ComputerWin => COMPUTER_WIN,
        GameResult::Draw => DRAW,
    }
}

impl std::fmt::Display for AlertItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}\n[{}]", self.title, self.message, self.button)
    }
}
