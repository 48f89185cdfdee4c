//! Command-line interface for noughts.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Noughts - play tic-tac-toe against a rule-based computer
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe against a rule-based computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, default_value = "noughts.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play {
        /// Computer thinking delay in milliseconds (overrides config)
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Let a scripted human play against the computer
    Autoplay {
        /// Number of games to play
        #[arg(short, long, default_value = "10")]
        games: u32,

        /// Human strategy
        #[arg(long, value_enum, default_value = "random")]
        strategy: StrategyKind,

        /// Seed for the random human
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Computer thinking delay in milliseconds (overrides config)
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}

/// Scripted human strategies
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// First empty cell
    Simple,
    /// Uniformly random empty cell
    Random,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_autoplay() {
        let cli = Cli::parse_from(["noughts", "autoplay", "--games", "3", "--strategy", "simple"]);
        match cli.command {
            Command::Autoplay { games, strategy, delay_ms, .. } => {
                assert_eq!(games, 3);
                assert_eq!(strategy, StrategyKind::Simple);
                assert_eq!(delay_ms, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_autoplay_delay_only_when_given() {
        let cli = Cli::parse_from(["noughts", "autoplay", "--delay-ms", "0"]);
        assert!(matches!(cli.command, Command::Autoplay { delay_ms: Some(0), .. }));
    }

    #[test]
    fn test_parse_play_with_config() {
        let cli = Cli::parse_from(["noughts", "play", "--config", "x.toml", "--delay-ms", "10"]);
        assert_eq!(cli.config, PathBuf::from("x.toml"));
        assert!(matches!(cli.command, Command::Play { delay_ms: Some(10) }));
    }
}
