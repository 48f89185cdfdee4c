//! Noughts - command-line entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, StrategyKind};
use noughts::{
    GameSession, HumanStrategy, RandomHuman, SessionConfig, SessionEvent, SimpleHuman,
    play_games, terminal,
};
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = SessionConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Play { delay_ms } => run_play(with_delay(config, delay_ms)).await,
        Command::Autoplay {
            games,
            strategy,
            seed,
            delay_ms,
        } => run_autoplay(with_delay(config, delay_ms), games, strategy, seed).await,
    }
}

/// Applies a `--delay-ms` flag over the file value, if one was given
fn with_delay(config: SessionConfig, delay_ms: Option<u64>) -> SessionConfig {
    match delay_ms {
        Some(ms) => config.with_computer_delay_ms(ms),
        None => config,
    }
}

/// Run an interactive game in the terminal
async fn run_play(config: SessionConfig) -> Result<()> {
    // Log to file to avoid interfering with the board
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();

    info!(delay_ms = config.computer_delay_ms(), "Starting interactive game");

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let handle = GameSession::spawn(&config, event_tx);
    terminal::run(handle, event_rx).await
}

/// Run scripted games and print the tally
#[instrument(skip(config))]
async fn run_autoplay(
    config: SessionConfig,
    games: u32,
    strategy: StrategyKind,
    seed: u64,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting autoplay");

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let handle = GameSession::spawn(&config, event_tx);

    // Drain events so the log shows each move
    let drain = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if let SessionEvent::MoveMade(mv) = event {
                tracing::debug!(%mv, "Move made");
            }
        }
    });

    let mut human: Box<dyn HumanStrategy> = match strategy {
        StrategyKind::Simple => Box::new(SimpleHuman),
        StrategyKind::Random => Box::new(RandomHuman::new(seed)),
    };
    let scoreboard = play_games(&handle, human.as_mut(), games).await?;

    handle.shutdown();
    drop(handle);
    let _ = drain.await;

    println!("{} after {} games ({} strategy)", scoreboard, scoreboard.total(), human.name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_flag_overrides_file_only_when_given() {
        let file = SessionConfig::default().with_computer_delay_ms(250);

        assert_eq!(*with_delay(file.clone(), None).computer_delay_ms(), 250);
        assert_eq!(*with_delay(file, Some(0)).computer_delay_ms(), 0);
    }
}
