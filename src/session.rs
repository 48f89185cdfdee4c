//! Async game session: one actor task owns the game.
//!
//! Front-ends hold a cheap, cloneable [`SessionHandle`]. Commands travel to
//! the actor over an mpsc channel; the latest [`Snapshot`] is published on a
//! watch channel so reads never wait on the actor, not even while the
//! computer's reply is pending. Every change is also pushed as a
//! [`SessionEvent`].
//!
//! The computer's reply is a spawned timer task. It sleeps for the pacing
//! delay and then sends the game generation it was scheduled for back to the
//! actor. Reset aborts the task, and a reply that still arrives for an older
//! generation is dropped.

use crate::config::SessionConfig;
use derive_getters::Getters;
use noughts_engine::{Board, EngineError, Game, GameResult, Move, Phase, Player};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

/// Running tally of finished games in this process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize)]
pub struct Scoreboard {
    human_wins: u32,
    computer_wins: u32,
    draws: u32,
}

impl Scoreboard {
    /// Counts one finished game.
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::HumanWin => self.human_wins += 1,
            GameResult::ComputerWin => self.computer_wins += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    /// Number of finished games.
    pub fn total(&self) -> u32 {
        self.human_wins + self.computer_wins + self.draws
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "You {} - {} Computer ({} draws)",
            self.human_wins, self.computer_wins, self.draws
        )
    }
}

/// Observable session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// The current board.
    pub board: Board,
    /// The current phase.
    pub phase: Phase,
    /// Whether human input is accepted right now.
    pub input_enabled: bool,
    /// Reset counter of the game shown.
    pub generation: u64,
    /// Tally of finished games.
    pub scoreboard: Scoreboard,
}

/// Notifications pushed to the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The snapshot changed.
    StateChanged(Snapshot),
    /// The computer's reply is scheduled; input is disabled until it lands.
    ComputerThinking,
    /// A mark was placed.
    MoveMade(Move),
    /// The game ended.
    GameOver(GameResult),
}

/// Errors surfaced to session callers.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SessionError {
    /// The engine refused the request for a reason that is not a plain
    /// input rejection.
    #[display("Engine error: {}", _0)]
    Engine(EngineError),
    /// The session actor has stopped.
    #[display("Session closed")]
    Closed,
}

impl From<EngineError> for SessionError {
    fn from(err: EngineError) -> Self {
        SessionError::Engine(err)
    }
}

enum Command {
    HumanMove {
        index: usize,
        reply: oneshot::Sender<Result<bool, SessionError>>,
    },
    Reset {
        reply: oneshot::Sender<()>,
    },
    Shutdown,
}

/// Client side of a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<Snapshot>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::HumanMove { index, .. } => write!(f, "HumanMove({})", index),
            Command::Reset { .. } => write!(f, "Reset"),
            Command::Shutdown => write!(f, "Shutdown"),
        }
    }
}

impl SessionHandle {
    /// Requests a human move at `index`.
    ///
    /// Returns `Ok(true)` if the move was applied and `Ok(false)` if it was
    /// ignored (occupied cell, or input disabled).
    ///
    /// # Errors
    ///
    /// [`SessionError::Engine`] for an out-of-range index, and
    /// [`SessionError::Closed`] if the actor has stopped.
    #[instrument(skip(self))]
    pub async fn human_move(&self, index: usize) -> Result<bool, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::HumanMove { index, reply })
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)?
    }

    /// Clears the board and cancels any pending computer move.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<(), SessionError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Reset { reply })
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Returns the latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    /// Returns a receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.clone()
    }

    /// Waits until a published snapshot satisfies `predicate`.
    pub async fn wait_until(
        &self,
        predicate: impl FnMut(&Snapshot) -> bool,
    ) -> Result<Snapshot, SessionError> {
        let mut state = self.state.clone();
        let snapshot = state
            .wait_for(predicate)
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(snapshot.clone())
    }

    /// Stops the actor. Pending work is cancelled.
    pub fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown);
    }
}

/// The actor owning the game.
pub struct GameSession {
    game: Game,
    scoreboard: Scoreboard,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    timer_tx: mpsc::UnboundedSender<u64>,
    state_tx: watch::Sender<Snapshot>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl GameSession {
    /// Spawns a session actor on the current tokio runtime.
    ///
    /// Events are pushed to `event_tx`; dropping its receiver is fine. The
    /// actor stops when every handle is dropped or on
    /// [`SessionHandle::shutdown`].
    #[instrument(skip_all, fields(delay_ms = config.computer_delay_ms()))]
    pub fn spawn(
        config: &SessionConfig,
        event_tx: mpsc::UnboundedSender<SessionEvent>,
    ) -> SessionHandle {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        let game = Game::new();
        let scoreboard = Scoreboard::default();
        let (state_tx, state) = watch::channel(snapshot_of(&game, scoreboard));

        let session = Self {
            game,
            scoreboard,
            delay: config.computer_delay(),
            pending: None,
            timer_tx,
            state_tx,
            event_tx,
        };
        tokio::spawn(session.run(command_rx, timer_rx));
        info!("Game session started");

        SessionHandle { commands, state }
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut timers: mpsc::UnboundedReceiver<u64>,
    ) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::HumanMove { index, reply }) => {
                        let _ = reply.send(self.handle_human_move(index));
                    }
                    Some(Command::Reset { reply }) => {
                        self.handle_reset();
                        let _ = reply.send(());
                    }
                    Some(Command::Shutdown) | None => break,
                },
                Some(generation) = timers.recv() => self.handle_computer_move(generation),
            }
        }
        self.cancel_pending();
        info!("Game session stopped");
    }

    #[instrument(skip(self), fields(generation = self.game.generation()))]
    fn handle_human_move(&mut self, index: usize) -> Result<bool, SessionError> {
        match self.game.process_human_move(index) {
            Ok(phase) => {
                self.emit(SessionEvent::MoveMade(Move::new(Player::Human, index)));
                if phase == Phase::ComputerThinking {
                    self.schedule_computer_move();
                }
                self.settle(phase);
                Ok(true)
            }
            Err(e) if e.is_rejected_input() => {
                debug!(error = %e, "Ignoring human input");
                Ok(false)
            }
            Err(e) => {
                error!(error = %e, "Invalid human move request");
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self))]
    fn handle_computer_move(&mut self, generation: u64) {
        let current = self.game.generation();
        if generation != current || self.game.phase() != Phase::ComputerThinking {
            debug!(current, "Discarding stale computer move");
            return;
        }
        self.pending = None;

        match self.game.play_computer_move() {
            Ok(turn) => {
                info!(index = turn.mv.index(), rule = %turn.choice.rule, "Computer moved");
                self.emit(SessionEvent::MoveMade(turn.mv));
                self.settle(turn.phase);
            }
            Err(e) => error!(error = %e, "Computer could not move"),
        }
    }

    fn handle_reset(&mut self) {
        self.cancel_pending();
        self.game.reset();
        self.publish();
    }

    fn schedule_computer_move(&mut self) {
        self.cancel_pending();
        let generation = self.game.generation();
        let delay = self.delay;
        let timer_tx = self.timer_tx.clone();
        self.emit(SessionEvent::ComputerThinking);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = timer_tx.send(generation);
        }));
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            debug!("Cancelling pending computer move");
            task.abort();
        }
    }

    /// Records a finished game, then publishes.
    fn settle(&mut self, phase: Phase) {
        let result = phase.result();
        if let Some(result) = result {
            self.scoreboard.record(result);
        }
        self.publish();
        if let Some(result) = result {
            info!(%result, scoreboard = %self.scoreboard, "Game finished");
            self.emit(SessionEvent::GameOver(result));
        }
    }

    fn publish(&mut self) {
        let snapshot = snapshot_of(&self.game, self.scoreboard);
        self.state_tx.send_replace(snapshot.clone());
        self.emit(SessionEvent::StateChanged(snapshot));
    }

    fn emit(&self, event: SessionEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Event receiver dropped");
        }
    }
}

fn snapshot_of(game: &Game, scoreboard: Scoreboard) -> Snapshot {
    Snapshot {
        board: game.board().clone(),
        phase: game.phase(),
        input_enabled: game.accepts_input(),
        generation: game.generation(),
        scoreboard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> (
        GameSession,
        mpsc::UnboundedReceiver<SessionEvent>,
        mpsc::UnboundedReceiver<u64>,
    ) {
        let (event_tx, events) = mpsc::unbounded_channel();
        let (timer_tx, timers) = mpsc::unbounded_channel();
        let game = Game::new();
        let (state_tx, _) = watch::channel(snapshot_of(&game, Scoreboard::default()));
        let session = GameSession {
            game,
            scoreboard: Scoreboard::default(),
            delay: Duration::from_millis(500),
            pending: None,
            timer_tx,
            state_tx,
            event_tx,
        };
        (session, events, timers)
    }

    fn drain(events: &mut mpsc::UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
        let mut out = Vec::new();
        while let Ok(event) = events.try_recv() {
            out.push(event);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_reply_from_previous_game_is_dropped() {
        let (mut session, mut events, _timers) = session();

        assert_eq!(session.handle_human_move(0), Ok(true));
        let old_generation = session.game.generation();
        session.handle_reset();
        // The new game is waiting on its own reply, so only the generation
        // tells the two apart.
        assert_eq!(session.handle_human_move(8), Ok(true));
        assert_eq!(session.game.phase(), Phase::ComputerThinking);
        let before = session.state_tx.borrow().clone();
        drain(&mut events);

        session.handle_computer_move(old_generation);

        assert_eq!(*session.state_tx.borrow(), before);
        assert_eq!(session.game.board(), &before.board);
        assert_eq!(session.game.phase(), Phase::ComputerThinking);
        assert!(drain(&mut events).is_empty());

        session.handle_computer_move(session.game.generation());
        assert_eq!(session.game.phase(), Phase::AwaitingHumanMove);
        assert_eq!(session.game.board().occupied_count(), 2);
        assert!(
            drain(&mut events)
                .contains(&SessionEvent::MoveMade(Move::new(Player::Computer, 4)))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_reply_is_dropped() {
        let (mut session, mut events, _timers) = session();
        session.handle_human_move(0).unwrap();
        let generation = session.game.generation();
        session.handle_computer_move(generation);
        drain(&mut events);
        let before = session.state_tx.borrow().clone();

        // A duplicate reply for the same game while the human is to move.
        session.handle_computer_move(generation);

        assert_eq!(*session.state_tx.borrow(), before);
        assert!(drain(&mut events).is_empty());
    }
}
