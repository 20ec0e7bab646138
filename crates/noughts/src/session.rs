//! Controller-side session: player intents in, scheduled scripted moves out.
//!
//! The front end owns the clock. When a move leaves a scripted player on
//! move, the session hands back a [`PendingMove`] token; the front end waits
//! out its delay and then redeems the token with
//! [`GameSession::request_scripted_move`]. Every reset or new game bumps the
//! session generation, so a token issued before it can never touch the new
//! board. Within a game each token also carries its own sequence number, so
//! a redeemed token never matches a later one.
//!
//! The engine is only reachable immutably; every mutation goes through the
//! session so the generation cannot be skipped.

use crate::{
    GameEngine, GameOutcome, GreedyPolicy, MoveError, MovePolicy, PlayerSetup, Players, Position,
    SubscriptionId,
};
use tracing::{debug, info, instrument};

/// Ticket for one deferred scripted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingMove {
    generation: u64,
    seq: u64,
}

impl PendingMove {
    /// Generation the move was scheduled under.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Position of the move in the session's schedule.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Result of an accepted move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    /// Cell that was marked.
    pub position: Position,
    /// Outcome after the move.
    pub outcome: GameOutcome,
    /// Scripted move to run next, if the game continues with a scripted player on move.
    pub next: Option<PendingMove>,
}

/// A game session as seen by the view/controller layer.
#[derive(Debug)]
pub struct GameSession<P = GreedyPolicy> {
    engine: GameEngine<P>,
    generation: u64,
    seq: u64,
    pending: Option<PendingMove>,
}

impl GameSession<GreedyPolicy> {
    /// Creates a session using the greedy policy.
    pub fn new(players: Players) -> Self {
        Self::with_policy(players, GreedyPolicy::new())
    }
}

impl<P: MovePolicy> GameSession<P> {
    /// Creates a session driven by `policy`.
    ///
    /// Nothing is scheduled until [`GameSession::new_game`] or
    /// [`GameSession::reset_board`] is called.
    pub fn with_policy(players: Players, policy: P) -> Self {
        Self {
            engine: GameEngine::with_policy(players, policy),
            generation: 0,
            seq: 0,
            pending: None,
        }
    }

    /// The underlying engine, for queries.
    pub fn engine(&self) -> &GameEngine<P> {
        &self.engine
    }

    /// Registers a change callback on the engine.
    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        self.engine.subscribe(callback)
    }

    /// Removes a change callback. Returns false if `id` was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.engine.unsubscribe(id)
    }

    /// Current generation. Increases on every reset and new game.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The scripted move currently scheduled, if any.
    pub fn pending(&self) -> Option<PendingMove> {
        self.pending
    }

    /// Configures both players and starts a fresh game.
    ///
    /// Returns a pending move if X is scripted.
    #[instrument(skip(self))]
    pub fn new_game(&mut self, x: &PlayerSetup, o: &PlayerSetup) -> Option<PendingMove> {
        self.invalidate();
        self.engine.new_game(x, o);
        self.schedule()
    }

    /// Clears the board and cancels any scheduled scripted move.
    ///
    /// Returns a pending move if X is scripted.
    #[instrument(skip(self))]
    pub fn reset_board(&mut self) -> Option<PendingMove> {
        self.invalidate();
        self.engine.reset();
        self.schedule()
    }

    /// Handles a click on `(row, col)` by the human on move.
    ///
    /// # Errors
    ///
    /// Soft rejections from [`GameEngine::apply_human_move`], or
    /// [`MoveError::InvalidCoordinate`] for an off-grid click.
    #[instrument(skip(self))]
    pub fn human_clicked_cell(&mut self, row: usize, col: usize) -> Result<MoveReport, MoveError> {
        self.human_move(Position::from_row_col(row, col)?)
    }

    /// Handles a human move on `pos`.
    ///
    /// # Errors
    ///
    /// Soft rejections from [`GameEngine::apply_human_move`].
    #[instrument(skip(self))]
    pub fn human_move(&mut self, pos: Position) -> Result<MoveReport, MoveError> {
        let outcome = self.engine.apply_human_move(pos)?;
        Ok(MoveReport {
            position: pos,
            outcome,
            next: self.schedule(),
        })
    }

    /// Redeems a scheduled scripted move.
    ///
    /// # Errors
    ///
    /// [`MoveError::StaleMove`] if `ticket` is not the move currently
    /// scheduled (a reset happened, or it was already redeemed), otherwise
    /// soft rejections from [`GameEngine::apply_scripted_move`].
    #[instrument(skip(self))]
    pub fn request_scripted_move(&mut self, ticket: PendingMove) -> Result<MoveReport, MoveError> {
        if self.pending != Some(ticket) {
            debug!(
                ticket = ticket.generation,
                ticket_seq = ticket.seq,
                current = self.generation,
                "Dropping stale scripted move"
            );
            return Err(MoveError::StaleMove(ticket.generation));
        }
        self.pending = None;

        let (position, outcome) = self.engine.apply_scripted_move()?;
        Ok(MoveReport {
            position,
            outcome,
            next: self.schedule(),
        })
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        if let Some(pending) = self.pending.take() {
            info!(generation = pending.generation, "Cancelled scheduled scripted move");
        }
    }

    fn schedule(&mut self) -> Option<PendingMove> {
        if !self.engine.awaiting_scripted_move() {
            return None;
        }
        self.seq += 1;
        let ticket = PendingMove {
            generation: self.generation,
            seq: self.seq,
        };
        self.pending = Some(ticket);
        debug!(generation = self.generation, seq = self.seq, "Scripted move scheduled");
        Some(ticket)
    }
}
