//! The game-state engine.
//!
//! [`GameEngine`] composes the board, turn controller, win detection and a
//! [`MovePolicy`] behind three entry points: human moves, scripted moves and
//! reset. Every accepted change fires the registered change callbacks;
//! rejected requests leave state untouched and stay silent.

use crate::contracts::{BoardConsistent, LegalMove};
use crate::{
    Board, ChangeNotifier, GameOutcome, GreedyPolicy, MoveError, MovePolicy, Player, PlayerKind,
    PlayerSetup, Players, Position, SubscriptionId, Symbol, TurnController, rules,
};
use tracing::{debug, info, instrument};

/// Tic-tac-toe game engine.
#[derive(Debug)]
pub struct GameEngine<P = GreedyPolicy> {
    board: Board,
    players: Players,
    turn: TurnController,
    policy: P,
    notifier: ChangeNotifier,
}

impl GameEngine<GreedyPolicy> {
    /// Creates an engine with the greedy policy and starts a game.
    pub fn new(players: Players) -> Self {
        Self::with_policy(players, GreedyPolicy::new())
    }
}

impl<P: MovePolicy> GameEngine<P> {
    /// Creates an engine driven by `policy` and starts a game.
    ///
    /// The board is empty and X is on move.
    #[instrument(skip(policy))]
    pub fn with_policy(players: Players, policy: P) -> Self {
        let mut turn = TurnController::new();
        turn.start();
        Self {
            board: Board::new(),
            players,
            turn,
            policy,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Marks `pos` for the active human player.
    ///
    /// Returns the outcome after the move. The turn passes to the other side
    /// only while the game is still in progress.
    ///
    /// # Errors
    ///
    /// Soft rejections, all without side effects:
    /// [`MoveError::GameOver`], [`MoveError::NotYourTurn`] when a scripted
    /// player is active, [`MoveError::CellOccupied`].
    #[instrument(skip(self))]
    pub fn apply_human_move(&mut self, pos: Position) -> Result<GameOutcome, MoveError> {
        let symbol = LegalMove::check(
            &self.board,
            &self.players,
            &self.turn,
            PlayerKind::Human,
            Some(pos),
        )
        .inspect_err(|e| debug!(error = %e, "Human move rejected"))?;

        self.commit(symbol, pos)
    }

    /// Raw-coordinate form of [`GameEngine::apply_human_move`].
    ///
    /// # Errors
    ///
    /// As for `apply_human_move`, plus [`MoveError::InvalidCoordinate`].
    pub fn apply_human_move_at(&mut self, row: usize, col: usize) -> Result<GameOutcome, MoveError> {
        self.apply_human_move(Position::from_row_col(row, col)?)
    }

    /// Lets the policy pick and mark a cell for the active scripted player.
    ///
    /// Returns the chosen cell and the outcome after the move.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameOver`], [`MoveError::NotYourTurn`] when a human is
    /// active, or whatever the policy reports.
    #[instrument(skip(self))]
    pub fn apply_scripted_move(&mut self) -> Result<(Position, GameOutcome), MoveError> {
        let symbol = LegalMove::check(
            &self.board,
            &self.players,
            &self.turn,
            PlayerKind::Scripted,
            None,
        )
        .inspect_err(|e| debug!(error = %e, "Scripted move rejected"))?;

        let pos = self.policy.choose_move(&self.board, symbol)?;
        let outcome = self.commit(symbol, pos)?;
        Ok((pos, outcome))
    }

    /// Clears the board, puts X on move and notifies subscribers.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.reset();
        self.turn.start();
        info!("Board reset");
        self.notifier.notify();
    }

    /// Applies a new-game setup to both players, then resets.
    #[instrument(skip(self))]
    pub fn new_game(&mut self, x: &PlayerSetup, o: &PlayerSetup) {
        self.players.get_mut(Symbol::X).configure(x);
        self.players.get_mut(Symbol::O).configure(o);
        info!(
            x = %x.name(),
            x_kind = %x.kind(),
            o = %o.name(),
            o_kind = %o.kind(),
            "New game"
        );
        self.reset();
    }

    fn commit(&mut self, symbol: Symbol, pos: Position) -> Result<GameOutcome, MoveError> {
        self.board.try_set(symbol, pos)?;

        let outcome = rules::evaluate(&self.board);
        if outcome == GameOutcome::InProgress {
            self.turn.toggle();
        } else {
            info!(?outcome, "Game finished");
        }
        debug_assert!(
            BoardConsistent::holds(&self.board),
            "Board consistency violated"
        );
        debug!(%symbol, %pos, board = %self.board, "Move applied");

        self.notifier.notify();
        Ok(outcome)
    }

    /// Registers a change callback.
    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        self.notifier.subscribe(callback)
    }

    /// Removes a change callback. Returns false if `id` was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Returns the live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns an independent copy of the board.
    pub fn snapshot(&self) -> Board {
        self.board.snapshot()
    }

    /// Outcome derived from the current board.
    pub fn outcome(&self) -> GameOutcome {
        rules::evaluate(&self.board)
    }

    /// Both players.
    pub fn players(&self) -> &Players {
        &self.players
    }

    /// The player for `symbol`.
    pub fn player(&self, symbol: Symbol) -> &Player {
        self.players.get(symbol)
    }

    /// The player whose move is awaited.
    pub fn active_player(&self) -> Option<&Player> {
        self.turn.active().map(|symbol| self.players.get(symbol))
    }

    /// The winning player, once the board shows a win.
    pub fn winner(&self) -> Option<&Player> {
        self.outcome().winner().map(|symbol| self.players.get(symbol))
    }

    /// True while the game is running and a scripted player is on move.
    pub fn awaiting_scripted_move(&self) -> bool {
        !self.outcome().is_terminal() && self.active_player().is_some_and(Player::is_scripted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FirstVacantPolicy;
    use std::cell::Cell;
    use std::rc::Rc;

    fn engine(x: PlayerKind, o: PlayerKind) -> GameEngine<FirstVacantPolicy> {
        GameEngine::with_policy(
            Players::new(&PlayerSetup::new("X", x), &PlayerSetup::new("O", o)),
            FirstVacantPolicy,
        )
    }

    fn counter(engine: &mut GameEngine<FirstVacantPolicy>) -> Rc<Cell<usize>> {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        engine.subscribe(move || counter.set(counter.get() + 1));
        hits
    }

    #[test]
    fn test_new_engine_is_ready() {
        let engine = engine(PlayerKind::Human, PlayerKind::Human);
        assert!(engine.board().is_empty());
        assert_eq!(engine.active_player().map(Player::symbol), Some(Symbol::X));
        assert_eq!(engine.outcome(), GameOutcome::InProgress);
    }

    #[test]
    fn test_human_move_toggles_and_notifies() {
        let mut engine = engine(PlayerKind::Human, PlayerKind::Human);
        let hits = counter(&mut engine);

        assert_eq!(
            engine.apply_human_move(Position::Center),
            Ok(GameOutcome::InProgress)
        );
        assert_eq!(hits.get(), 1);
        assert_eq!(engine.active_player().map(Player::symbol), Some(Symbol::O));
    }

    #[test]
    fn test_rejected_move_is_silent() {
        let mut engine = engine(PlayerKind::Human, PlayerKind::Human);
        engine.apply_human_move(Position::Center).unwrap();
        let hits = counter(&mut engine);
        let before = engine.snapshot();

        assert_eq!(
            engine.apply_human_move(Position::Center),
            Err(MoveError::CellOccupied(Position::Center))
        );
        assert_eq!(hits.get(), 0);
        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.active_player().map(Player::symbol), Some(Symbol::O));
    }

    #[test]
    fn test_human_click_on_scripted_turn() {
        let mut engine = engine(PlayerKind::Scripted, PlayerKind::Human);
        let hits = counter(&mut engine);

        assert_eq!(
            engine.apply_human_move(Position::Center),
            Err(MoveError::NotYourTurn(Symbol::X))
        );
        assert_eq!(hits.get(), 0);
        assert!(engine.awaiting_scripted_move());
    }

    #[test]
    fn test_scripted_move_on_human_turn() {
        let mut engine = engine(PlayerKind::Human, PlayerKind::Scripted);
        assert_eq!(
            engine.apply_scripted_move(),
            Err(MoveError::NotYourTurn(Symbol::X))
        );
        assert!(engine.board().is_empty());
    }

    #[test]
    fn test_scripted_reply() {
        let mut engine = engine(PlayerKind::Human, PlayerKind::Scripted);
        engine.apply_human_move(Position::Center).unwrap();
        assert!(engine.awaiting_scripted_move());

        let (pos, outcome) = engine.apply_scripted_move().unwrap();
        assert_eq!(pos, Position::TopLeft);
        assert_eq!(outcome, GameOutcome::InProgress);
        assert_eq!(engine.active_player().map(Player::symbol), Some(Symbol::X));
    }

    #[test]
    fn test_win_keeps_winner_active_and_blocks_moves() {
        let mut engine = engine(PlayerKind::Human, PlayerKind::Human);
        for pos in [
            Position::TopLeft,
            Position::MiddleLeft,
            Position::TopCenter,
            Position::Center,
        ] {
            engine.apply_human_move(pos).unwrap();
        }
        assert_eq!(
            engine.apply_human_move(Position::TopRight),
            Ok(GameOutcome::Win(Symbol::X))
        );
        assert_eq!(engine.active_player().map(Player::symbol), Some(Symbol::X));
        assert_eq!(engine.winner().map(|p| p.name().as_str()), Some("X"));
        assert_eq!(
            engine.apply_human_move(Position::BottomRight),
            Err(MoveError::GameOver)
        );
    }

    #[test]
    fn test_reset_clears_and_notifies() {
        let mut engine = engine(PlayerKind::Human, PlayerKind::Human);
        engine.apply_human_move(Position::Center).unwrap();
        let hits = counter(&mut engine);

        engine.reset();
        assert_eq!(hits.get(), 1);
        assert!(engine.board().is_empty());
        assert!(!engine.board().is_full());
        assert_eq!(engine.active_player().map(Player::symbol), Some(Symbol::X));
    }

    #[test]
    fn test_new_game_reconfigures_players() {
        let mut engine = engine(PlayerKind::Human, PlayerKind::Human);
        engine.apply_human_move(Position::Center).unwrap();
        engine.new_game(
            &PlayerSetup::new("Ada", PlayerKind::Human),
            &PlayerSetup::new("HAL", PlayerKind::Scripted),
        );

        assert!(engine.board().is_empty());
        assert_eq!(engine.player(Symbol::O).name(), "HAL");
        assert!(engine.player(Symbol::O).is_scripted());
        assert_eq!(engine.player(Symbol::X).symbol(), Symbol::X);
    }

    #[test]
    fn test_invalid_coordinate() {
        let mut engine = engine(PlayerKind::Human, PlayerKind::Human);
        assert!(matches!(
            engine.apply_human_move_at(0, 3),
            Err(MoveError::InvalidCoordinate(_))
        ));
        assert_eq!(engine.apply_human_move_at(2, 2), Ok(GameOutcome::InProgress));
        assert!(!engine.board().is_vacant(Position::BottomRight));
    }
}
