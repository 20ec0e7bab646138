//! Preconditions and invariants for move requests.
//!
//! Preconditions are checked before every move and reject it without side
//! effects. The board invariant is asserted after every accepted move in
//! debug builds.

use crate::{Board, MoveError, PlayerKind, Players, Position, Symbol, TurnController, rules};
use tracing::{instrument, warn};

/// Precondition: the board does not yet show a win or a draw.
pub struct OutcomePending;

impl OutcomePending {
    /// Rejects with [`MoveError::GameOver`] once the outcome is terminal.
    #[instrument(skip(board))]
    pub fn check(board: &Board) -> Result<(), MoveError> {
        if rules::evaluate(board).is_terminal() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the active side is of the requesting kind.
pub struct KindToMove;

impl KindToMove {
    /// Returns the active symbol if its player is of `kind`.
    #[instrument(skip(players, turn))]
    pub fn check(
        players: &Players,
        turn: &TurnController,
        kind: PlayerKind,
    ) -> Result<Symbol, MoveError> {
        let active = turn.active().ok_or(MoveError::NoActivePlayer)?;
        if players.get(active).kind() != kind {
            return Err(MoveError::NotYourTurn(active));
        }
        Ok(active)
    }
}

/// Precondition: the target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Rejects with [`MoveError::CellOccupied`] if `pos` holds a mark.
    #[instrument(skip(board))]
    pub fn check(board: &Board, pos: Position) -> Result<(), MoveError> {
        if board.is_vacant(pos) {
            Ok(())
        } else {
            Err(MoveError::CellOccupied(pos))
        }
    }
}

/// Composite precondition for a move by the side of `kind`.
///
/// `target` is `None` for scripted moves, whose cell is not known until the
/// policy runs.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions and returns the symbol to place.
    #[instrument(skip(board, players, turn))]
    pub fn check(
        board: &Board,
        players: &Players,
        turn: &TurnController,
        kind: PlayerKind,
        target: Option<Position>,
    ) -> Result<Symbol, MoveError> {
        OutcomePending::check(board)?;
        let active = KindToMove::check(players, turn, kind)?;
        if let Some(pos) = target {
            CellIsEmpty::check(board, pos)?;
        }
        Ok(active)
    }
}

/// Invariant: X moves first and turns alternate, so X leads O by zero or one mark.
pub struct BoardConsistent;

impl BoardConsistent {
    /// True if the mark counts are consistent with alternating play.
    #[instrument(skip(board))]
    pub fn holds(board: &Board) -> bool {
        let x_count = board.count(Symbol::X);
        let o_count = board.count(Symbol::O);
        let valid = x_count == o_count || x_count == o_count + 1;
        if !valid {
            warn!(x_count, o_count, "Board consistency violated");
        }
        valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayerSetup;

    fn human_vs_computer() -> Players {
        Players::new(
            &PlayerSetup::new("Ada", PlayerKind::Human),
            &PlayerSetup::new("HAL", PlayerKind::Scripted),
        )
    }

    #[test]
    fn test_unset_turn_rejected() {
        let turn = TurnController::new();
        assert_eq!(
            KindToMove::check(&human_vs_computer(), &turn, PlayerKind::Human),
            Err(MoveError::NoActivePlayer)
        );
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let mut turn = TurnController::new();
        turn.start();
        let players = human_vs_computer();
        assert_eq!(
            KindToMove::check(&players, &turn, PlayerKind::Scripted),
            Err(MoveError::NotYourTurn(Symbol::X))
        );
        assert_eq!(
            KindToMove::check(&players, &turn, PlayerKind::Human),
            Ok(Symbol::X)
        );
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut board = Board::new();
        board.try_set(Symbol::X, Position::Center).unwrap();
        let mut turn = TurnController::new();
        turn.set_active(Symbol::O);
        let players = Players::default();

        assert_eq!(
            LegalMove::check(
                &board,
                &players,
                &turn,
                PlayerKind::Human,
                Some(Position::Center)
            ),
            Err(MoveError::CellOccupied(Position::Center))
        );
    }

    #[test]
    fn test_finished_game_rejected() {
        let mut board = Board::new();
        for pos in [Position::TopLeft, Position::TopCenter, Position::TopRight] {
            board.try_set(Symbol::X, pos).unwrap();
        }
        assert_eq!(OutcomePending::check(&board), Err(MoveError::GameOver));
    }

    #[test]
    fn test_board_consistency() {
        let mut board = Board::new();
        assert!(BoardConsistent::holds(&board));
        board.try_set(Symbol::X, Position::Center).unwrap();
        assert!(BoardConsistent::holds(&board));
        board.try_set(Symbol::X, Position::TopLeft).unwrap();
        assert!(!BoardConsistent::holds(&board));
    }
}
