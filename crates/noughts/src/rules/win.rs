//! Win detection logic for tic-tac-toe.

use crate::{Board, Cell, GameOutcome, Line, Symbol};
use tracing::instrument;

/// Returns the first line, in detection order, holding three equal marks.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<(Line, Symbol)> {
    Line::DETECTION_ORDER.into_iter().find_map(|line| {
        match board.line(line) {
            [Cell::Occupied(a), Cell::Occupied(b), Cell::Occupied(c)] if a == b && b == c => {
                Some((line, a))
            }
            _ => None,
        }
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(symbol)` if that symbol has three in a row,
/// `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Symbol> {
    winning_line(board).map(|(_, symbol)| symbol)
}

/// Derives the outcome of `board`.
///
/// A winning line takes precedence over a full board.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> GameOutcome {
    if let Some(symbol) = check_winner(board) {
        GameOutcome::Win(symbol)
    } else if board.is_full() {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}
