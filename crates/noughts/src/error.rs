//! Error types for board mutation and move requests.
//!
//! Apart from [`InvalidCoordinate`], every error here is *soft*: callers
//! routinely probe occupied cells or click out of turn, and are expected to
//! ignore the rejection. A rejected request never mutates state and never
//! raises a change notification.

use crate::{Position, Symbol};

/// A `(row, col)` pair outside the 3×3 grid.
///
/// This is a contract failure rather than a recoverable path: every caller
/// in the workspace enumerates [`Position`]s directly, so only the raw
/// coordinate entry points can produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("Coordinate ({}, {}) is outside the 3x3 grid", row, col)]
pub struct InvalidCoordinate {
    /// Requested row.
    pub row: usize,
    /// Requested column.
    pub col: usize,
}

impl std::error::Error for InvalidCoordinate {}

/// Error returned when a move request is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The target cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Position),

    /// The active side is not the kind of player making the request.
    #[display("It's not the {:?} player's turn", _0)]
    NotYourTurn(Symbol),

    /// The board already shows a win or a draw.
    #[display("Game is already over")]
    GameOver,

    /// No empty cell remains for the scripted player.
    #[display("Board is full")]
    BoardFull,

    /// No game has been started, so nobody is active.
    #[display("No active player")]
    NoActivePlayer,

    /// A scheduled scripted move outlived the game it was scheduled for.
    #[display("Scheduled move from generation {} is stale", _0)]
    StaleMove(u64),

    /// A raw coordinate was outside the grid.
    #[display("{}", _0)]
    InvalidCoordinate(InvalidCoordinate),
}

impl std::error::Error for MoveError {}

impl From<InvalidCoordinate> for MoveError {
    fn from(err: InvalidCoordinate) -> Self {
        MoveError::InvalidCoordinate(err)
    }
}
