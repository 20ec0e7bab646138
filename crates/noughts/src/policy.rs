//! Move selection for scripted players.
//!
//! [`GreedyPolicy`] looks one ply ahead and no further. It has no centre
//! preference and does not see double threats. Priority order:
//!
//! 1. Opening book: on an empty board, a uniformly random corner.
//! 2. Win now: complete any line holding two of our marks and one gap.
//! 3. Block: fill the gap in any line holding two opposing marks.
//! 4. Fallback: the first empty cell in row-major order.

use crate::{Board, Cell, Line, MoveError, Position, Symbol};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// Picks a cell for the side to move.
pub trait MovePolicy {
    /// Chooses an empty cell for `active` to mark.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::BoardFull`] if no empty cell remains.
    fn choose_move(&mut self, board: &Board, active: Symbol) -> Result<Position, MoveError>;
}

/// Returns the gap in `line` if it holds exactly two `symbol` marks and one empty cell.
pub fn completing_cell(board: &Board, line: Line, symbol: Symbol) -> Option<Position> {
    let cells = board.line(line);
    let ours = cells
        .iter()
        .filter(|c| **c == Cell::Occupied(symbol))
        .count();
    let mut gaps = line
        .cells()
        .into_iter()
        .zip(cells)
        .filter(|(_, c)| *c == Cell::Empty)
        .map(|(pos, _)| pos);

    match (ours, gaps.next(), gaps.next()) {
        (2, Some(gap), None) => Some(gap),
        _ => None,
    }
}

/// First line, scanning [`Line::ALL`], that `symbol` can complete in one move.
pub fn find_completion(board: &Board, symbol: Symbol) -> Option<Position> {
    Line::ALL
        .into_iter()
        .find_map(|line| completing_cell(board, line, symbol))
}

/// Plays the first empty cell in row-major order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstVacantPolicy;

impl MovePolicy for FirstVacantPolicy {
    fn choose_move(&mut self, board: &Board, _active: Symbol) -> Result<Position, MoveError> {
        board.vacancies().next().ok_or(MoveError::BoardFull)
    }
}

/// Greedy one-ply heuristic with a random-corner opening.
#[derive(Debug, Clone)]
pub struct GreedyPolicy<R = StdRng> {
    rng: R,
}

impl GreedyPolicy<StdRng> {
    /// Creates a policy seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a policy with a fixed seed, for reproducible openings.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GreedyPolicy<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: rand::Rng> GreedyPolicy<R> {
    /// Creates a policy drawing opening corners from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: rand::Rng> MovePolicy for GreedyPolicy<R> {
    #[instrument(skip(self, board), fields(board = %board))]
    fn choose_move(&mut self, board: &Board, active: Symbol) -> Result<Position, MoveError> {
        if board.is_empty() {
            let corner = *Position::CORNERS
                .choose(&mut self.rng)
                .unwrap_or(&Position::TopLeft);
            debug!(%corner, "Opening book");
            return Ok(corner);
        }

        if let Some(pos) = find_completion(board, active) {
            debug!(%pos, "Completing own line");
            return Ok(pos);
        }

        if let Some(pos) = find_completion(board, active.opponent()) {
            debug!(%pos, "Blocking opponent line");
            return Ok(pos);
        }

        let pos = FirstVacantPolicy.choose_move(board, active)?;
        debug!(%pos, "Falling back to first empty cell");
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(marks: &[(Symbol, Position)]) -> Board {
        let mut board = Board::new();
        for (symbol, pos) in marks {
            board.try_set(*symbol, *pos).unwrap();
        }
        board
    }

    #[test]
    fn test_opening_book_picks_a_corner() {
        let board = Board::new();
        for seed in 0..32 {
            let mut policy = GreedyPolicy::seeded(seed);
            let pos = policy.choose_move(&board, Symbol::X).unwrap();
            assert!(Position::CORNERS.contains(&pos), "{pos} is not a corner");
        }
    }

    #[test]
    fn test_opening_book_uses_every_corner() {
        let board = Board::new();
        let mut policy = GreedyPolicy::seeded(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(policy.choose_move(&board, Symbol::X).unwrap());
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_win_now_beats_block() {
        let board = board_with(&[
            (Symbol::X, Position::TopLeft),
            (Symbol::O, Position::MiddleLeft),
            (Symbol::X, Position::TopCenter),
            (Symbol::O, Position::Center),
        ]);
        let mut policy = GreedyPolicy::seeded(0);
        assert_eq!(
            policy.choose_move(&board, Symbol::X),
            Ok(Position::TopRight)
        );
    }

    #[test]
    fn test_blocks_opponent() {
        let board = board_with(&[
            (Symbol::X, Position::TopLeft),
            (Symbol::O, Position::Center),
            (Symbol::X, Position::BottomCenter),
            (Symbol::O, Position::MiddleRight),
        ]);
        // X cannot win in one; O threatens the middle row.
        let mut policy = GreedyPolicy::seeded(0);
        assert_eq!(
            policy.choose_move(&board, Symbol::X),
            Ok(Position::MiddleLeft)
        );
    }

    #[test]
    fn test_block_uses_diagonals() {
        let board = board_with(&[
            (Symbol::X, Position::TopCenter),
            (Symbol::O, Position::TopRight),
            (Symbol::X, Position::MiddleLeft),
            (Symbol::O, Position::Center),
        ]);
        let mut policy = GreedyPolicy::seeded(0);
        assert_eq!(
            policy.choose_move(&board, Symbol::X),
            Ok(Position::BottomLeft)
        );
    }

    #[test]
    fn test_fallback_scans_row_major() {
        let board = board_with(&[(Symbol::X, Position::TopLeft)]);
        let mut policy = GreedyPolicy::seeded(0);
        assert_eq!(
            policy.choose_move(&board, Symbol::O),
            Ok(Position::TopCenter)
        );
    }

    #[test]
    fn test_no_centre_preference() {
        // A stronger player would take the centre here.
        let board = board_with(&[(Symbol::X, Position::BottomRight)]);
        let mut policy = GreedyPolicy::seeded(0);
        assert_eq!(policy.choose_move(&board, Symbol::O), Ok(Position::TopLeft));
    }

    #[test]
    fn test_full_board_is_an_error() {
        let mut board = Board::new();
        for (i, pos) in Position::ALL.into_iter().enumerate() {
            let symbol = if i % 2 == 0 { Symbol::X } else { Symbol::O };
            board.try_set(symbol, pos).unwrap();
        }
        let mut policy = GreedyPolicy::seeded(0);
        assert_eq!(
            policy.choose_move(&board, Symbol::O),
            Err(MoveError::BoardFull)
        );
    }

    #[test]
    fn test_completing_cell_needs_exactly_one_gap() {
        let board = board_with(&[(Symbol::X, Position::TopLeft)]);
        assert_eq!(completing_cell(&board, Line::TopRow, Symbol::X), None);

        let board = board_with(&[
            (Symbol::X, Position::TopLeft),
            (Symbol::X, Position::TopRight),
        ]);
        assert_eq!(
            completing_cell(&board, Line::TopRow, Symbol::X),
            Some(Position::TopCenter)
        );

        let board = board_with(&[
            (Symbol::X, Position::TopLeft),
            (Symbol::X, Position::TopRight),
            (Symbol::O, Position::TopCenter),
        ]);
        assert_eq!(completing_cell(&board, Line::TopRow, Symbol::X), None);
    }
}
