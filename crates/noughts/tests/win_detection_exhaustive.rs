//! Exhaustive check of win/draw detection over every reachable position.

use noughts::{Board, Cell, GameOutcome, Line, Position, Symbol, rules};
use std::collections::HashSet;

/// Outcome computed straight from the definition, independent of line order.
fn reference_outcome(board: &Board) -> GameOutcome {
    let winners: HashSet<Symbol> = Line::ALL
        .into_iter()
        .filter_map(|line| match board.line(line) {
            [Cell::Occupied(a), Cell::Occupied(b), Cell::Occupied(c)] if a == b && b == c => {
                Some(a)
            }
            _ => None,
        })
        .collect();

    assert!(winners.len() <= 1, "Both symbols won on\n{board}");
    match winners.into_iter().next() {
        Some(symbol) => GameOutcome::Win(symbol),
        None if board.is_full() => GameOutcome::Draw,
        None => GameOutcome::InProgress,
    }
}

fn explore(board: &Board, to_move: Symbol, seen: &mut HashSet<Board>) {
    if !seen.insert(board.clone()) {
        return;
    }

    let outcome = rules::evaluate(board);
    assert_eq!(outcome, reference_outcome(board), "Mismatch on\n{board}");
    assert_eq!(rules::is_draw(board), outcome == GameOutcome::Draw);
    if outcome.is_terminal() {
        return;
    }

    for pos in Position::ALL {
        let mut next = board.snapshot();
        if next.try_set(to_move, pos).is_ok() {
            explore(&next, to_move.opponent(), seen);
        }
    }
}

#[test]
fn test_every_reachable_position() {
    let mut seen = HashSet::new();
    explore(&Board::new(), Symbol::X, &mut seen);

    // 5478 distinct legal positions are reachable in tic-tac-toe.
    assert_eq!(seen.len(), 5478);
}

#[test]
fn test_terminal_counts() {
    let mut seen = HashSet::new();
    explore(&Board::new(), Symbol::X, &mut seen);

    let outcomes: Vec<_> = seen.iter().map(rules::evaluate).collect();
    let x_wins = outcomes.iter().filter(|o| **o == GameOutcome::Win(Symbol::X)).count();
    let o_wins = outcomes.iter().filter(|o| **o == GameOutcome::Win(Symbol::O)).count();
    let draws = outcomes.iter().filter(|o| **o == GameOutcome::Draw).count();

    // 958 terminal positions: 626 X wins, 316 O wins, 16 draws.
    assert_eq!(x_wins, 626);
    assert_eq!(o_wins, 316);
    assert_eq!(draws, 16);
}
