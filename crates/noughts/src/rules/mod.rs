//! Game rules for tic-tac-toe.
//!
//! Pure functions evaluating a board. Rules are kept apart from board
//! storage so the engine, the move policy and the tests can share them.

pub mod draw;
pub mod win;

pub use draw::is_draw;
pub use win::{check_winner, evaluate, winning_line};
