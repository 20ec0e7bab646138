//! Core domain types for tic-tac-toe.

use crate::{Line, MoveError, Position};
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Mark placed by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Symbol {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Symbol {
    /// Returns the opposing symbol.
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// No mark.
    Empty,
    /// Marked by a player.
    Occupied(Symbol),
}

impl Cell {
    /// Returns the symbol in this cell, if any.
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(symbol) => Some(symbol),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// `Board` is a plain value: cloning it yields an independent snapshot.
/// The only mutation is [`Board::try_set`], which either marks an empty cell
/// or leaves the board untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Gets the cell at a raw `(row, col)` coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidCoordinate`] if the coordinate is off the grid.
    pub fn get_at(&self, row: usize, col: usize) -> Result<Cell, MoveError> {
        Ok(self.get(Position::from_row_col(row, col)?))
    }

    /// Marks `pos` with `symbol` if the cell is empty.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::CellOccupied`] and leaves the board unchanged if
    /// the cell already holds a mark.
    #[instrument(skip(self))]
    pub fn try_set(&mut self, symbol: Symbol, pos: Position) -> Result<(), MoveError> {
        let cell = &mut self.cells[pos.to_index()];
        match cell {
            Cell::Empty => {
                *cell = Cell::Occupied(symbol);
                Ok(())
            }
            Cell::Occupied(_) => Err(MoveError::CellOccupied(pos)),
        }
    }

    /// Checks if the cell at `pos` is empty.
    pub fn is_vacant(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// True when no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// True when no cell holds a mark.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| *c == Cell::Empty)
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; 9];
    }

    /// Returns an independent copy of the board.
    pub fn snapshot(&self) -> Board {
        self.clone()
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Returns the three cells of `line`.
    pub fn line(&self, line: Line) -> [Cell; 3] {
        line.cells().map(|pos| self.get(pos))
    }

    /// Number of cells marked with `symbol`.
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(symbol))
            .count()
    }

    /// Empty positions in row-major order.
    pub fn vacancies(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|pos| self.is_vacant(*pos))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    /// Renders rows separated by `-+-+-`, empty cells shown as their 1-9 key.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.cells[pos] {
                    Cell::Empty => write!(f, "{}", pos + 1)?,
                    Cell::Occupied(symbol) => write!(f, "{}", symbol)?,
                }
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

/// Who decides a player's moves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
#[strum(ascii_case_insensitive)]
pub enum PlayerKind {
    /// Moves come from user input.
    #[default]
    #[strum(serialize = "human", to_string = "Human")]
    Human,
    /// Moves come from the move policy.
    #[strum(serialize = "scripted", serialize = "computer", to_string = "Computer")]
    Scripted,
}

impl TryFrom<String> for PlayerKind {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl PlayerKind {
    /// Toggles between `Human` and `Scripted`.
    pub fn toggle(self) -> Self {
        match self {
            PlayerKind::Human => PlayerKind::Scripted,
            PlayerKind::Scripted => PlayerKind::Human,
        }
    }
}

/// Name and kind requested for one side when a new game starts.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct PlayerSetup {
    /// Display name.
    #[new(into)]
    name: String,
    /// Human or scripted.
    #[serde(default)]
    kind: PlayerKind,
}

/// One of the two players in a session.
///
/// The symbol is fixed for the player's lifetime; name and kind change when
/// a new game is configured.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters)]
#[setters(borrow_self, prefix = "set_")]
pub struct Player {
    /// Mark this player places.
    #[setters(skip)]
    #[getter(copy)]
    symbol: Symbol,
    /// Display name.
    #[setters(into)]
    name: String,
    /// Human or scripted.
    #[getter(copy)]
    kind: PlayerKind,
}

impl Player {
    /// Creates a player for `symbol`.
    pub fn new(symbol: Symbol, name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            symbol,
            name: name.into(),
            kind,
        }
    }

    /// Applies a setup's name and kind.
    pub fn configure(&mut self, setup: &PlayerSetup) {
        self.set_name(setup.name().clone()).set_kind(*setup.kind());
    }

    /// True for scripted players.
    pub fn is_scripted(&self) -> bool {
        self.kind == PlayerKind::Scripted
    }
}

/// Exactly two players, one per symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Players {
    x: Player,
    o: Player,
}

impl Players {
    /// Creates the pair from per-side setups.
    pub fn new(x: &PlayerSetup, o: &PlayerSetup) -> Self {
        Self {
            x: Player::new(Symbol::X, x.name().clone(), *x.kind()),
            o: Player::new(Symbol::O, o.name().clone(), *o.kind()),
        }
    }

    /// Returns the player for `symbol`.
    pub fn get(&self, symbol: Symbol) -> &Player {
        match symbol {
            Symbol::X => &self.x,
            Symbol::O => &self.o,
        }
    }

    /// Returns the player for `symbol` mutably.
    pub fn get_mut(&mut self, symbol: Symbol) -> &mut Player {
        match symbol {
            Symbol::X => &mut self.x,
            Symbol::O => &mut self.o,
        }
    }
}

impl Default for Players {
    fn default() -> Self {
        Self::new(
            &PlayerSetup::new("Player X", PlayerKind::Human),
            &PlayerSetup::new("Player O", PlayerKind::Human),
        )
    }
}

/// Outcome derived from a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Moves remain and nobody has three in a row.
    InProgress,
    /// A player has three in a row.
    Win(Symbol),
    /// The board is full with no winner.
    Draw,
}

impl GameOutcome {
    /// True for `Win` and `Draw`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    /// Returns the winning symbol, if any.
    pub fn winner(self) -> Option<Symbol> {
        match self {
            GameOutcome::Win(symbol) => Some(symbol),
            GameOutcome::InProgress | GameOutcome::Draw => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_set_on_empty_cell() {
        let mut board = Board::new();
        assert!(board.try_set(Symbol::X, Position::Center).is_ok());
        assert_eq!(board.get(Position::Center), Cell::Occupied(Symbol::X));
    }

    #[test]
    fn test_try_set_twice_keeps_first_mark() {
        let mut board = Board::new();
        board.try_set(Symbol::X, Position::TopLeft).unwrap();
        let after_first = board.snapshot();

        assert_eq!(
            board.try_set(Symbol::O, Position::TopLeft),
            Err(MoveError::CellOccupied(Position::TopLeft))
        );
        assert_eq!(
            board.try_set(Symbol::X, Position::TopLeft),
            Err(MoveError::CellOccupied(Position::TopLeft))
        );
        assert_eq!(board, after_first);
    }

    #[test]
    fn test_reset_empties_board() {
        let mut board = Board::new();
        for pos in Position::ALL {
            board.try_set(Symbol::O, pos).unwrap();
        }
        assert!(board.is_full());

        board.reset();
        assert!(board.is_empty());
        assert!(!board.is_full());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut board = Board::new();
        let mut copy = board.snapshot();
        copy.try_set(Symbol::X, Position::Center).unwrap();
        assert!(board.is_empty());

        board.try_set(Symbol::O, Position::TopLeft).unwrap();
        assert!(copy.is_vacant(Position::TopLeft));
    }

    #[test]
    fn test_get_at_out_of_range() {
        let board = Board::new();
        assert_eq!(board.get_at(1, 1), Ok(Cell::Empty));
        assert!(matches!(
            board.get_at(3, 3),
            Err(MoveError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.try_set(Symbol::X, Position::TopLeft).unwrap();
        board.try_set(Symbol::O, Position::Center).unwrap();
        assert_eq!(board.to_string(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_player_kind_parsing() {
        assert_eq!("human".parse::<PlayerKind>(), Ok(PlayerKind::Human));
        assert_eq!("Computer".parse::<PlayerKind>(), Ok(PlayerKind::Scripted));
        assert_eq!("SCRIPTED".parse::<PlayerKind>(), Ok(PlayerKind::Scripted));
        assert!("robot".parse::<PlayerKind>().is_err());
        assert_eq!(PlayerKind::Scripted.to_string(), "Computer");
    }

    #[test]
    fn test_player_configure() {
        let mut player = Player::new(Symbol::O, "Player O", PlayerKind::Human);
        player.configure(&PlayerSetup::new("HAL", PlayerKind::Scripted));
        assert_eq!(player.name(), "HAL");
        assert_eq!(player.kind(), PlayerKind::Scripted);
        assert_eq!(player.symbol(), Symbol::O);
    }
}
