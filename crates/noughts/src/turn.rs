//! Turn sequencing.

use crate::Symbol;
use tracing::{debug, instrument};

/// Tracks which side is to move.
///
/// The controller is unset until a game starts. It has no terminal state:
/// it keeps alternating for as long as moves are accepted, and the engine
/// stops accepting them once the board shows an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnController {
    active: Option<Symbol>,
}

impl TurnController {
    /// Side that moves first after every reset.
    pub const FIRST: Symbol = Symbol::X;

    /// Creates an unset controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// The side to move, if a game has started.
    pub fn active(&self) -> Option<Symbol> {
        self.active
    }

    /// Unconditionally makes `symbol` the side to move.
    #[instrument(skip(self))]
    pub fn set_active(&mut self, symbol: Symbol) {
        self.active = Some(symbol);
    }

    /// Puts [`TurnController::FIRST`] on move.
    pub fn start(&mut self) {
        self.set_active(Self::FIRST);
    }

    /// Hands the move to the other side. Does nothing while unset.
    #[instrument(skip(self))]
    pub fn toggle(&mut self) {
        self.active = self.active.map(Symbol::opponent);
        debug!(active = ?self.active, "Turn toggled");
    }
}
