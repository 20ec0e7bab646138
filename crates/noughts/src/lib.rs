//! Tic-tac-toe game engine.
//!
//! # Architecture
//!
//! - **Board**: the 3x3 grid of [`Cell`]s, addressed by [`Position`]
//! - **Rules**: pure win/draw evaluation over the eight [`Line`]s
//! - **Turns**: [`TurnController`] alternates X and O
//! - **Policy**: [`GreedyPolicy`] picks moves for scripted players
//! - **Engine**: [`GameEngine`] composes the above and notifies subscribers
//! - **Session**: [`GameSession`] schedules deferred scripted moves and
//!   cancels them on reset
//!
//! # Example
//!
//! ```
//! use noughts::{GameOutcome, GameSession, PlayerKind, PlayerSetup, Players};
//!
//! let mut session = GameSession::new(Players::default());
//! session.new_game(
//!     &PlayerSetup::new("Ada", PlayerKind::Human),
//!     &PlayerSetup::new("Computer", PlayerKind::Scripted),
//! );
//!
//! let report = session.human_clicked_cell(1, 1).unwrap();
//! assert_eq!(report.outcome, GameOutcome::InProgress);
//!
//! // The front end waits a moment, then lets the computer reply.
//! let ticket = report.next.unwrap();
//! session.request_scripted_move(ticket).unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod line;
mod observer;
mod policy;
mod position;
mod session;
mod turn;
mod types;

pub mod contracts;
pub mod rules;

pub use engine::GameEngine;
pub use error::{InvalidCoordinate, MoveError};
pub use line::Line;
pub use observer::{ChangeNotifier, SubscriptionId};
pub use policy::{FirstVacantPolicy, GreedyPolicy, MovePolicy, completing_cell, find_completion};
pub use position::Position;
pub use session::{GameSession, MoveReport, PendingMove};
pub use turn::TurnController;
pub use types::{Board, Cell, GameOutcome, Player, PlayerKind, PlayerSetup, Players, Symbol};
