//! New-game form: a name and a kind for each side.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use noughts::{PlayerKind, PlayerSetup, Symbol};
use tracing::{debug, instrument};

/// Longest accepted player name, in characters.
pub const MAX_NAME_LEN: usize = 24;

/// Field with keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetupField {
    /// X player's name.
    #[default]
    XName,
    /// X player's kind.
    XKind,
    /// O player's name.
    OName,
    /// O player's kind.
    OKind,
}

impl SetupField {
    /// Fields in display order.
    pub const ALL: [SetupField; 4] = [
        SetupField::XName,
        SetupField::XKind,
        SetupField::OName,
        SetupField::OKind,
    ];

    /// Side the field belongs to.
    pub fn symbol(self) -> Symbol {
        match self {
            SetupField::XName | SetupField::XKind => Symbol::X,
            SetupField::OName | SetupField::OKind => Symbol::O,
        }
    }

    /// True for the kind selectors.
    pub fn is_kind(self) -> bool {
        matches!(self, SetupField::XKind | SetupField::OKind)
    }

    fn next(self) -> Self {
        match self {
            SetupField::XName => SetupField::XKind,
            SetupField::XKind => SetupField::OName,
            SetupField::OName => SetupField::OKind,
            SetupField::OKind => SetupField::XName,
        }
    }

    fn previous(self) -> Self {
        match self {
            SetupField::XName => SetupField::OKind,
            SetupField::XKind => SetupField::XName,
            SetupField::OName => SetupField::XKind,
            SetupField::OKind => SetupField::OName,
        }
    }
}

/// What a key press on the form asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// Keep editing.
    Editing,
    /// Start a game with these setups.
    Start(PlayerSetup, PlayerSetup),
    /// Leave the application.
    Quit,
}

/// Editable new-game form.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SetupForm {
    x_name: String,
    x_kind: PlayerKind,
    o_name: String,
    o_kind: PlayerKind,
    focus: SetupField,
    error: Option<String>,
}

impl SetupForm {
    /// Creates a form prefilled from two setups.
    pub fn new(x: &PlayerSetup, o: &PlayerSetup) -> Self {
        Self {
            x_name: x.name().clone(),
            x_kind: *x.kind(),
            o_name: o.name().clone(),
            o_kind: *o.kind(),
            focus: SetupField::default(),
            error: None,
        }
    }

    /// Handles one key press.
    #[instrument(skip(self), fields(focus = ?self.focus))]
    pub fn handle_key(&mut self, key: KeyEvent) -> SetupOutcome {
        match key.code {
            KeyCode::Esc => return SetupOutcome::Quit,
            KeyCode::Enter => return self.submit(),
            KeyCode::Up | KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Down | KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if self.focus.is_kind() => {
                if let Some(kind) = self.kind_mut() {
                    *kind = kind.toggle();
                    debug!(kind = %kind, "Kind toggled");
                }
            }
            KeyCode::Backspace => {
                if let Some(name) = self.name_mut() {
                    name.pop();
                }
            }
            KeyCode::Char(c) if !c.is_control() => {
                if let Some(name) = self.name_mut()
                    && name.chars().count() < MAX_NAME_LEN
                {
                    name.push(c);
                }
            }
            _ => {}
        }
        SetupOutcome::Editing
    }

    fn submit(&mut self) -> SetupOutcome {
        let x_name = self.x_name.trim();
        let o_name = self.o_name.trim();
        if x_name.is_empty() || o_name.is_empty() {
            self.error = Some("Both players need a name".to_string());
            return SetupOutcome::Editing;
        }
        self.error = None;
        SetupOutcome::Start(
            PlayerSetup::new(x_name, self.x_kind),
            PlayerSetup::new(o_name, self.o_kind),
        )
    }

    fn name_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            SetupField::XName => Some(&mut self.x_name),
            SetupField::OName => Some(&mut self.o_name),
            SetupField::XKind | SetupField::OKind => None,
        }
    }

    fn kind_mut(&mut self) -> Option<&mut PlayerKind> {
        match self.focus {
            SetupField::XKind => Some(&mut self.x_kind),
            SetupField::OKind => Some(&mut self.o_kind),
            SetupField::XName | SetupField::OName => None,
        }
    }
}
