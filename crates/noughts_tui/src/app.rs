//! Application state and logic.
//!
//! [`App`] sits between the terminal and a [`GameSession`]: key presses
//! become session intents, and the two front-end timers (the scripted-move
//! delay and the end-screen delay) are kept here as deadlines that the run
//! loop checks with [`App::tick`].

use crate::config::GameConfig;
use crate::input::{digit_position, move_cursor};
use crate::setup::{SetupForm, SetupOutcome};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_getters::Getters;
use noughts::{
    GameOutcome, GameSession, GreedyPolicy, Line, MoveError, MovePolicy, MoveReport, PendingMove,
    PlayerSetup, Players, Position, Symbol, rules,
};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Which screen is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// New-game form.
    Setup(SetupForm),
    /// Board and status line.
    Game,
    /// Result screen.
    End,
}

/// What the run loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Keep running.
    Continue,
    /// Restore the terminal and exit.
    Quit,
}

/// Main application state.
#[derive(Debug, Getters)]
pub struct App<P = GreedyPolicy> {
    session: GameSession<P>,
    view: View,
    cursor: Position,
    status: String,
    #[getter(skip)]
    setups: (PlayerSetup, PlayerSetup),
    #[getter(skip)]
    scripted_move_delay: Duration,
    #[getter(skip)]
    end_screen_delay: Duration,
    #[getter(skip)]
    scripted_timer: Option<(PendingMove, Instant)>,
    #[getter(skip)]
    end_timer: Option<Instant>,
    #[getter(skip)]
    dirty: Rc<Cell<bool>>,
}

impl App<GreedyPolicy> {
    /// Creates the application with the greedy policy.
    pub fn new(config: &GameConfig) -> Self {
        Self::with_policy(config, GreedyPolicy::new())
    }
}

impl<P: MovePolicy> App<P> {
    /// Creates the application on the setup form, prefilled from `config`.
    #[instrument(skip(config, policy))]
    pub fn with_policy(config: &GameConfig, policy: P) -> Self {
        let setups = (config.player_x().clone(), config.player_o().clone());
        let mut session = GameSession::with_policy(Players::new(&setups.0, &setups.1), policy);

        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        session.subscribe(move || flag.set(true));

        info!(
            scripted_move_delay_ms = *config.scripted_move_delay_ms(),
            end_screen_delay_ms = *config.end_screen_delay_ms(),
            "App created"
        );

        Self {
            session,
            view: View::Setup(SetupForm::new(&setups.0, &setups.1)),
            cursor: Position::Center,
            status: "Set up a new game".to_string(),
            setups,
            scripted_move_delay: config.scripted_move_delay(),
            end_screen_delay: config.end_screen_delay(),
            scripted_timer: None,
            end_timer: None,
            dirty,
        }
    }

    /// Returns true once after any state change that needs a redraw.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    /// Forces a redraw on the next loop iteration.
    pub fn request_redraw(&self) {
        self.dirty.set(true);
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        let scripted = self.scripted_timer.map(|(_, due)| due);
        match (scripted, self.end_timer) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// True while a scripted move is waiting on its delay.
    pub fn scripted_move_pending(&self) -> bool {
        self.scripted_timer.is_some()
    }

    /// The winning line on the current board, for highlighting.
    pub fn winning_line(&self) -> Option<Line> {
        rules::winning_line(self.session.engine().board()).map(|(line, _)| line)
    }

    /// Headline for the end screen.
    pub fn end_message(&self) -> String {
        match self.session.engine().outcome() {
            GameOutcome::Win(_) => {
                let name = self
                    .session
                    .engine()
                    .winner()
                    .map(|p| p.name().as_str())
                    .unwrap_or("Nobody");
                format!("Winner: {}", name)
            }
            GameOutcome::Draw => "Winner: Nobody (draw)".to_string(),
            GameOutcome::InProgress => "Game in progress".to_string(),
        }
    }

    /// Handles one key press.
    #[instrument(skip(self, now), fields(code = ?key.code))]
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> AppAction {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            info!("Interrupted");
            return AppAction::Quit;
        }

        let action = match &mut self.view {
            View::Setup(form) => match form.handle_key(key) {
                SetupOutcome::Editing => AppAction::Continue,
                SetupOutcome::Quit => AppAction::Quit,
                SetupOutcome::Start(x, o) => {
                    self.start_game(x, o, now);
                    AppAction::Continue
                }
            },
            View::Game => self.handle_game_key(key.code, now),
            View::End => self.handle_end_key(key.code, now),
        };
        self.dirty.set(true);
        action
    }

    fn handle_game_key(&mut self, code: KeyCode, now: Instant) -> AppAction {
        match code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char('r') => self.reset(now),
            KeyCode::Char('n') | KeyCode::Esc => self.open_setup(),
            KeyCode::Enter | KeyCode::Char(' ') => self.play(self.cursor, now),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(pos) = digit_position(c) {
                    self.cursor = pos;
                    self.play(pos, now);
                }
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, code);
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_end_key(&mut self, code: KeyCode, now: Instant) -> AppAction {
        match code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char('r') => self.reset(now),
            KeyCode::Char('n') | KeyCode::Esc | KeyCode::Enter => self.open_setup(),
            _ => {}
        }
        AppAction::Continue
    }

    /// Fires every timer that is due at `now`.
    #[instrument(skip(self, now))]
    pub fn tick(&mut self, now: Instant) {
        while let Some((ticket, due)) = self.scripted_timer
            && due <= now
        {
            self.scripted_timer = None;
            match self.session.request_scripted_move(ticket) {
                Ok(report) => self.after_move(report, now),
                Err(MoveError::StaleMove(generation)) => {
                    debug!(generation, "Ignoring stale scripted move");
                }
                Err(e) => {
                    warn!(error = %e, "Scripted move failed");
                    self.status = e.to_string();
                }
            }
            self.dirty.set(true);
        }

        if let Some(due) = self.end_timer
            && due <= now
        {
            self.end_timer = None;
            self.view = View::End;
            info!(message = %self.end_message(), "Showing end screen");
            self.dirty.set(true);
        }
    }

    #[instrument(skip(self, now))]
    fn start_game(&mut self, x: PlayerSetup, o: PlayerSetup, now: Instant) {
        self.cancel_timers();
        let next = self.session.new_game(&x, &o);
        self.setups = (x, o);
        self.enter_game(next, now);
    }

    #[instrument(skip(self, now))]
    fn reset(&mut self, now: Instant) {
        self.cancel_timers();
        let next = self.session.reset_board();
        self.enter_game(next, now);
    }

    fn enter_game(&mut self, next: Option<PendingMove>, now: Instant) {
        self.view = View::Game;
        self.cursor = Position::Center;
        self.schedule(next, now);
        self.status = self.turn_prompt();
    }

    fn open_setup(&mut self) {
        self.cancel_timers();
        self.view = View::Setup(SetupForm::new(&self.setups.0, &self.setups.1));
        self.status = "Set up a new game".to_string();
    }

    fn play(&mut self, pos: Position, now: Instant) {
        match self.session.human_move(pos) {
            Ok(report) => self.after_move(report, now),
            Err(e) => {
                debug!(error = %e, %pos, "Move ignored");
                self.status = e.to_string();
            }
        }
    }

    fn after_move(&mut self, report: MoveReport, now: Instant) {
        debug!(position = %report.position, outcome = ?report.outcome, "Move reported");
        if report.outcome.is_terminal() {
            self.end_timer = Some(now + self.end_screen_delay);
            self.status = self.end_message();
        } else {
            self.schedule(report.next, now);
            self.status = self.turn_prompt();
        }
    }

    fn schedule(&mut self, next: Option<PendingMove>, now: Instant) {
        if let Some(ticket) = next {
            self.scripted_timer = Some((ticket, now + self.scripted_move_delay));
        }
    }

    fn cancel_timers(&mut self) {
        if self.scripted_timer.take().is_some() {
            debug!("Scripted move timer cancelled");
        }
        if self.end_timer.take().is_some() {
            debug!("End screen timer cancelled");
        }
    }

    fn turn_prompt(&self) -> String {
        match self.session.engine().active_player() {
            Some(player) if player.is_scripted() => {
                format!("{} ({}) is thinking...", player.name(), player.symbol())
            }
            Some(player) => format!("{}'s turn ({})", player.name(), player.symbol()),
            None => "Waiting for a new game".to_string(),
        }
    }

    /// Mark shown for `symbol`'s player, with its name.
    pub fn label(&self, symbol: Symbol) -> String {
        let player = self.session.engine().player(symbol);
        format!("{} ({}, {})", player.name(), symbol, player.kind())
    }
}
