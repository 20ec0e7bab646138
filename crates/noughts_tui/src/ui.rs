//! Stateless rendering for the three views.

use crate::app::{App, View};
use crate::setup::{SetupField, SetupForm};
use noughts::{Cell, Line, MovePolicy, Position, Symbol};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{self, Span},
    widgets::{Block, Borders, Paragraph},
};

const TITLE: &str = "Noughts - Tic Tac Toe";

/// Renders whichever view the app is on.
pub fn draw<P: MovePolicy>(frame: &mut Frame, app: &App<P>) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(13),   // Body
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new(TITLE)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let help = match app.view() {
        View::Setup(form) => {
            draw_setup(frame, chunks[1], form);
            "↑↓: Field | Type: Name | ←→/Space: Kind | Enter: Start | Esc: Quit"
        }
        View::Game => {
            draw_board(frame, chunks[1], app);
            "Arrows/1-9: Cell | Enter/Space: Play | r: Reset | n: New game | q: Quit"
        }
        View::End => {
            draw_board(frame, chunks[1], app);
            "r: Play again | n/Enter: New game | q: Quit"
        }
    };

    // The end screen's headline takes over the status box.
    let status = if *app.view() == View::End {
        Paragraph::new(app.end_message())
            .style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL).title("Game over"))
    } else {
        Paragraph::new(app.status().as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL))
    };
    frame.render_widget(status.alignment(Alignment::Center), chunks[2]);

    let help = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn draw_setup(frame: &mut Frame, area: Rect, form: &SetupForm) {
    let form_area = center_rect(area, 44, 10);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(form_area);

    for (field, row) in SetupField::ALL.into_iter().zip(rows.iter()) {
        let (label, value) = match field {
            SetupField::XName => ("X name", form.x_name().clone()),
            SetupField::XKind => ("X kind", form.x_kind().to_string()),
            SetupField::OName => ("O name", form.o_name().clone()),
            SetupField::OKind => ("O kind", form.o_kind().to_string()),
        };
        let focused = *form.focus() == field;
        let value = if focused && !field.is_kind() {
            format!("{}_", value)
        } else if field.is_kind() {
            format!("< {} >", value)
        } else {
            value
        };
        let value_style = if focused {
            Style::default().bg(Color::White).fg(Color::Black)
        } else {
            Style::default().fg(symbol_color(field.symbol()))
        };

        let line = text::Line::from(vec![
            Span::styled(format!("{:<8}", label), Style::default().fg(Color::Gray)),
            Span::styled(value, value_style),
        ]);
        frame.render_widget(Paragraph::new(line), *row);
    }

    if let Some(error) = form.error() {
        let error = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(error, rows[4]);
    }
}

fn draw_board<P: MovePolicy>(frame: &mut Frame, area: Rect, app: &App<P>) {
    let board_area = center_rect(area, 38, 13);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Players
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    let players = text::Line::from(vec![
        Span::styled(app.label(Symbol::X), Style::default().fg(symbol_color(Symbol::X))),
        Span::raw("  vs  "),
        Span::styled(app.label(Symbol::O), Style::default().fg(symbol_color(Symbol::O))),
    ]);
    frame.render_widget(
        Paragraph::new(players).alignment(Alignment::Center),
        rows[0],
    );

    let highlight = app.winning_line();
    for row in 0..3 {
        draw_row(frame, rows[2 + row * 2], app, row, highlight);
        if row < 2 {
            draw_separator(frame, rows[3 + row * 2]);
        }
    }
}

fn draw_row<P: MovePolicy>(
    frame: &mut Frame,
    area: Rect,
    app: &App<P>,
    row: usize,
    highlight: Option<Line>,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for col in 0..3 {
        let pos = Position::ALL[row * 3 + col];
        let winning = highlight.is_some_and(|line| line.contains(pos));
        draw_cell(frame, cols[col * 2], app, pos, winning);
        if col < 2 {
            draw_separator_vertical(frame, cols[col * 2 + 1]);
        }
    }
}

fn draw_cell<P: MovePolicy>(frame: &mut Frame, area: Rect, app: &App<P>, pos: Position, winning: bool) {
    let (mark, base_style) = match app.session().engine().board().get(pos) {
        Cell::Empty => ("   ", Style::default().fg(Color::DarkGray)),
        Cell::Occupied(symbol) => (
            match symbol {
                Symbol::X => " X ",
                Symbol::O => " O ",
            },
            Style::default()
                .fg(symbol_color(symbol))
                .add_modifier(Modifier::BOLD),
        ),
    };

    let style = if winning {
        base_style.bg(Color::Green).fg(Color::Black)
    } else if pos == *app.cursor() && *app.view() == View::Game {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let cell = Paragraph::new(vec![
        text::Line::default(),
        text::Line::from(Span::styled(mark, style)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(cell, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![text::Line::from("│"); area.height as usize])
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn symbol_color(symbol: Symbol) -> Color {
    match symbol {
        Symbol::X => Color::Blue,
        Symbol::O => Color::Red,
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Length(area.height.saturating_sub(height) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Length(area.width.saturating_sub(width) / 2),
        ])
        .split(vert[1])[1]
}
