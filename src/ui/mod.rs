//! UI module for rendering the TUI

mod components;
mod forms;
mod patient;
mod widgets;

use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    match &app.state.current_view {
        View::Patient => patient::draw(frame, chunks[0], app),
        View::EntryCreate => forms::draw_entry_create(frame, chunks[0], app),
    }

    draw_status_bar(frame, chunks[1], app);

    // Error dialog overlays everything until dismissed
    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error);
    }
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(message) = &app.state.status_message {
        Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Green),
        ))
    } else {
        let hints: &[(&str, &str)] = match app.state.current_view {
            View::Patient => &[
                ("a", "add entry"),
                ("j/k", "select"),
                ("r", "reload"),
                ("q", "quit"),
            ],
            View::EntryCreate => &[
                ("Tab", "next field"),
                ("←/→", "change"),
                ("Space", "toggle code"),
                ("Enter", "confirm"),
                ("Esc", "cancel"),
            ],
        };
        let mut spans = Vec::new();
        for (key, label) in hints {
            spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(format!(": {label}  ")));
        }
        Line::from(spans)
    };

    let bar = Paragraph::new(line).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(bar, area);
}
