//! Patient page: header and entry list

use crate::app::App;
use crate::state::{diagnosis_name, Entry, HealthCheckRating};
use crate::ui::widgets::render_scrollable_list;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(patient) = &app.state.patient else {
        let block = Block::default().title(" Patient ").borders(Borders::ALL);
        let loading = Paragraph::new("Loading patient...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(loading, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let header_lines = vec![
        Line::from(vec![
            Span::styled(
                patient.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(patient.gender.glyph()),
        ]),
        Line::from(format!(
            "born: {}",
            patient
                .date_of_birth
                .map(|d| d.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        )),
        Line::from(format!("occupation: {}", patient.occupation)),
    ];
    let header = Paragraph::new(header_lines)
        .block(Block::default().title(" Patient ").borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let entries_block = Block::default()
        .title(format!(" Entries ({}) ", patient.entries.len()))
        .borders(Borders::ALL);

    if patient.entries.is_empty() {
        let empty = Paragraph::new("No entries. Press 'a' to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(entries_block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = patient
        .entries
        .iter()
        .map(|entry| ListItem::new(entry_lines(entry, app)))
        .collect();

    let list = List::new(items)
        .block(entries_block)
        .highlight_style(Style::default().bg(Color::DarkGray));
    render_scrollable_list(frame, chunks[1], list, app.state.selected_entry);
}

fn entry_lines(entry: &Entry, app: &App) -> Vec<Line<'static>> {
    let mut heading = vec![
        Span::raw(entry.date().to_string()),
        Span::raw("  "),
        Span::styled(entry.type_label(), Style::default().fg(Color::Cyan)),
    ];
    if let Some(employer) = entry.employer_name() {
        heading.push(Span::raw("  "));
        heading.push(Span::styled(
            employer.to_string(),
            Style::default().add_modifier(Modifier::ITALIC),
        ));
    }

    let mut lines = vec![
        Line::from(heading),
        Line::from(Span::styled(
            entry.description().to_string(),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];

    if let Some(rating) = entry.rating() {
        lines.push(Line::from(Span::styled(
            format!("♥ {}", rating.label()),
            Style::default().fg(severity_color(rating)),
        )));
    }

    for code in entry.diagnosis_codes() {
        let name = diagnosis_name(&app.state.diagnoses, code).unwrap_or("");
        lines.push(Line::from(format!("  {code} {name}")));
    }

    lines.push(Line::from(Span::styled(
        format!("diagnose by {}", entry.specialist()),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    lines
}

fn severity_color(rating: HealthCheckRating) -> Color {
    match rating {
        HealthCheckRating::Healthy => Color::Green,
        HealthCheckRating::LowRisk => Color::Yellow,
        HealthCheckRating::HighRisk => Color::LightRed,
        HealthCheckRating::CriticalRisk => Color::Red,
    }
}
