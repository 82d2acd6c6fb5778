//! Entry create form rendering
//!
//! The diagnosis multi-select is a pure view of the form's field value:
//! it renders the current selection and the cursor, and all changes go
//! through the form itself.

use super::field_renderer::{draw_field, draw_select};
use crate::app::App;
use crate::state::{EntryForm, FieldId};
use crate::ui::components::render_button;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the entry create form
pub fn draw_entry_create(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = &app.state.entry_form else {
        return;
    };

    let block = Block::default()
        .title(" New Entry ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = form.visible_fields();
    let mut constraints: Vec<Constraint> = visible.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (index, id) in visible.iter().enumerate() {
        let is_active = form.active_field_index == index;
        let chunk = chunks[index];
        match id {
            FieldId::Kind => draw_select(frame, chunk, "Type", form.kind.label(), is_active),
            FieldId::HealthCheckRating => draw_select(
                frame,
                chunk,
                form.health_check_rating.label,
                &form.health_check_rating.display_value(),
                is_active,
            ),
            FieldId::DiagnosisCodes => draw_codes(frame, chunk, form, is_active),
            FieldId::Buttons => draw_buttons(frame, chunk, form, is_active),
            _ => {
                if let Some(field) = form.field(*id) {
                    let error = if field.touched { form.error(*id) } else { None };
                    draw_field(frame, chunk, field, is_active, error);
                }
            }
        }
    }
}

/// Diagnosis multi-select. Inactive it shows the current selection;
/// active it shows every offered code with its selection state and the
/// cursor position.
fn draw_codes(frame: &mut Frame, area: Rect, form: &EntryForm, is_active: bool) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = if !is_active {
        let selected = form.diagnosis_codes.display_value();
        if selected.is_empty() {
            Line::from(Span::styled("(none)", Style::default().fg(Color::DarkGray)))
        } else {
            Line::from(selected)
        }
    } else if form.offered_codes.is_empty() {
        Line::from(Span::styled(
            "no diagnosis codes available",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let selected_codes = form.diagnosis_codes.as_codes();
        let mut spans = Vec::new();
        for (i, code) in form.offered_codes.iter().enumerate() {
            let marker = if selected_codes.contains(code) { "[x]" } else { "[ ]" };
            let mut style = if selected_codes.contains(code) {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            if i == form.code_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!("{marker} {code}"), style));
            spans.push(Span::raw("  "));
        }
        Line::from(spans)
    };

    let block = Block::default()
        .title(" Diagnosis codes ")
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_buttons(frame: &mut Frame, area: Rect, form: &EntryForm, is_active: bool) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Min(0),
        ])
        .split(area);

    render_button(
        frame,
        chunks[0],
        "Cancel",
        is_active && form.selected_button == 0,
        true,
    );

    let add_label = if form.is_submitting() { "Adding..." } else { "Add" };
    render_button(
        frame,
        chunks[1],
        add_label,
        is_active && form.selected_button == 1,
        form.can_submit(),
    );
}
