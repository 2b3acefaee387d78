//! Field rendering utilities for forms

use crate::state::{FieldKind, FormField, WizardState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: bordered box plus the inline error line
pub const FIELD_HEIGHT: u16 = 4;

/// Cells used by the slider track
const TRACK_WIDTH: usize = 24;

/// Draw a form field with its inline error below it
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    state: &WizardState,
    is_active: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let error = state.field_error(field.field);
    let border_color = match (is_active, error.is_some()) {
        (true, _) => Color::Cyan,
        (false, true) => Color::Red,
        (false, false) => Color::DarkGray,
    };

    let title = match field.range_hint() {
        Some(hint) => format!(" {} ({hint}) ", field.label()),
        None => format!(" {} ", field.label()),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let line = value_line(field, state, is_active);
    frame.render_widget(Paragraph::new(line).block(block), chunks[0]);

    if let Some(message) = error {
        let error_line = Paragraph::new(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(error_line, chunks[1]);
    }
}

fn value_line(field: &FormField, state: &WizardState, is_active: bool) -> Line<'static> {
    let value = field.display_value(&state.draft, state.category_options());
    let value_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    if field.accepts_text() {
        let mut spans = Vec::new();
        if value.is_empty() && !is_active {
            spans.push(Span::styled(
                placeholder(field),
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::styled(value, value_style));
        }
        if is_active {
            spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
        }
        return Line::from(spans);
    }

    match field.slider_ratio(&state.draft) {
        Some(ratio) => Line::from(vec![
            Span::styled(
                format!("{value:<8}"),
                value_style.add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                slider_track(ratio),
                Style::default().fg(if is_active { Color::Cyan } else { Color::DarkGray }),
            ),
        ]),
        None => Line::from(Span::styled(value, value_style)),
    }
}

fn placeholder(field: &FormField) -> &'static str {
    match field.kind {
        FieldKind::Phone => "0XXX XXX XXX",
        _ => "(пусто)",
    }
}

/// Text slider track with a knob at `ratio` (0.0 to 1.0)
pub fn slider_track(ratio: f64) -> String {
    let knob = (ratio.clamp(0.0, 1.0) * (TRACK_WIDTH - 1) as f64).round() as usize;
    (0..TRACK_WIDTH)
        .map(|i| match i.cmp(&knob) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '─',
        })
        .collect()
}

/// Draw a single line of key hints
pub fn draw_help_text(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(key.to_string(), Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!(": {action}  ")));
    }
    let help = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
