//! Layout components (header, progress, status bar)

use crate::app::App;
use crate::platform;
use crate::state::Step;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

pub const HEADER_TITLE: &str = "Оформление займа";

/// Screen regions of the wizard
pub struct WizardLayout {
    pub header: Rect,
    pub progress: Rect,
    pub content: Rect,
    pub status: Rect,
}

/// Split the screen into header, progress bar, content and status bar
pub fn create_layout(area: Rect) -> WizardLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(1), // Progress
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    WizardLayout {
        header: chunks[0],
        progress: chunks[1],
        content: chunks[2],
        status: chunks[3],
    }
}

pub fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(
        HEADER_TITLE,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

/// Label of the progress bar, e.g. "Шаг 2 из 3"
pub fn progress_label(step: Step) -> String {
    format!("Шаг {} из {}", step.number(), Step::ALL.len())
}

pub fn draw_progress(frame: &mut Frame, area: Rect, step: Step) {
    let ratio = step.number() as f64 / Step::ALL.len() as f64;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(progress_label(step));
    frame.render_widget(gauge, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.state.current_step().path()),
        Style::default().fg(Color::Blue),
    )];

    let hints = format!(
        "Tab:поле  ←/→:выбор  Enter:далее  Esc:назад  {}:продолжить",
        platform::CONTINUE_SHORTCUT
    );
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = format!(" {}:выход ", platform::QUIT_SHORTCUT);
    let width = quit_hint.chars().count() as u16;
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y,
        width: width.min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}
