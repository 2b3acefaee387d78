//! Wizard step form: fields on the left, action buttons on the right

use super::field_renderer::{draw_field, draw_help_text, FIELD_HEIGHT};
use crate::app::App;
use crate::platform;
use crate::state::{FormAction, Step, WizardState};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub const CATEGORIES_LOADING: &str = "Загрузка категорий...";
pub const CATEGORIES_FAILED: &str = "Ошибка загрузки категорий. Попробуйте обновить страницу.";
pub const SUBMITTING_LABEL: &str = "Отправка...";

/// Draw the form of the current step with its action panel
pub fn draw_step_form(frame: &mut Frame, area: Rect, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(22), // Action panel
        ])
        .split(area);

    draw_fields(frame, main_chunks[0], &app.state);
    draw_action_panel(frame, main_chunks[1], &app.state);
}

fn draw_fields(frame: &mut Frame, area: Rect, state: &WizardState) {
    let form = &state.form;
    let form_focused = !form.is_buttons_row_active();
    let border_color = if form_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(format!(" {} ", form.step.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = form
        .fields
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(2)); // Notice
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1)); // Help text

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    for (idx, field) in form.fields.iter().enumerate() {
        draw_field(
            frame,
            chunks[idx],
            field,
            state,
            form.active_field_index == idx,
        );
    }

    if let Some((text, color)) = step_notice(state) {
        let notice = Paragraph::new(Span::styled(text, Style::default().fg(color)))
            .wrap(Wrap { trim: true });
        frame.render_widget(notice, chunks[form.fields.len()]);
    }

    let help_area = chunks[chunks.len() - 1];
    let mut hints = vec![("Tab", "поле"), ("←/→", "выбор"), ("Enter", "далее")];
    if form.step.prev().is_some() {
        hints.push(("Esc", "назад"));
    }
    hints.push((platform::CONTINUE_SHORTCUT, "продолжить"));
    draw_help_text(frame, help_area, &hints);
}

/// Status line under the fields, if the step has one
fn step_notice(state: &WizardState) -> Option<(String, Color)> {
    match state.current_step() {
        Step::Address if state.categories.is_loading() => {
            Some((CATEGORIES_LOADING.to_string(), Color::Yellow))
        }
        Step::Address => state
            .categories
            .error()
            .map(|_| (CATEGORIES_FAILED.to_string(), Color::Red)),
        Step::Loan => state.submission.error().map(|message| {
            (
                format!("Ошибка при отправке заявки: {message}"),
                Color::Red,
            )
        }),
        Step::Personal => None,
    }
}

fn draw_action_panel(frame: &mut Frame, area: Rect, state: &WizardState) {
    let form = &state.form;
    let is_focused = form.is_buttons_row_active();
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Действия ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let actions = form.actions();
    let mut constraints: Vec<Constraint> = actions
        .iter()
        .map(|_| Constraint::Length(BUTTON_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));
    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner_area);

    // Primary action first
    for (slot, (idx, action)) in actions.iter().enumerate().rev().enumerate() {
        let submitting = *action == FormAction::Submit && state.is_submitting();
        let label = if submitting {
            SUBMITTING_LABEL
        } else {
            action.label()
        };
        let accent = match action {
            FormAction::Back => Color::Gray,
            FormAction::Next | FormAction::Submit => Color::Green,
        };
        render_button(
            frame,
            button_chunks[slot],
            label,
            is_focused && form.selected_button == idx,
            !submitting,
            Some(accent),
        );
    }
}
