//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let regions = layout::create_layout(frame.area());

    layout::draw_header(frame, regions.header);
    layout::draw_progress(frame, regions.progress, app.state.current_step());
    forms::draw_step_form(frame, regions.content, app);
    layout::draw_status_bar(frame, regions.status, app);

    // Dialogs overlay everything; errors above the confirmation
    if let Some(approval) = &app.state.approval {
        components::render_approval_dialog(frame, approval);
    }
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message);
    }
}
