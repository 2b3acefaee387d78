//! Dialog components for TUI

mod approval_dialog;
mod base;
mod error_dialog;

pub use approval_dialog::render_approval_dialog;
pub use error_dialog::render_error_dialog;
