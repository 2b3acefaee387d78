//! Form rendering module
//!
//! - `field_renderer`: one field with its inline error
//! - `step_form`: the active wizard step with its action panel

mod field_renderer;
mod step_form;

pub use step_form::draw_step_form;

#[cfg(test)]
pub use step_form::{CATEGORIES_FAILED, CATEGORIES_LOADING, SUBMITTING_LABEL};
