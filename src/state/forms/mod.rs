//! Form domain layer
//!
//! Step forms bind the draft's fields to keyboard editing and track which
//! field or button has focus.

mod field;
mod form_state;

pub use field::{FieldKind, FormField};
pub use form_state::{Form, FormAction, StepForm};
