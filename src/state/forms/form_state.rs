//! Focus state of the active step form

use super::field::FormField;
use crate::state::steps::Step;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Button in a step's action panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Back,
    Next,
    Submit,
}

impl FormAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Back => "Назад",
            Self::Next => "Далее",
            Self::Submit => "Подать заявку",
        }
    }
}

/// Fields of one wizard step plus a trailing row of buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepForm {
    pub step: Step,
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
    /// Index into `actions()` when the buttons row is active
    pub selected_button: usize,
}

impl StepForm {
    pub fn new(step: Step) -> Self {
        let fields = step
            .fields()
            .iter()
            .copied()
            .map(FormField::for_field)
            .collect();
        let actions = Self::actions_for(step);
        Self {
            step,
            fields,
            active_field_index: 0,
            // Primary action is last
            selected_button: actions.len() - 1,
        }
    }

    fn actions_for(step: Step) -> &'static [FormAction] {
        match step {
            Step::Personal => &[FormAction::Next],
            Step::Address => &[FormAction::Back, FormAction::Next],
            Step::Loan => &[FormAction::Back, FormAction::Submit],
        }
    }

    pub fn actions(&self) -> &'static [FormAction] {
        Self::actions_for(self.step)
    }

    /// The action triggered by Enter inside a field
    pub fn primary_action(&self) -> FormAction {
        match self.step {
            Step::Loan => FormAction::Submit,
            _ => FormAction::Next,
        }
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == self.fields.len()
    }

    pub fn active_form_field(&self) -> Option<FormField> {
        self.fields.get(self.active_field_index).copied()
    }

    pub fn selected_action(&self) -> Option<FormAction> {
        if self.is_buttons_row_active() {
            self.actions().get(self.selected_button).copied()
        } else {
            None
        }
    }

    /// Move to the next button (wraps around)
    pub fn next_button(&mut self) {
        let count = self.actions().len();
        self.selected_button = (self.selected_button + 1) % count;
    }

    /// Move to the previous button (wraps around)
    pub fn prev_button(&mut self) {
        let count = self.actions().len();
        if self.selected_button == 0 {
            self.selected_button = count - 1;
        } else {
            self.selected_button -= 1;
        }
    }

    /// Focus `field` if it belongs to this form
    pub fn focus_field(&mut self, field: crate::state::Field) {
        if let Some(index) = self.fields.iter().position(|f| f.field == field) {
            self.active_field_index = index;
        }
    }
}

impl Form for StepForm {
    fn field_count(&self) -> usize {
        self.fields.len() + 1 // fields + buttons row
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len());
    }
}
