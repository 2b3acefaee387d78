//! Application state definitions

use super::draft::ApplicationDraft;
use super::forms::StepForm;
use super::remote::{ApplicationRecord, CategoryOption, RemoteState};
use super::steps::{NavigationHistory, Step};
use super::validation::{Field, ValidationReport};
use std::collections::{BTreeMap, VecDeque};

/// Data shown in the confirmation dialog after a successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct Approval {
    pub applicant: String,
    pub amount: i64,
    pub term_days: i64,
    pub record: ApplicationRecord,
}

/// Everything the wizard renders from
#[derive(Debug, Clone)]
pub struct WizardState {
    /// The single draft shared by all steps
    pub draft: ApplicationDraft,
    pub history: NavigationHistory,
    /// Focus state of the step currently shown
    pub form: StepForm,
    /// Inline error per field, from the last validation touching it
    pub field_errors: BTreeMap<Field, &'static str>,
    /// Workplace categories, fetched once per session
    pub categories: RemoteState<Vec<CategoryOption>>,
    pub submission: RemoteState<ApplicationRecord>,
    pub approval: Option<Approval>,
    /// Queue of modal error messages, oldest first
    errors: VecDeque<String>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(ApplicationDraft::default())
    }
}

impl WizardState {
    pub fn new(draft: ApplicationDraft) -> Self {
        Self {
            draft,
            history: NavigationHistory::default(),
            form: StepForm::new(Step::Personal),
            field_errors: BTreeMap::new(),
            categories: RemoteState::Idle,
            submission: RemoteState::Idle,
            approval: None,
            errors: VecDeque::new(),
        }
    }

    pub fn current_step(&self) -> Step {
        self.history.current()
    }

    /// Cached categories, empty until loaded
    pub fn category_options(&self) -> &[CategoryOption] {
        self.categories.data().map_or(&[], Vec::as_slice)
    }

    /// Merge a validation run into the inline errors
    pub fn apply_report(&mut self, report: &ValidationReport) {
        for (field, result) in report.iter() {
            match result.message.filter(|_| !result.valid) {
                Some(message) => {
                    self.field_errors.insert(field, message);
                }
                None => {
                    self.field_errors.remove(&field);
                }
            }
        }
    }

    pub fn field_error(&self, field: Field) -> Option<&'static str> {
        self.field_errors.get(&field).copied()
    }

    pub fn is_submitting(&self) -> bool {
        self.submission.is_loading()
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}
