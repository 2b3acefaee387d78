//! Wizard steps, routes and the navigation guard

use super::draft::ApplicationDraft;
use super::validation::{self, Field, ValidationReport};

/// Path of the wizard root; redirects to the first step
pub const ROOT_PATH: &str = "/";

/// One page of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Step {
    #[default]
    Personal,
    Address,
    Loan,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Personal, Step::Address, Step::Loan];

    /// 1-based position shown in the progress bar
    pub fn number(&self) -> usize {
        match self {
            Self::Personal => 1,
            Self::Address => 2,
            Self::Loan => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Personal => "Личная информация",
            Self::Address => "Адрес и место работы",
            Self::Loan => "Параметры займа",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Personal => "/step/personal",
            Self::Address => "/step/address",
            Self::Loan => "/step/loan",
        }
    }

    /// Resolve a path; the root and unknown paths land on the first step
    pub fn from_path(path: &str) -> Self {
        let path = path.trim();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        Self::ALL
            .into_iter()
            .find(|step| step.path() == path)
            .unwrap_or_default()
    }

    /// Fields validated together on this step
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::Personal => &[Field::Phone, Field::FirstName, Field::LastName, Field::Gender],
            Self::Address => &[Field::WorkPlace, Field::Address],
            Self::Loan => &[Field::Amount, Field::TermDays],
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Personal => Some(Self::Address),
            Self::Address => Some(Self::Loan),
            Self::Loan => None,
        }
    }

    pub fn prev(&self) -> Option<Self> {
        match self {
            Self::Personal => None,
            Self::Address => Some(Self::Personal),
            Self::Loan => Some(Self::Address),
        }
    }

    /// Steps whose groups must be valid before this one can be shown
    pub fn prerequisites(&self) -> &'static [Step] {
        match self {
            Self::Personal => &[],
            Self::Address => &[Step::Personal],
            Self::Loan => &[Step::Personal, Step::Address],
        }
    }
}

/// Decision of the guard for a requested step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Every preceding group is valid
    Allowed,
    /// A preceding group failed; show `to` instead, with the failing report
    Redirect { to: Step, report: ValidationReport },
}

/// Check that every group before `target` is valid.
///
/// Groups are checked in wizard order so the redirect points at the
/// earliest step holding invalid data.
pub fn guard(target: Step, draft: &ApplicationDraft) -> GuardOutcome {
    for &step in target.prerequisites() {
        let report = validation::validate(draft, step.fields());
        if !report.is_valid() {
            return GuardOutcome::Redirect { to: step, report };
        }
    }
    GuardOutcome::Allowed
}

/// How a navigation affects the history stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavMode {
    Push,
    Replace,
}

/// Stack of visited steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHistory {
    entries: Vec<Step>,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self {
            entries: vec![Step::Personal],
        }
    }
}

impl NavigationHistory {
    pub fn current(&self) -> Step {
        self.entries.last().copied().unwrap_or_default()
    }

    pub fn push(&mut self, step: Step) {
        self.entries.push(step);
    }

    /// Swap the current entry without growing the stack
    pub fn replace(&mut self, step: Step) {
        match self.entries.last_mut() {
            Some(last) => *last = step,
            None => self.entries.push(step),
        }
    }

    pub fn apply(&mut self, step: Step, mode: NavMode) {
        match mode {
            NavMode::Push => self.push(step),
            NavMode::Replace => self.replace(step),
        }
    }

    /// Drop the current entry, returning the step underneath
    pub fn back(&mut self) -> Option<Step> {
        if self.entries.len() > 1 {
            self.entries.pop();
            Some(self.current())
        } else {
            None
        }
    }

    pub fn entries(&self) -> &[Step] {
        &self.entries
    }
}
