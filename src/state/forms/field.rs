//! Form field descriptors and editing of draft values

use crate::state::draft::ApplicationDraft;
use crate::state::phone::format_phone;
use crate::state::remote::CategoryOption;
use crate::state::validation::{
    Field, MAX_AMOUNT, MAX_TERM_DAYS, MIN_AMOUNT, MIN_TERM_DAYS,
};

/// Placeholder shown for an unselected workplace
pub const CHOOSE_PLACEHOLDER: &str = "Выберите...";

/// Amount slider granularity, in dollars
pub const AMOUNT_STEP: i64 = 100;
/// Term slider granularity, in days
pub const TERM_STEP: i64 = 1;

/// How a field is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text
    Text,
    /// Digits, re-masked after every keystroke
    Phone,
    /// One of a list of options, cycled with the arrow keys
    Choice,
    /// Bounded number adjusted in fixed steps
    Slider { min: i64, max: i64, step: i64 },
}

/// Represents a single form field bound to a draft value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub field: Field,
    pub kind: FieldKind,
}

impl FormField {
    pub fn for_field(field: Field) -> Self {
        let kind = match field {
            Field::Phone => FieldKind::Phone,
            Field::FirstName | Field::LastName | Field::Address => FieldKind::Text,
            Field::Gender | Field::WorkPlace => FieldKind::Choice,
            Field::Amount => FieldKind::Slider {
                min: MIN_AMOUNT,
                max: MAX_AMOUNT,
                step: AMOUNT_STEP,
            },
            Field::TermDays => FieldKind::Slider {
                min: MIN_TERM_DAYS,
                max: MAX_TERM_DAYS,
                step: TERM_STEP,
            },
        };
        Self { field, kind }
    }

    pub fn label(&self) -> &'static str {
        self.field.label()
    }

    /// Whether typed characters go into this field
    pub fn accepts_text(&self) -> bool {
        matches!(self.kind, FieldKind::Text | FieldKind::Phone)
    }

    /// Append a typed character. Returns true if the draft changed.
    pub fn push_char(&self, draft: &mut ApplicationDraft, c: char) -> bool {
        match self.kind {
            FieldKind::Phone => {
                let formatted = format_phone(&format!("{}{c}", draft.phone));
                replace_if_changed(&mut draft.phone, formatted)
            }
            FieldKind::Text => match text_slot(draft, self.field) {
                Some(slot) => {
                    slot.push(c);
                    true
                }
                None => false,
            },
            FieldKind::Choice | FieldKind::Slider { .. } => false,
        }
    }

    /// Remove the last character. Returns true if the draft changed.
    pub fn pop_char(&self, draft: &mut ApplicationDraft) -> bool {
        match self.kind {
            FieldKind::Phone => {
                let mut raw = draft.phone.clone();
                raw.pop();
                replace_if_changed(&mut draft.phone, format_phone(&raw))
            }
            FieldKind::Text => text_slot(draft, self.field).is_some_and(|s| s.pop().is_some()),
            FieldKind::Choice | FieldKind::Slider { .. } => false,
        }
    }

    /// Move a choice or slider one position. Returns true if the draft changed.
    pub fn step_value(
        &self,
        draft: &mut ApplicationDraft,
        forward: bool,
        categories: &[CategoryOption],
    ) -> bool {
        match (self.kind, self.field) {
            (FieldKind::Slider { min, max, step }, field) => {
                let slot = match field {
                    Field::Amount => &mut draft.amount,
                    _ => &mut draft.term_days,
                };
                let current = (*slot).clamp(min, max);
                let next = if forward { current + step } else { current - step };
                let next = next.clamp(min, max);
                let changed = next != *slot;
                *slot = next;
                changed
            }
            (FieldKind::Choice, Field::Gender) => {
                draft.gender = draft.gender.toggle();
                true
            }
            (FieldKind::Choice, Field::WorkPlace) => {
                if categories.is_empty() {
                    return false;
                }
                // Index 0 is the empty "choose" entry
                let count = categories.len() + 1;
                let current = categories
                    .iter()
                    .position(|c| c.value == draft.work_place)
                    .map_or(0, |i| i + 1);
                let next = if forward {
                    (current + 1) % count
                } else {
                    (current + count - 1) % count
                };
                let value = match next {
                    0 => String::new(),
                    i => categories[i - 1].value.clone(),
                };
                replace_if_changed(&mut draft.work_place, value)
            }
            _ => false,
        }
    }

    /// Text shown for the field's current value
    pub fn display_value(&self, draft: &ApplicationDraft, categories: &[CategoryOption]) -> String {
        match self.field {
            Field::Phone => draft.phone.clone(),
            Field::FirstName => draft.first_name.clone(),
            Field::LastName => draft.last_name.clone(),
            Field::Address => draft.address.clone(),
            Field::Gender => format!("◂ {} ▸", draft.gender.label()),
            Field::WorkPlace => {
                let label = if draft.work_place.is_empty() {
                    CHOOSE_PLACEHOLDER
                } else {
                    categories
                        .iter()
                        .find(|c| c.value == draft.work_place)
                        .map_or(draft.work_place.as_str(), |c| c.label.as_str())
                };
                format!("◂ {label} ▸")
            }
            Field::Amount => format!("${}", draft.amount),
            Field::TermDays => format!("{} дней", draft.term_days),
        }
    }

    /// Range shown next to slider labels
    pub fn range_hint(&self) -> Option<String> {
        match (self.kind, self.field) {
            (FieldKind::Slider { min, max, .. }, Field::Amount) => {
                Some(format!("${min} — ${max}"))
            }
            (FieldKind::Slider { min, max, .. }, _) => Some(format!("{min} — {max} дней")),
            _ => None,
        }
    }

    /// Position of a slider within its range, between 0.0 and 1.0
    pub fn slider_ratio(&self, draft: &ApplicationDraft) -> Option<f64> {
        let FieldKind::Slider { min, max, .. } = self.kind else {
            return None;
        };
        let value = match self.field {
            Field::Amount => draft.amount,
            _ => draft.term_days,
        };
        let span = (max - min).max(1) as f64;
        Some(((value.clamp(min, max) - min) as f64 / span).clamp(0.0, 1.0))
    }
}

fn text_slot(draft: &mut ApplicationDraft, field: Field) -> Option<&mut String> {
    match field {
        Field::FirstName => Some(&mut draft.first_name),
        Field::LastName => Some(&mut draft.last_name),
        Field::Address => Some(&mut draft.address),
        _ => None,
    }
}

fn replace_if_changed(slot: &mut String, value: String) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::draft::Gender;

    fn categories() -> Vec<CategoryOption> {
        vec![
            CategoryOption::new("electronics", "Electronics"),
            CategoryOption::new("clothing", "Clothing"),
        ]
    }

    #[test]
    fn test_phone_is_masked_while_typing() {
        let field = FormField::for_field(Field::Phone);
        let mut draft = ApplicationDraft::default();
        for c in "0123456789".chars() {
            field.push_char(&mut draft, c);
        }
        assert_eq!(draft.phone, "0123 456 789");

        // Eleventh digit is dropped
        assert!(!field.push_char(&mut draft, '5'));
        assert!(!field.push_char(&mut draft, 'x'));
        assert_eq!(draft.phone, "0123 456 789");
    }

    #[test]
    fn test_phone_backspace_reformats() {
        let field = FormField::for_field(Field::Phone);
        let mut draft = ApplicationDraft {
            phone: "0123 4".to_string(),
            ..Default::default()
        };
        assert!(field.pop_char(&mut draft));
        assert_eq!(draft.phone, "0123");
        assert!(field.pop_char(&mut draft));
        assert_eq!(draft.phone, "012");
    }

    #[test]
    fn test_text_editing() {
        let field = FormField::for_field(Field::FirstName);
        let mut draft = ApplicationDraft::default();
        assert!(field.push_char(&mut draft, 'И'));
        assert!(field.push_char(&mut draft, 'в'));
        assert_eq!(draft.first_name, "Ив");
        assert!(field.pop_char(&mut draft));
        assert!(field.pop_char(&mut draft));
        assert!(!field.pop_char(&mut draft));
    }

    #[test]
    fn test_choice_and_slider_ignore_typing() {
        let mut draft = ApplicationDraft::default();
        assert!(!FormField::for_field(Field::Gender).push_char(&mut draft, 'f'));
        assert!(!FormField::for_field(Field::Amount).push_char(&mut draft, '9'));
        assert!(!FormField::for_field(Field::Amount).accepts_text());
        assert_eq!(draft, ApplicationDraft::default());
    }

    #[test]
    fn test_amount_slider_steps_and_clamps() {
        let field = FormField::for_field(Field::Amount);
        let mut draft = ApplicationDraft::default();

        assert!(field.step_value(&mut draft, true, &[]));
        assert_eq!(draft.amount, 300);

        draft.amount = MAX_AMOUNT;
        assert!(!field.step_value(&mut draft, true, &[]));
        assert_eq!(draft.amount, MAX_AMOUNT);

        draft.amount = 150;
        assert!(field.step_value(&mut draft, false, &[]));
        assert_eq!(draft.amount, MIN_AMOUNT);
    }

    #[test]
    fn test_term_slider() {
        let field = FormField::for_field(Field::TermDays);
        let mut draft = ApplicationDraft::default();
        assert!(!field.step_value(&mut draft, false, &[]));
        assert!(field.step_value(&mut draft, true, &[]));
        assert_eq!(draft.term_days, 11);
        assert_eq!(field.range_hint().as_deref(), Some("10 — 30 дней"));
        assert_eq!(field.slider_ratio(&draft), Some(0.05));
    }

    #[test]
    fn test_gender_toggles() {
        let field = FormField::for_field(Field::Gender);
        let mut draft = ApplicationDraft::default();
        field.step_value(&mut draft, true, &[]);
        assert_eq!(draft.gender, Gender::Female);
        assert_eq!(field.display_value(&draft, &[]), "◂ Женский ▸");
    }

    #[test]
    fn test_work_place_cycles_through_categories() {
        let field = FormField::for_field(Field::WorkPlace);
        let options = categories();
        let mut draft = ApplicationDraft::default();

        assert_eq!(field.display_value(&draft, &options), "◂ Выберите... ▸");

        field.step_value(&mut draft, true, &options);
        assert_eq!(draft.work_place, "electronics");
        assert_eq!(field.display_value(&draft, &options), "◂ Electronics ▸");

        field.step_value(&mut draft, true, &options);
        field.step_value(&mut draft, true, &options);
        assert_eq!(draft.work_place, "");

        field.step_value(&mut draft, false, &options);
        assert_eq!(draft.work_place, "clothing");
    }

    #[test]
    fn test_work_place_without_categories_is_fixed() {
        let field = FormField::for_field(Field::WorkPlace);
        let mut draft = ApplicationDraft::default();
        assert!(!field.step_value(&mut draft, true, &[]));
    }

    #[test]
    fn test_unknown_work_place_shows_raw_value() {
        let field = FormField::for_field(Field::WorkPlace);
        let draft = ApplicationDraft {
            work_place: "IT".to_string(),
            ..Default::default()
        };
        assert_eq!(field.display_value(&draft, &categories()), "◂ IT ▸");
    }
}
