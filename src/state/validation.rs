//! Field validation rules for the application draft
//!
//! Every field has an ordered list of rules; the first failing rule decides
//! the message shown under the field.

use super::draft::ApplicationDraft;
use super::steps::Step;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

pub const MIN_AMOUNT: i64 = 200;
pub const MAX_AMOUNT: i64 = 1000;
pub const MIN_TERM_DAYS: i64 = 10;
pub const MAX_TERM_DAYS: i64 = 30;

const NAME_MIN_LEN: usize = 2;
const NAME_MAX_LEN: usize = 50;
const ADDRESS_MIN_LEN: usize = 5;
const ADDRESS_MAX_LEN: usize = 200;

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[0-9]{3} [0-9]{3} [0-9]{3}$").expect("valid phone pattern"));

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[а-яёА-ЯЁa-zA-Z\s-]+$").expect("valid name pattern"));

/// A named field of the application draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Phone,
    FirstName,
    LastName,
    Gender,
    WorkPlace,
    Address,
    Amount,
    TermDays,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Phone,
        Field::FirstName,
        Field::LastName,
        Field::Gender,
        Field::WorkPlace,
        Field::Address,
        Field::Amount,
        Field::TermDays,
    ];

    /// Key used for this field in the persisted draft
    pub fn name(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Gender => "gender",
            Self::WorkPlace => "workPlace",
            Self::Address => "address",
            Self::Amount => "amount",
            Self::TermDays => "termDays",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Phone => "Телефон",
            Self::FirstName => "Имя",
            Self::LastName => "Фамилия",
            Self::Gender => "Пол",
            Self::WorkPlace => "Место работы",
            Self::Address => "Адрес проживания",
            Self::Amount => "Сумма займа",
            Self::TermDays => "Срок займа",
        }
    }

    /// The wizard step whose group contains this field
    pub fn step(&self) -> Step {
        match self {
            Self::Phone | Self::FirstName | Self::LastName | Self::Gender => Step::Personal,
            Self::WorkPlace | Self::Address => Step::Address,
            Self::Amount | Self::TermDays => Step::Loan,
        }
    }
}

/// Outcome of validating a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<&'static str>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: &'static str) -> Self {
        Self {
            valid: false,
            message: Some(message),
        }
    }
}

impl From<Result<(), &'static str>> for ValidationResult {
    fn from(result: Result<(), &'static str>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(message) => Self::fail(message),
        }
    }
}

/// Per-field results for one validation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    results: BTreeMap<Field, ValidationResult>,
}

impl ValidationReport {
    /// True when every validated field passed
    pub fn is_valid(&self) -> bool {
        self.results.values().all(|r| r.valid)
    }

    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.results.get(&field).and_then(|r| r.message)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &ValidationResult)> {
        self.results.iter().map(|(f, r)| (*f, r))
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.results
            .iter()
            .filter(|(_, r)| !r.valid)
            .map(|(f, _)| *f)
    }

    fn insert(&mut self, field: Field, result: ValidationResult) {
        self.results.insert(field, result);
    }
}

struct TextMessages {
    required: &'static str,
    too_short: &'static str,
    too_long: &'static str,
    charset: Option<&'static str>,
}

const FIRST_NAME_MESSAGES: TextMessages = TextMessages {
    required: "Имя обязательно",
    too_short: "Имя должно содержать минимум 2 символа",
    too_long: "Имя не должно превышать 50 символов",
    charset: Some("Имя может содержать только буквы, пробелы и дефисы"),
};

const LAST_NAME_MESSAGES: TextMessages = TextMessages {
    required: "Фамилия обязательна",
    too_short: "Фамилия должна содержать минимум 2 символа",
    too_long: "Фамилия не должна превышать 50 символов",
    charset: Some("Фамилия может содержать только буквы, пробелы и дефисы"),
};

const ADDRESS_MESSAGES: TextMessages = TextMessages {
    required: "Адрес обязателен",
    too_short: "Адрес должен содержать минимум 5 символов",
    too_long: "Адрес не должен превышать 200 символов",
    charset: None,
};

fn check_phone(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err("Телефон обязателен");
    }
    if !PHONE_PATTERN.is_match(value) {
        return Err("Формат: 0XXX XXX XXX");
    }
    Ok(())
}

fn check_text(
    value: &str,
    min: usize,
    max: usize,
    messages: &TextMessages,
) -> Result<(), &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(messages.required);
    }

    let len = value.chars().count();
    if len < min {
        return Err(messages.too_short);
    }
    if len > max {
        return Err(messages.too_long);
    }

    if let Some(charset) = messages.charset {
        if !NAME_PATTERN.is_match(value) {
            return Err(charset);
        }
    }
    Ok(())
}

fn check_range(
    value: i64,
    min: i64,
    max: i64,
    below: &'static str,
    above: &'static str,
) -> Result<(), &'static str> {
    if value < min {
        Err(below)
    } else if value > max {
        Err(above)
    } else {
        Ok(())
    }
}

/// Validate a single field of the draft
pub fn validate_field(draft: &ApplicationDraft, field: Field) -> ValidationResult {
    let result = match field {
        Field::Phone => check_phone(&draft.phone),
        Field::FirstName => check_text(
            &draft.first_name,
            NAME_MIN_LEN,
            NAME_MAX_LEN,
            &FIRST_NAME_MESSAGES,
        ),
        Field::LastName => check_text(
            &draft.last_name,
            NAME_MIN_LEN,
            NAME_MAX_LEN,
            &LAST_NAME_MESSAGES,
        ),
        // The type only admits known values
        Field::Gender => Ok(()),
        Field::WorkPlace => {
            if draft.work_place.trim().is_empty() {
                Err("Выберите место работы")
            } else {
                Ok(())
            }
        }
        Field::Address => check_text(
            &draft.address,
            ADDRESS_MIN_LEN,
            ADDRESS_MAX_LEN,
            &ADDRESS_MESSAGES,
        ),
        Field::Amount => check_range(
            draft.amount,
            MIN_AMOUNT,
            MAX_AMOUNT,
            "Минимальная сумма: $200",
            "Максимальная сумма: $1000",
        ),
        Field::TermDays => check_range(
            draft.term_days,
            MIN_TERM_DAYS,
            MAX_TERM_DAYS,
            "Минимальный срок: 10 дней",
            "Максимальный срок: 30 дней",
        ),
    };
    result.into()
}

/// Validate a subset of fields (usually one step's group)
pub fn validate(draft: &ApplicationDraft, fields: &[Field]) -> ValidationReport {
    let mut report = ValidationReport::default();
    for &field in fields {
        report.insert(field, validate_field(draft, field));
    }
    report
}

/// Validate every field of the draft
pub fn validate_all(draft: &ApplicationDraft) -> ValidationReport {
    validate(draft, &Field::ALL)
}

/// Trim the stored value of text fields that are validated trimmed
pub fn normalize_field(draft: &mut ApplicationDraft, field: Field) {
    let slot = match field {
        Field::FirstName => &mut draft.first_name,
        Field::LastName => &mut draft.last_name,
        Field::WorkPlace => &mut draft.work_place,
        Field::Address => &mut draft.address,
        _ => return,
    };

    let trimmed = slot.trim();
    if trimmed.len() != slot.len() {
        *slot = trimmed.to_string();
    }
}

/// Trim every field in `fields`
pub fn normalize(draft: &mut ApplicationDraft, fields: &[Field]) {
    for &field in fields {
        normalize_field(draft, field);
    }
}
