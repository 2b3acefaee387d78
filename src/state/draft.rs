//! The loan application draft edited by the wizard

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Default requested amount, in dollars
pub const DEFAULT_AMOUNT: i64 = 200;
/// Default requested term, in days
pub const DEFAULT_TERM_DAYS: i64 = 10;

/// Applicant gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Мужской",
            Self::Female => "Женский",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a gender string is not one of the known values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Выберите пол")]
pub struct UnknownGender;

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|gender| gender.as_str() == s)
            .ok_or(UnknownGender)
    }
}

/// In-progress application data shared by all wizard steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub work_place: String,
    pub address: String,
    pub amount: i64,
    pub term_days: i64,
}

impl Default for ApplicationDraft {
    fn default() -> Self {
        Self {
            phone: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            gender: Gender::default(),
            work_place: String::new(),
            address: String::new(),
            amount: DEFAULT_AMOUNT,
            term_days: DEFAULT_TERM_DAYS,
        }
    }
}

impl ApplicationDraft {
    /// Rebuild a draft from persisted JSON text.
    ///
    /// Persisted values win over defaults key by key. Keys that are missing,
    /// unknown or hold a value of the wrong type leave the default in place.
    pub fn from_persisted(text: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let mut draft = Self::default();

        let Some(map) = value.as_object() else {
            tracing::warn!("Persisted draft is not a JSON object, using defaults");
            return Ok(draft);
        };

        for (key, value) in map {
            match key.as_str() {
                "phone" => merge_text(&mut draft.phone, value),
                "firstName" => merge_text(&mut draft.first_name, value),
                "lastName" => merge_text(&mut draft.last_name, value),
                "workPlace" => merge_text(&mut draft.work_place, value),
                "address" => merge_text(&mut draft.address, value),
                "gender" => {
                    if let Some(gender) = value.as_str().and_then(|s| s.parse().ok()) {
                        draft.gender = gender;
                    }
                }
                "amount" => merge_number(&mut draft.amount, value),
                "termDays" => merge_number(&mut draft.term_days, value),
                other => tracing::debug!("Ignoring unknown draft key {other}"),
            }
        }

        Ok(draft)
    }

    /// Applicant name as submitted: last name first
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name.trim(), self.first_name.trim())
    }
}

fn merge_text(slot: &mut String, value: &Value) {
    if let Some(s) = value.as_str() {
        *slot = s.to_string();
    }
}

fn merge_number(slot: &mut i64, value: &Value) {
    if let Some(n) = value.as_i64() {
        *slot = n;
    } else if let Some(f) = value.as_f64().filter(|f| f.is_finite()) {
        *slot = f.round() as i64;
    }
}
