//! API error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the application API
#[derive(Debug, Error)]
pub enum ApiError {
    /// No API base location configured; fatal for every network call
    #[error("адрес API не настроен (LOAN_WIZARD_API_URL)")]
    NotConfigured,

    /// Title for a submission was empty or blank
    #[error("Название продукта обязательно")]
    TitleRequired,

    /// The server answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// An attempt did not finish within its time limit
    #[error("превышено время ожидания ответа ({}s)", .0.as_secs())]
    Timeout(Duration),

    /// Connection-level failure
    #[error("сетевая ошибка: {0}")]
    Network(String),

    /// Response body could not be decoded
    #[error("некорректный ответ сервера: {0}")]
    Decode(String),

    #[error("Не удалось загрузить категории после {attempts} попыток")]
    CategoriesUnavailable {
        attempts: u32,
        #[source]
        last: Box<ApiError>,
    },

    #[error("Ошибка при отправке заявки после {attempts} попыток")]
    SubmissionFailed {
        attempts: u32,
        #[source]
        last: Box<ApiError>,
    },
}

impl ApiError {
    /// Transient failures worth another attempt.
    ///
    /// `Decode` is excluded: the server already answered 2xx, so repeating
    /// a write would duplicate it.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Http { .. } | ApiError::Timeout(_) | ApiError::Network(_)
        )
    }

    /// Number of attempts made, for errors raised after retrying
    pub fn attempts(&self) -> Option<u32> {
        match self {
            ApiError::CategoriesUnavailable { attempts, .. }
            | ApiError::SubmissionFailed { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }

    /// The last underlying failure, for errors raised after retrying
    pub fn last_cause(&self) -> Option<&ApiError> {
        match self {
            ApiError::CategoriesUnavailable { last, .. }
            | ApiError::SubmissionFailed { last, .. } => Some(last),
            _ => None,
        }
    }

    /// Message for display, including the last cause when there is one
    pub fn user_message(&self) -> String {
        match self.last_cause() {
            Some(cause) => format!("{self} ({cause})"),
            None => self.to_string(),
        }
    }
}
