//! Trait abstractions for the API client to enable mocking in tests

use super::error::ApiError;
use crate::state::{ApplicationRecord, CategoryOption};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// A single HTTP exchange returning a JSON body
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET `url` and decode the body as JSON
    async fn get_json(&self, url: &str, timeout: Duration) -> Result<Value, ApiError>;

    /// POST `body` as JSON to `url` and decode the reply as JSON
    async fn post_json(&self, url: &str, body: Value, timeout: Duration)
        -> Result<Value, ApiError>;
}

/// Operations the wizard needs from the remote API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanApiTrait: Send + Sync {
    /// Workplace categories for the address step
    async fn fetch_categories(&self) -> Result<Vec<CategoryOption>, ApiError>;

    /// Submit the application under `title`
    async fn submit_application(&self, title: &str) -> Result<ApplicationRecord, ApiError>;
}
