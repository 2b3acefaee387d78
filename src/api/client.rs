//! HTTP client for the loan application API
//!
//! `LoanApiClient` adds base URL handling, retries and response mapping on
//! top of an `HttpTransport`; `ReqwestTransport` is the real transport.

use super::error::ApiError;
use super::retry::RetryPolicy;
use super::traits::{HttpTransport, LoanApiTrait};
use crate::state::{ApplicationRecord, CategoryOption};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

/// Time limit for each read attempt
pub const READ_TIMEOUT: Duration = Duration::from_secs(10);
/// Time limit for each write attempt
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(15);

const CATEGORIES_PATH: &str = "/products/categories";
const SUBMIT_PATH: &str = "/products/add";

/// Transport backed by `reqwest`
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("loan-wizard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        timeout: Duration,
    ) -> Result<Value, ApiError> {
        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(timeout)
            } else {
                ApiError::Decode(e.to_string())
            }
        })
    }
}

fn map_reqwest_error(err: reqwest::Error, timeout: Duration) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout(timeout)
    } else {
        ApiError::Network(err.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_json(&self, url: &str, timeout: Duration) -> Result<Value, ApiError> {
        self.send(self.client.get(url), timeout).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: Value,
        timeout: Duration,
    ) -> Result<Value, ApiError> {
        self.send(self.client.post(url).json(&body), timeout).await
    }
}

/// Client for the application API
pub struct LoanApiClient<T = ReqwestTransport> {
    transport: T,
    base_url: Option<String>,
    policy: RetryPolicy,
}

impl LoanApiClient<ReqwestTransport> {
    /// Create a client using the real HTTP transport
    pub fn new(base_url: Option<String>, policy: RetryPolicy) -> Result<Self, ApiError> {
        Ok(Self::with_transport(ReqwestTransport::new()?, base_url, policy))
    }
}

impl<T: HttpTransport> LoanApiClient<T> {
    pub fn with_transport(transport: T, base_url: Option<String>, policy: RetryPolicy) -> Self {
        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
        Self {
            transport,
            base_url,
            policy,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn url(&self, path: &str) -> Result<String, ApiError> {
        self.base_url
            .as_deref()
            .map(|base| format!("{base}{path}"))
            .ok_or(ApiError::NotConfigured)
    }

    /// Fetch the workplace categories, retrying transient failures
    pub async fn fetch_categories(&self) -> Result<Vec<CategoryOption>, ApiError> {
        let url = self.url(CATEGORIES_PATH)?;
        let url = url.as_str();
        let transport = &self.transport;

        let body = self
            .policy
            .run("fetch categories", move |attempt| {
                tracing::debug!("GET {url} (attempt {attempt})");
                transport.get_json(url, READ_TIMEOUT)
            })
            .await
            .map_err(|e| ApiError::CategoriesUnavailable {
                attempts: e.attempts,
                last: Box::new(e.last),
            })?;

        Ok(parse_categories(&body))
    }

    /// Submit an application titled with the applicant's name
    pub async fn submit_application(&self, title: &str) -> Result<ApplicationRecord, ApiError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ApiError::TitleRequired);
        }

        let url = self.url(SUBMIT_PATH)?;
        let url = url.as_str();
        let transport = &self.transport;
        let body = json!({ "title": title });

        let reply = self
            .policy
            .run("submit application", move |attempt| {
                tracing::debug!("POST {url} (attempt {attempt})");
                let body = body.clone();
                async move { transport.post_json(url, body, WRITE_TIMEOUT).await }
            })
            .await
            .map_err(|e| ApiError::SubmissionFailed {
                attempts: e.attempts,
                last: Box::new(e.last),
            })?;

        // The server already accepted the application; never POST it again
        let record = serde_json::from_value::<ApplicationRecord>(reply).map_err(|e| {
            tracing::warn!("Accepted application came back in an unexpected shape: {e}");
            ApiError::Decode(e.to_string())
        })?;

        tracing::info!("Application submitted as record {}", record.id);
        Ok(record)
    }
}

#[async_trait]
impl<T: HttpTransport> LoanApiTrait for LoanApiClient<T> {
    async fn fetch_categories(&self) -> Result<Vec<CategoryOption>, ApiError> {
        LoanApiClient::fetch_categories(self).await
    }

    async fn submit_application(&self, title: &str) -> Result<ApplicationRecord, ApiError> {
        LoanApiClient::submit_application(self, title).await
    }
}

/// Map a category list response onto options.
///
/// Strings become `{value: s, label: s}`; objects use `slug` and `name`,
/// each falling back to the other. Any other shape yields no options.
fn parse_categories(body: &Value) -> Vec<CategoryOption> {
    let Some(items) = body.as_array() else {
        tracing::warn!("Unexpected category list shape, showing no categories");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(CategoryOption::new(s.as_str(), s.as_str())),
            Value::Object(map) => {
                let slug = map.get("slug").and_then(Value::as_str);
                let name = map.get("name").and_then(Value::as_str);
                Some(CategoryOption::new(
                    slug.or(name).unwrap_or_default(),
                    name.or(slug).unwrap_or_default(),
                ))
            }
            other => {
                tracing::warn!("Skipping malformed category entry {other}");
                None
            }
        })
        .collect()
}
