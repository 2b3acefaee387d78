//! Remote API client for categories and application submission

mod client;
mod error;
mod retry;
mod traits;

pub use client::LoanApiClient;
pub use error::ApiError;
pub use retry::RetryPolicy;
pub use traits::LoanApiTrait;

#[cfg(test)]
pub use traits::MockLoanApiTrait;
