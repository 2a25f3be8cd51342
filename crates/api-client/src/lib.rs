//! HTTP client for the Kopi backend
//!
//! This crate provides a resilient HTTP client for the two upstream
//! endpoints the recommendation view needs, and normalises their loosely
//! shaped payloads into fixed records.
//!
//! # Features
//!
//! - **Environment-based configuration**: Load the base URL, token and timeout from environment variables
//! - **Retry with exponential backoff**: Automatic retry for transient failures
//! - **Circuit breaker**: Prevent cascading failures during outages
//! - **Request correlation**: Track requests with unique IDs for debugging
//! - **Field normalisation**: One place that knows every upstream spelling of a field
//!
//! # Example
//!
//! ```rust,no_run
//! use kopi_api_client::KopiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = KopiClient::new()?;
//!
//!     let records = client.recommendations().list("user-42").await?;
//!     for record in &records {
//!         let detail = client.cafes().get(&record.cafe_id).await?;
//!         println!("{} has {} facilities", record.name, detail.facilities.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod normalize;

pub use client::KopiClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult};
pub use normalize::{CafeDetail, RecommendationRecord};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::KopiClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{CafesApi, RecommendationsApi};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::normalize::{CafeDetail, RecommendationRecord};
}
