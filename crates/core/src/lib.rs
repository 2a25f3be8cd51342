//! Core utilities shared by the Kopi crates
//!
//! - **Error handling**: errors with codes, context and recovery suggestions
//! - **Resilience**: backoff policy and circuit breaker for upstream calls
//! - **Configuration**: TOML-based configuration with validation
//!
//! # Example
//!
//! ```rust,no_run
//! use kopi_core::config::Config;
//!
//! let config = Config::load(None).expect("valid configuration");
//! println!("showing the top {} cafes", config.schema.ranking.top_n);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod retry;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::retry::{CircuitBreaker, CircuitBreakerConfig, CircuitState, RetryConfig};
}
