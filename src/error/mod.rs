//! Unified error handling for the notifier.
//!
//! - **Error Categories**: where to look when something fails
//! - **Domain Errors**: network, key storage and configuration errors
//! - **Unified Error Type**: `IndexNowError` for everything that can fail
//! - **Error Context**: operation, content id and timestamp for log lines
//!
//! # Containment
//!
//! A failure to notify a provider must never fail the act of publishing.
//! Network failures are therefore never returned as `Err`; they are folded
//! into a [`SubmissionOutcome`](crate::models::SubmissionOutcome). Storage
//! failures abort only the current notification cycle and are logged with
//! their [`ErrorContext`].
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, DNS, timeout | Yes |
//! | Server | Provider 5xx | Yes |
//! | Client | Provider 4xx | No |
//! | System | Key store I/O | Sometimes |
//! | Configuration | Config issues | No |

mod category;
mod config;
mod context;
mod indexnow_error;
mod network;
mod result;
mod storage;

pub use category::ErrorCategory;
pub use config::ConfigError;
pub use context::ErrorContext;
pub use indexnow_error::IndexNowError;
pub use network::NetworkError;
pub use result::{IndexNowResult, ResultExt};
pub use storage::StorageError;
