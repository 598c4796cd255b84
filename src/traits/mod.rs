//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP POST used for provider submissions
//! - [`KeyStore`] - Verification key persistence
//! - [`Clock`] - Current time, for rotation decisions

pub mod clock;
pub mod http;
pub mod key_store;

pub use clock::Clock;
pub use http::{Headers, HttpClient, HttpError, Response};
pub use key_store::KeyStore;
