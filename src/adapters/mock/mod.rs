//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`InMemoryKeyStore`] - In-memory key storage
//! - [`MockClock`] - Manually advanced clock

pub mod clock;
pub mod http;
pub mod key_store;

pub use clock::MockClock;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use key_store::InMemoryKeyStore;
