//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileKeyStore`] - JSON file key storage
//! - [`SystemClock`] - Wall clock
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses, recorded requests
//! - [`mock::InMemoryKeyStore`] - In-memory key storage with failure injection
//! - [`mock::MockClock`] - Manually advanced clock

pub mod file_key_store;
pub mod mock;
pub mod reqwest_http;
pub mod system_clock;

pub use file_key_store::FileKeyStore;
pub use mock::{InMemoryKeyStore, MockClock, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
pub use system_clock::SystemClock;
