//! IndexNow notifier.
//!
//! Tells search engines when a content item's public URL was added, updated
//! or removed. The crate owns a rotating verification key, serves it at
//! `{site}/{key}.txt`, classifies status transitions into submissions and
//! POSTs one notification per configured provider, containing every failure
//! so the act of publishing never fails because a provider did.
//!
//! The library is what a host embeds; the `indexnow` binary wraps it in a
//! small HTTP service and a CLI.

pub mod adapters;
pub mod cancel;
pub mod cli;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod key_manager;
pub mod logging;
pub mod models;
pub mod notifier;
pub mod prelude;
pub mod server;
pub mod traits;
pub mod transport;
