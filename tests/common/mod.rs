//! Shared fixtures for integration tests.
//!
//! Notifiers here use the real reqwest adapter against wiremock servers, an
//! in-memory key store and a manual clock.

#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use indexnow::adapters::mock::{InMemoryKeyStore, MockClock};
use indexnow::adapters::ReqwestHttpClient;
use indexnow::config::IndexNowConfig;
use indexnow::models::ContentItem;
use indexnow::notifier::ChangeNotifier;
use wiremock::MockServer;

pub const SITE_URL: &str = "https://example.com";

/// Config for `SITE_URL` with one provider per `(name, base_url)`.
pub fn config_with_providers(providers: &[(&str, String)]) -> IndexNowConfig {
    providers.iter().fold(
        IndexNowConfig::default()
            .without_providers()
            .with_site_url(SITE_URL)
            .with_request_timeout(Duration::from_secs(2)),
        |config, (name, url)| config.with_provider(*name, url.clone()),
    )
}

/// Notifier wired to real HTTP, returning the store so tests can read the key.
pub fn build_notifier(config: &IndexNowConfig) -> (ChangeNotifier, InMemoryKeyStore, MockClock) {
    let store = InMemoryKeyStore::new();
    let clock = MockClock::default();
    let notifier = config
        .build_notifier(
            Arc::new(ReqwestHttpClient::with_timeout(config.request_timeout())),
            Arc::new(store.clone()),
            Arc::new(clock.clone()),
        )
        .expect("valid config");
    (notifier, store, clock)
}

pub async fn start_provider() -> MockServer {
    MockServer::start().await
}

/// Base URL of a port nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

pub fn published_item(id: u64, path: &str) -> ContentItem {
    ContentItem::new(id, format!("{}{}", SITE_URL, path))
}
