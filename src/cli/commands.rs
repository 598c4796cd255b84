//! `serve`, `key` and `submit`.

use color_eyre::eyre::eyre;
use color_eyre::{Report, Result};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::adapters::{FileKeyStore, ReqwestHttpClient, SystemClock};
use crate::cancel::CancelSignal;
use crate::config::IndexNowConfig;
use crate::error::{ConfigError, IndexNowError};
use crate::models::SubmissionAction;
use crate::notifier::ChangeNotifier;
use crate::server::start_server_on;

/// Operator-facing report: the error followed by a recovery hint.
pub fn report(err: impl Into<IndexNowError>) -> Report {
    eyre!(err.into().user_message())
}

/// Notifier backed by reqwest, the key file and the system clock.
pub fn build_notifier(config: &IndexNowConfig, cancel: CancelSignal) -> Result<ChangeNotifier> {
    let http = ReqwestHttpClient::with_timeout(config.request_timeout());
    let store = FileKeyStore::new(config.resolved_key_store_path().map_err(report)?);

    let notifier = config
        .build_notifier(Arc::new(http), Arc::new(store), Arc::new(SystemClock))
        .map_err(report)?
        .with_cancel_signal(cancel);
    Ok(notifier)
}

/// Serve until Ctrl-C. In-flight submissions are cancelled on shutdown.
pub async fn handle_serve_command(config: &IndexNowConfig) -> Result<()> {
    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .map_err(|_| {
            report(ConfigError::InvalidValue {
                key: "bind_addr".to_string(),
                value: config.bind_addr.clone(),
            })
        })?;

    let (shutdown, signal) = CancelSignal::pair();
    let notifier = Arc::new(build_notifier(config, signal.clone())?);

    if !notifier.is_enabled() {
        tracing::warn!("Notifier is disabled or the site is not public; submissions are off");
    }

    let (handle, local_addr) = start_server_on(addr, Arc::clone(&notifier), signal)
        .await
        .map_err(report)?;
    tracing::info!(
        providers = notifier.providers().len(),
        site = notifier.site_url(),
        "Serving verification key on http://{}",
        local_addr
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    shutdown.cancel();
    handle.await?;
    Ok(())
}

/// Print the active key and where it is served, rotating it first if due.
pub async fn handle_key_command(config: &IndexNowConfig) -> Result<()> {
    let notifier = build_notifier(config, CancelSignal::never())?;
    let keys = notifier.key_manager();
    keys.rotate_if_expired(chrono::Utc::now()).await.map_err(report)?;
    let key = keys.get_active_key().await.map_err(report)?;

    println!("{}", key.value());
    println!(
        "{}/{}",
        config.site_url.trim_end_matches('/'),
        key.file_name()
    );
    Ok(())
}

/// Submit one URL and print the outcomes as JSON.
pub async fn handle_submit_command(
    config: &IndexNowConfig,
    url: &str,
    action: SubmissionAction,
) -> Result<()> {
    let notifier = build_notifier(config, CancelSignal::never())?;
    let outcomes = notifier.submit_url(url, action).await;
    println!("{}", serde_json::to_string_pretty(&outcomes)?);
    Ok(())
}
