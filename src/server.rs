//! HTTP surface: the key file and a transition hook.
//!
//! - `GET {site_path}/{key}.txt` answers with the key as `text/plain`.
//! - `POST /hooks/transition` lets the host forward a status change and
//!   returns the outcomes as JSON.
//!
//! Every other request is a 404.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::cancel::CancelSignal;
use crate::error::{IndexNowError, IndexNowResult};
use crate::models::{ContentItem, PostStatus, SubmissionOutcome};
use crate::notifier::ChangeNotifier;

/// Path of the transition hook.
pub const TRANSITION_HOOK_PATH: &str = "/hooks/transition";

const X_ROBOTS_TAG: HeaderName = HeaderName::from_static("x-robots-tag");

/// Body of `POST /hooks/transition`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub old_status: PostStatus,
    pub new_status: PostStatus,
    pub item: ContentItem,
}

#[derive(Clone)]
struct ServerState {
    notifier: Arc<ChangeNotifier>,
}

/// Build the router without binding it.
pub fn router(notifier: Arc<ChangeNotifier>) -> Router {
    Router::new()
        .route(TRANSITION_HOOK_PATH, post(transition_handler))
        .fallback(verification_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(ServerState { notifier })
}

/// Bind `addr` and serve until `shutdown` fires.
///
/// Returns the server task and the bound address, which differs from `addr`
/// when binding port 0.
pub async fn start_server_on(
    addr: SocketAddr,
    notifier: Arc<ChangeNotifier>,
    shutdown: CancelSignal,
) -> IndexNowResult<(JoinHandle<()>, SocketAddr)> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| IndexNowError::Io {
            operation: format!("bind {}", addr),
            message: e.to_string(),
        })?;
    let local_addr = listener.local_addr().map_err(|e| IndexNowError::Io {
        operation: "read local address".to_string(),
        message: e.to_string(),
    })?;

    tracing::info!("Verification server listening on http://{}", local_addr);

    let app = router(notifier);
    let handle = tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await;
        if let Err(e) = result {
            tracing::error!("Verification server error: {}", e);
        }
    });

    Ok((handle, local_addr))
}

async fn transition_handler(
    State(state): State<ServerState>,
    Json(request): Json<TransitionRequest>,
) -> Json<Vec<SubmissionOutcome>> {
    let outcomes = state
        .notifier
        .on_status_transition(&request.old_status, &request.new_status, &request.item)
        .await;
    Json(outcomes)
}

async fn verification_handler(
    State(state): State<ServerState>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::NOT_FOUND.into_response();
    }

    match state.notifier.verification(uri.path()).await {
        Some(verification) => (
            [
                (header::CONTENT_TYPE, verification.content_type),
                (X_ROBOTS_TAG, verification.robots_tag),
            ],
            verification.body,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
