//! Prelude module for convenient imports.
//!
//! ```ignore
//! use indexnow::prelude::*;
//! ```
//!
//! Brings in the notifier and its collaborators, the model types a host
//! passes in and gets back, and the error types.

pub use crate::cancel::{CancelHandle, CancelSignal};
pub use crate::config::IndexNowConfig;
pub use crate::key_manager::{KeyManager, VerificationResponse};
pub use crate::notifier::ChangeNotifier;
pub use crate::transport::Transport;

pub use crate::models::{
    ContentItem, OutcomeStatus, PostStatus, Provider, SubmissionAction, SubmissionOutcome,
    VerificationKey,
};

pub use crate::error::{ErrorContext, IndexNowError, IndexNowResult, ResultExt};

pub use crate::traits::{Clock, HttpClient, KeyStore};
