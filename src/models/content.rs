use serde::{Deserialize, Serialize};
use std::fmt;

use super::deserialize_id;

/// Publication status of a content item, as reported by the host.
///
/// Unknown statuses are kept verbatim so that a host with custom statuses
/// still classifies as "no submission" rather than failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostStatus {
    Publish,
    Future,
    Draft,
    Pending,
    Private,
    Trash,
    /// Permanently removed by the host.
    Deleted,
    AutoDraft,
    Inherit,
    Other(String),
}

impl PostStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PostStatus::Publish => "publish",
            PostStatus::Future => "future",
            PostStatus::Draft => "draft",
            PostStatus::Pending => "pending",
            PostStatus::Private => "private",
            PostStatus::Trash => "trash",
            PostStatus::Deleted => "deleted",
            PostStatus::AutoDraft => "auto-draft",
            PostStatus::Inherit => "inherit",
            PostStatus::Other(s) => s.as_str(),
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, PostStatus::Publish)
    }

    /// Trashed or deleted.
    pub fn is_removed(&self) -> bool {
        matches!(self, PostStatus::Trash | PostStatus::Deleted)
    }
}

impl From<&str> for PostStatus {
    fn from(s: &str) -> Self {
        match s {
            "publish" => PostStatus::Publish,
            "future" => PostStatus::Future,
            "draft" => PostStatus::Draft,
            "pending" => PostStatus::Pending,
            "private" => PostStatus::Private,
            "trash" => PostStatus::Trash,
            "deleted" => PostStatus::Deleted,
            "auto-draft" => PostStatus::AutoDraft,
            "inherit" => PostStatus::Inherit,
            other => PostStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for PostStatus {
    fn from(s: String) -> Self {
        PostStatus::from(s.as_str())
    }
}

impl From<PostStatus> for String {
    fn from(status: PostStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a submission tells the provider happened to the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionAction {
    Add,
    Update,
    Delete,
}

impl SubmissionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionAction::Add => "add",
            SubmissionAction::Update => "update",
            SubmissionAction::Delete => "delete",
        }
    }
}

impl fmt::Display for SubmissionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content record whose status changed.
///
/// The host resolves the canonical URL and visibility; the notifier only
/// reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: u64,
    /// Content type, e.g. `post` or `page`. Informational.
    #[serde(default)]
    pub post_type: String,
    /// Canonical URL; empty when the host could not resolve one yet.
    #[serde(default)]
    pub permalink: String,
    /// Whether the item is currently visible to anonymous visitors.
    #[serde(default)]
    pub publicly_viewable: bool,
    /// Revisions and autosaves never produce submissions.
    #[serde(default)]
    pub is_revision: bool,
}

impl ContentItem {
    /// A publicly viewable post at `permalink`.
    pub fn new(id: u64, permalink: impl Into<String>) -> Self {
        Self {
            id,
            post_type: "post".to_string(),
            permalink: permalink.into(),
            publicly_viewable: true,
            is_revision: false,
        }
    }

    pub fn with_post_type(mut self, post_type: impl Into<String>) -> Self {
        self.post_type = post_type.into();
        self
    }

    pub fn with_publicly_viewable(mut self, viewable: bool) -> Self {
        self.publicly_viewable = viewable;
        self
    }

    pub fn with_revision(mut self, is_revision: bool) -> Self {
        self.is_revision = is_revision;
        self
    }

    /// The canonical URL, or `None` if the host has not resolved one.
    pub fn canonical_url(&self) -> Option<&str> {
        let url = self.permalink.trim();
        (!url.is_empty()).then_some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_known_and_custom() {
        assert_eq!(PostStatus::from("publish"), PostStatus::Publish);
        assert_eq!(PostStatus::from("auto-draft"), PostStatus::AutoDraft);
        assert_eq!(
            PostStatus::from("wc-archived"),
            PostStatus::Other("wc-archived".to_string())
        );
        assert_eq!(PostStatus::Other("wc-archived".to_string()).as_str(), "wc-archived");
    }

    #[test]
    fn test_status_is_removed() {
        assert!(PostStatus::Trash.is_removed());
        assert!(PostStatus::Deleted.is_removed());
        assert!(!PostStatus::Private.is_removed());
    }

    #[test]
    fn test_content_item_deserializes_string_id() {
        let item: ContentItem = serde_json::from_str(
            r#"{"id":"42","permalink":"https://example.com/hello/","publicly_viewable":true}"#,
        )
        .unwrap();
        assert_eq!(item.id, 42);
        assert_eq!(item.canonical_url(), Some("https://example.com/hello/"));
        assert!(!item.is_revision);
    }

    #[test]
    fn test_canonical_url_empty() {
        let item = ContentItem::new(1, "   ");
        assert_eq!(item.canonical_url(), None);
    }

    #[test]
    fn test_action_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SubmissionAction::Delete).unwrap(),
            "\"delete\""
        );
    }
}
