//! Canonical URL clean-up before submission.
//!
//! Trashing an item makes the host rename its slug to `{slug}__trashed`
//! (with a `-N` counter on collisions), so the permalink resolved at delete
//! time no longer matches the address providers indexed.

use reqwest::Url;

const TRASH_MARKER: &str = "__trashed";
const TRASH_MARKER_DASHED: &str = "-trashed";

/// Strip the trash marker from the last path segment and restore the
/// trailing slash. URLs without a marker are returned unchanged.
///
/// The dashed form is only recognised when `removed` is set, since a live
/// slug may legitimately end in `-trashed`.
pub fn normalize_trashed_url(url: &str, removed: bool) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => match strip_marker(parsed.path(), removed) {
            Some(path) => {
                parsed.set_path(&path);
                parsed.to_string()
            }
            None => url.to_string(),
        },
        Err(_) => strip_marker(url, removed).unwrap_or_else(|| url.to_string()),
    }
}

fn strip_marker(path: &str, removed: bool) -> Option<String> {
    let trimmed = path.trim_end_matches('/');
    let (parent, segment) = match trimmed.rfind('/') {
        Some(idx) => trimmed.split_at(idx + 1),
        None => ("", trimmed),
    };

    let slug = strip_segment(segment, TRASH_MARKER).or_else(|| {
        removed
            .then(|| strip_segment(segment, TRASH_MARKER_DASHED))
            .flatten()
    })?;

    Some(format!("{}{}/", parent, slug))
}

/// `slug{marker}` or `slug{marker}-N` → `slug`.
fn strip_segment<'a>(segment: &'a str, marker: &str) -> Option<&'a str> {
    let idx = segment.rfind(marker)?;
    let rest = &segment[idx + marker.len()..];
    let counter_only = rest.is_empty()
        || rest
            .strip_prefix('-')
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));

    (idx > 0 && counter_only).then(|| &segment[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_marker_and_restores_slash() {
        assert_eq!(
            normalize_trashed_url("https://example.com/hello-world__trashed/", true),
            "https://example.com/hello-world/"
        );
        assert_eq!(
            normalize_trashed_url("https://example.com/2026/10/hello__trashed", true),
            "https://example.com/2026/10/hello/"
        );
    }

    #[test]
    fn test_strips_collision_counter() {
        assert_eq!(
            normalize_trashed_url("https://example.com/hello__trashed-2/", true),
            "https://example.com/hello/"
        );
    }

    #[test]
    fn test_dashed_marker_only_when_removed() {
        assert_eq!(
            normalize_trashed_url("https://example.com/hello-trashed/", true),
            "https://example.com/hello/"
        );
        assert_eq!(
            normalize_trashed_url("https://example.com/not-trashed/", false),
            "https://example.com/not-trashed/"
        );
    }

    #[test]
    fn test_keeps_query() {
        assert_eq!(
            normalize_trashed_url("https://example.com/shop/item__trashed/?lang=fr", true),
            "https://example.com/shop/item/?lang=fr"
        );
    }

    #[test]
    fn test_unchanged_without_marker() {
        for url in [
            "https://example.com/hello/",
            "https://example.com/?p=123",
            "https://example.com/__trashed/",
            "https://example.com/a__trashedx/",
        ] {
            assert_eq!(normalize_trashed_url(url, true), url);
        }
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(normalize_trashed_url("/hello__trashed", true), "/hello/");
    }
}
