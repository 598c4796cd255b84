use serde::{Deserialize, Serialize};

/// JSON body POSTed to a provider's `/indexnow/` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    /// Site root, scheme and domain.
    pub host: String,
    pub key: String,
    /// Where the provider can fetch the key to verify ownership.
    pub key_location: String,
    pub url_list: Vec<String>,
}

impl SubmissionPayload {
    /// Payload for a single changed URL.
    pub fn new(site_url: &str, url: &str, key: &str) -> Self {
        Self::for_urls(site_url, vec![url.to_string()], key)
    }

    pub fn for_urls(site_url: &str, urls: Vec<String>, key: &str) -> Self {
        let host = site_url.trim_end_matches('/').to_string();
        let key_location = format!("{}/{}.txt", host, key);
        Self {
            host,
            key: key.to_string(),
            key_location,
            url_list: urls,
        }
    }
}
