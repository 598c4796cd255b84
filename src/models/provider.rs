use reqwest::Url;

use crate::error::ConfigError;

/// A search-engine endpoint that accepts IndexNow submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    name: String,
    base_url: Url,
}

impl Provider {
    /// Validate and build a provider.
    ///
    /// `base_url` must be an absolute http(s) URL with a host.
    pub fn new(name: impl Into<String>, base_url: &str) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::InvalidProviderName(name));
        }

        let invalid = |reason: String| ConfigError::InvalidProviderUrl {
            name: name.clone(),
            url: base_url.to_string(),
            reason,
        };

        let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host".to_string()));
        }

        Ok(Self {
            name,
            base_url: url,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base_url}/indexnow/`
    pub fn submission_url(&self) -> String {
        format!("{}/indexnow/", self.base_url.as_str().trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_url() {
        let p = Provider::new("indexnow", "https://api.indexnow.org").unwrap();
        assert_eq!(p.submission_url(), "https://api.indexnow.org/indexnow/");

        let p = Provider::new("local", "http://127.0.0.1:8081/").unwrap();
        assert_eq!(p.submission_url(), "http://127.0.0.1:8081/indexnow/");
    }

    #[test]
    fn test_rejects_relative_url() {
        let err = Provider::new("bing", "www.bing.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidProviderUrl { .. }));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = Provider::new("ftp", "ftp://example.com").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_rejects_empty_name() {
        assert_eq!(
            Provider::new(" ", "https://example.com").unwrap_err(),
            ConfigError::InvalidProviderName(" ".to_string())
        );
    }
}
