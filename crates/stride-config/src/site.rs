//! Public site settings used when building links.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Front-end base URL (e.g., `https://app.example.com`). Prefixed to task
    /// links when a full URL is requested.
    #[serde(default)]
    pub frontend_url: String,
}

impl SiteConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.frontend_url.is_empty()
    }

    /// Front-end URL without a trailing slash.
    #[must_use]
    pub fn frontend_base(&self) -> &str {
        self.frontend_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = SiteConfig {
            frontend_url: "https://app.example.com/".into(),
        };
        assert!(config.is_configured());
        assert_eq!(config.frontend_base(), "https://app.example.com");
        assert!(!SiteConfig::default().is_configured());
    }
}
