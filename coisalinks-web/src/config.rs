//! Frontend configuration module
//!
//! Values are baked in at compile time from the build environment so the
//! static bundle needs no runtime configuration endpoint.

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_PRIVACY_URL: &str = "#";

/// Frontend configuration for backend and external links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    /// Base URL of the shortener REST API
    pub api_base_url: String,
    /// Privacy policy page linked from the footer
    pub privacy_policy_url: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self::from_values(
            option_env!("COISALINKS_API_URL"),
            option_env!("COISALINKS_PRIVACY_URL"),
        )
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    fn from_values(api_url: Option<&str>, privacy_url: Option<&str>) -> Self {
        let api_base_url = api_url
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();
        let privacy_policy_url = privacy_url
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_PRIVACY_URL)
            .to_string();
        Self {
            api_base_url,
            privacy_policy_url,
        }
    }

    /// Get the API base URL, without a trailing slash
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Get the privacy policy URL
    pub fn privacy_policy_url(&self) -> &str {
        &self.privacy_policy_url
    }
}
