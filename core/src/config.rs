//! Client configuration.

use std::fmt;

use crate::client::DEFAULT_BASE_URL;
use crate::error::{OdpError, Result};

pub const API_KEY_VAR: &str = "USPTO_API_KEY";
pub const BASE_URL_VAR: &str = "USPTO_ODP_BASE_URL";

/// Credentials and endpoint for an ODP client.
#[derive(Clone, PartialEq, Eq)]
pub struct OdpConfig {
    pub api_key: String,
    pub base_url: String,
}

impl fmt::Debug for OdpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdpConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OdpConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read `USPTO_API_KEY` (required) and `USPTO_ODP_BASE_URL` (optional).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(OdpError::MissingApiKey)?;
        let base_url = lookup(BASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self { api_key, base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn api_key_is_required() {
        let err = OdpConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, OdpError::MissingApiKey));

        let err = OdpConfig::from_lookup(lookup(&[(API_KEY_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, OdpError::MissingApiKey));
    }

    #[test]
    fn base_url_defaults_to_production() {
        let config = OdpConfig::from_lookup(lookup(&[(API_KEY_VAR, "secret")])).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_can_be_overridden() {
        let config = OdpConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (BASE_URL_VAR, "http://127.0.0.1:3000"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
    }

    #[test]
    fn debug_redacts_key() {
        let rendered = format!("{:?}", OdpConfig::new("secret"));
        assert!(!rendered.contains("secret"));
    }
}
