//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result};

/// Rendering defaults; command line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Base URL overriding the definition's (SIGNPOST_BASE_URL).
    pub base_url: Option<String>,

    /// Force plain http for url links (SIGNPOST_NO_SSL).
    pub no_ssl: Option<bool>,

    /// URL of the page being rendered (SIGNPOST_CURRENT_URL).
    pub current_url: Option<String>,

    /// Abilities granted to the viewer (comma-separated SIGNPOST_PERMISSIONS).
    /// `*` grants everything.
    pub permissions: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup("SIGNPOST_BASE_URL").filter(|v| !v.is_empty());

        let no_ssl = lookup("SIGNPOST_NO_SSL")
            .map(|v| v.trim().to_lowercase().parse::<bool>())
            .transpose()
            .context("SIGNPOST_NO_SSL must be true or false")?;

        let current_url = lookup("SIGNPOST_CURRENT_URL").filter(|v| !v.is_empty());

        let permissions = lookup("SIGNPOST_PERMISSIONS")
            .map(|v| split_list(&v))
            .unwrap_or_default();

        Ok(Self {
            base_url,
            no_ssl,
            current_url,
            permissions,
        })
    }
}

/// Split a comma-separated list, dropping empty entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
