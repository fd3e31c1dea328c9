use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Configuration of a single fetch-and-store run.
///
/// Field names follow the step configuration surface (`useGoogleToken`), so the
/// same file works as TOML or JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepConfig {
    /// URL to GET. Must answer 200 with a JSON object or array.
    pub url: String,
    /// Attach a bearer token from Google Application Default Credentials.
    #[serde(default)]
    pub use_google_token: bool,
    /// OAuth scopes requested for the token. Only valid with `use_google_token`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    /// Extra request headers, sent verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

impl StepConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Scopes as a slice; empty when none were configured.
    pub fn scopes(&self) -> &[String] {
        self.scopes.as_deref().unwrap_or(&[])
    }

    /// Load from a file. `.json` is parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let cfg = if is_json {
            serde_json::from_str(&data)
                .with_context(|| format!("parse JSON config {}", path.display()))?
        } else {
            toml::from_str(&data)
                .with_context(|| format!("parse TOML config {}", path.display()))?
        };
        tracing::debug!("loaded step config from {}", path.display());
        Ok(cfg)
    }
}
