//! Rules for combinations of step config fields.
//!
//! Checked before any network activity; the first failing rule is reported.

use thiserror::Error;

use crate::config::StepConfig;

/// Header name that the Google token would overwrite. Matched case-sensitively.
pub const AUTHORIZATION: &str = "Authorization";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Parameter `scopes` can only be used when `useGoogleToken` is true")]
    ScopesWithoutGoogleToken,
    #[error(
        "Cannot use `useGoogleToken` when custom `Authorization` header is provided in `headers`"
    )]
    AuthorizationConflict,
    #[error(
        "Header `{}` has an invalid name or value (no CR, LF or `:` in names, no CR or LF in values)",
        name.escape_debug()
    )]
    InvalidHeader { name: String },
}

/// Check the config without touching it.
pub fn validate(cfg: &StepConfig) -> Result<(), ConfigError> {
    if !cfg.scopes().is_empty() && !cfg.use_google_token {
        return Err(ConfigError::ScopesWithoutGoogleToken);
    }
    if cfg.use_google_token
        && cfg
            .headers
            .as_ref()
            .is_some_and(|h| h.contains_key(AUTHORIZATION))
    {
        return Err(ConfigError::AuthorizationConflict);
    }
    if let Some((name, _)) = cfg
        .headers
        .iter()
        .flatten()
        .find(|(name, value)| !header_is_safe(name, value))
    {
        return Err(ConfigError::InvalidHeader { name: name.clone() });
    }
    Ok(())
}

/// A header that cannot smuggle extra lines into the request.
fn header_is_safe(name: &str, value: &str) -> bool {
    !name.is_empty()
        && !name.contains(['\r', '\n', ':'])
        && !value.contains(['\r', '\n'])
}
