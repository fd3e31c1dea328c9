//! Request headers: custom headers plus an optional bearer token.

use std::collections::BTreeMap;

use crate::auth::{AuthError, TokenProvider};
use crate::config::StepConfig;
use crate::validate::AUTHORIZATION;

/// Assemble the GET headers for `cfg`. The token provider is only consulted
/// when `use_google_token` is set, and receives exactly the configured scopes.
pub fn build_headers(
    cfg: &StepConfig,
    tokens: &dyn TokenProvider,
) -> Result<BTreeMap<String, String>, AuthError> {
    let mut headers = BTreeMap::new();
    if let Some(custom) = &cfg.headers {
        headers.extend(custom.iter().map(|(k, v)| (k.clone(), v.clone())));
        println!(
            "Using custom headers: {:?}",
            custom.keys().collect::<Vec<_>>()
        );
    }

    if cfg.use_google_token {
        println!("Getting credentials from Application Default Credentials (ADC)");
        let token = tokens.fetch_token(cfg.scopes())?;
        // HTTP header names are case-insensitive; the bearer token replaces any spelling.
        headers.retain(|name, _| !name.eq_ignore_ascii_case(AUTHORIZATION));
        headers.insert(AUTHORIZATION.to_string(), format!("Bearer {token}"));
        println!("Added Bearer token to request headers");
    }

    tracing::debug!(names = ?headers.keys().collect::<Vec<_>>(), "request headers built");
    Ok(headers)
}
