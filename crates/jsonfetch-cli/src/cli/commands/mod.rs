//! CLI command handlers.

mod run;
mod validate;

pub use run::run_fetch;
pub use validate::run_validate;

use anyhow::{Context, Result};
use jsonfetch_core::config::StepConfig;
use jsonfetch_core::validate::validate;

use super::StepArgs;

/// Load the config file (if any), apply command-line values, and validate.
pub(crate) fn resolve_config(args: &StepArgs) -> Result<StepConfig> {
    let mut cfg = match (&args.config, &args.url) {
        (Some(path), _) => StepConfig::load(path)?,
        (None, Some(url)) => StepConfig::new(url.clone()),
        (None, None) => anyhow::bail!("no URL given: pass --url or --config"),
    };

    if let Some(url) = &args.url {
        cfg.url = url.clone();
    }
    if args.use_google_token {
        cfg.use_google_token = true;
    }
    if !args.scopes.is_empty() {
        cfg.scopes = Some(args.scopes.clone());
    }
    if !args.headers.is_empty() {
        cfg.headers
            .get_or_insert_with(Default::default)
            .extend(args.headers.iter().cloned());
    }

    tracing::debug!("resolved step config: {:?}", redacted(&cfg));
    validate(&cfg).context("invalid step configuration")?;
    Ok(cfg)
}

/// Config copy safe for logs: header values are hidden.
fn redacted(cfg: &StepConfig) -> StepConfig {
    let mut cfg = cfg.clone();
    if let Some(headers) = cfg.headers.as_mut() {
        for value in headers.values_mut() {
            *value = "<redacted>".to_string();
        }
    }
    cfg
}
