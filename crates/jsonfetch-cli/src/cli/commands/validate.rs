//! `jsonfetch validate` – check the step config without network access.

use anyhow::Result;

use super::resolve_config;
use crate::cli::StepArgs;

pub fn run_validate(args: &StepArgs) -> Result<()> {
    let cfg = resolve_config(args)?;
    println!("Config OK: {}", cfg.url);
    Ok(())
}
