//! The fetch-and-store run: headers, GET, status check, parse, normalize, write.

use serde_json::Value;
use std::time::{Duration, Instant};

use crate::auth::TokenProvider;
use crate::config::StepConfig;
use crate::error::StepError;
use crate::fetch;
use crate::headers::build_headers;
use crate::normalize::normalize;
use crate::sink::RecordSink;
use crate::validate::validate;

/// What a successful run did.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub record_count: usize,
    /// From just before the GET until the body was parsed.
    pub elapsed: Duration,
}

/// Run the step once. Nothing is written to `sink` unless every earlier stage
/// succeeded. Never exits the process; the caller maps errors to exit codes.
pub fn run_step(
    cfg: &StepConfig,
    tokens: &dyn TokenProvider,
    sink: &mut dyn RecordSink,
) -> Result<StepReport, StepError> {
    validate(cfg)?;
    let headers = build_headers(cfg, tokens)?;

    let start = Instant::now();
    println!("Fetching JSON data from: {}", cfg.url);
    tracing::info!(url = %cfg.url, "fetching JSON");

    let response = fetch::get(&cfg.url, &headers)?;
    if response.status != 200 {
        tracing::warn!(url = %cfg.url, status = response.status, "unexpected HTTP status");
        return Err(StepError::Http {
            status: response.status,
            body: response.text(),
        });
    }

    let data: Value = serde_json::from_slice(&response.body)?;
    let elapsed = start.elapsed();

    let single_object = data.is_object();
    let records = normalize(data)?;
    println!("{}", read_summary(single_object, records.len(), elapsed));

    sink.write_jsons(&records)?;
    println!("Done");
    tracing::info!(
        count = records.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "step finished"
    );

    Ok(StepReport {
        record_count: records.len(),
        elapsed,
    })
}

/// Wording follows the payload shape: a lone object is "1 JSON object", any
/// array (even of one element) is "<n> JSON objects".
fn read_summary(single_object: bool, count: usize, elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if single_object {
        format!("Read 1 JSON object in {:.1} seconds.", secs)
    } else {
        format!("Read {} JSON objects in {:.1} seconds.", count, secs)
    }
}
