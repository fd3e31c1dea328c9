//! Failures of a fetch-and-store run. Every variant is terminal for the run.

use thiserror::Error;

use crate::auth::AuthError;
use crate::sink::SinkError;
use crate::validate::ConfigError;

#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not obtain access token")]
    Auth(#[from] AuthError),
    #[error("GET request failed")]
    Transport(#[from] curl::Error),
    /// Any status other than 200.
    #[error("Error fetching data: {status}, {body}")]
    Http { status: u32, body: String },
    #[error("response body is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("Unexpected JSON data type: {0}")]
    UnexpectedType(&'static str),
    #[error(transparent)]
    Sink(#[from] SinkError),
}
