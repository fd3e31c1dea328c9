//! Bearer token acquisition.
//!
//! The step only depends on [`TokenProvider`]; the Google implementation
//! discovers Application Default Credentials from the process environment.

mod discover;
mod google;

pub use discover::{credential_kind, discover, CredentialKind, CredentialSource};
pub use google::{GoogleTokenProvider, DEFAULT_SCOPE};

use std::path::PathBuf;
use thiserror::Error;

/// Source of access tokens for the `Authorization: Bearer` header.
pub trait TokenProvider {
    /// Obtain a token for `scopes` (may be empty). No retries.
    fn fetch_token(&self, scopes: &[String]) -> Result<String, AuthError>;
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("read credentials {}", path.display())]
    Credentials {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse credentials {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported credential type `{kind}` in {}", path.display())]
    UnsupportedType { path: PathBuf, kind: String },
    #[error("build authenticator")]
    Authenticator(#[source] std::io::Error),
    #[error("token request failed")]
    Token(#[from] yup_oauth2::Error),
    #[error("token response carried no access token")]
    EmptyToken,
    #[error("start auth runtime")]
    Runtime(#[source] std::io::Error),
}
