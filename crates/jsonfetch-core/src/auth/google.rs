//! Tokens from Google Application Default Credentials via `yup-oauth2`.
//!
//! `yup-oauth2` is async; each call drives it on a private current-thread
//! runtime so the rest of the step stays synchronous.

use yup_oauth2::authenticator::ApplicationDefaultCredentialsTypes;
use yup_oauth2::{
    ApplicationDefaultCredentialsAuthenticator, ApplicationDefaultCredentialsFlowOpts,
    AuthorizedUserAuthenticator, ServiceAccountAuthenticator,
};

use super::discover::{credential_kind, discover_from_env, CredentialKind, CredentialSource};
use super::{AuthError, TokenProvider};
use std::path::Path;

/// Scope requested when none are configured.
pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// [`TokenProvider`] backed by the ambient Google identity of the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoogleTokenProvider;

impl GoogleTokenProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TokenProvider for GoogleTokenProvider {
    fn fetch_token(&self, scopes: &[String]) -> Result<String, AuthError> {
        let scopes = effective_scopes(scopes);
        let source = discover_from_env();
        tracing::debug!(?source, ?scopes, "requesting Google access token");

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(AuthError::Runtime)?;
        let token = rt.block_on(token_from_source(&source, &scopes))?;
        tracing::info!("obtained Google access token");
        Ok(token)
    }
}

fn effective_scopes(scopes: &[String]) -> Vec<String> {
    if scopes.is_empty() {
        vec![DEFAULT_SCOPE.to_string()]
    } else {
        scopes.to_vec()
    }
}

async fn token_from_source(
    source: &CredentialSource,
    scopes: &[String],
) -> Result<String, AuthError> {
    match source {
        CredentialSource::EnvironmentFile(path) | CredentialSource::GcloudFile(path) => {
            token_from_file(path, scopes).await
        }
        CredentialSource::MetadataServer => {
            let opts = ApplicationDefaultCredentialsFlowOpts::default();
            let auth = match ApplicationDefaultCredentialsAuthenticator::builder(opts).await {
                ApplicationDefaultCredentialsTypes::InstanceMetadata(builder) => {
                    builder.build().await
                }
                ApplicationDefaultCredentialsTypes::ServiceAccount(builder) => {
                    builder.build().await
                }
            }
            .map_err(AuthError::Authenticator)?;
            let token = auth.token(scopes).await?;
            token.token().map(str::to_owned).ok_or(AuthError::EmptyToken)
        }
    }
}

async fn token_from_file(path: &Path, scopes: &[String]) -> Result<String, AuthError> {
    let read_err = |source| AuthError::Credentials {
        path: path.to_path_buf(),
        source,
    };
    let token = match credential_kind(path)? {
        CredentialKind::ServiceAccount => {
            let key = yup_oauth2::read_service_account_key(path)
                .await
                .map_err(read_err)?;
            let auth = ServiceAccountAuthenticator::builder(key)
                .build()
                .await
                .map_err(AuthError::Authenticator)?;
            auth.token(scopes).await?
        }
        CredentialKind::AuthorizedUser => {
            let secret = yup_oauth2::read_authorized_user_secret(path)
                .await
                .map_err(read_err)?;
            let auth = AuthorizedUserAuthenticator::builder(secret)
                .build()
                .await
                .map_err(AuthError::Authenticator)?;
            auth.token(scopes).await?
        }
    };
    token.token().map(str::to_owned).ok_or(AuthError::EmptyToken)
}
