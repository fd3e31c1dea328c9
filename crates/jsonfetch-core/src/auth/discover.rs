//! Locate Application Default Credentials.

use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::AuthError;

/// Environment variable naming a credentials file.
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";
/// Overrides the gcloud config directory.
pub const CLOUDSDK_CONFIG_ENV: &str = "CLOUDSDK_CONFIG";
/// File written by `gcloud auth application-default login`.
pub const WELL_KNOWN_FILE: &str = "application_default_credentials.json";

/// Where the credentials for this process come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// File named by `GOOGLE_APPLICATION_CREDENTIALS`.
    EnvironmentFile(PathBuf),
    /// gcloud's well-known credentials file.
    GcloudFile(PathBuf),
    /// GCE/GKE/Cloud Run metadata server.
    MetadataServer,
}

/// Credential file flavors we know how to exchange for tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    ServiceAccount,
    AuthorizedUser,
}

#[derive(Deserialize)]
struct CredentialHeader {
    #[serde(rename = "type")]
    kind: String,
}

/// Pick a credential source. A non-empty env value wins, then an existing
/// gcloud file, then the metadata server.
pub fn discover(env_value: Option<OsString>, gcloud_file: Option<PathBuf>) -> CredentialSource {
    if let Some(path) = env_value.filter(|v| !v.is_empty()) {
        return CredentialSource::EnvironmentFile(PathBuf::from(path));
    }
    match gcloud_file {
        Some(path) if path.is_file() => CredentialSource::GcloudFile(path),
        _ => CredentialSource::MetadataServer,
    }
}

/// Discover using the real process environment.
pub(crate) fn discover_from_env() -> CredentialSource {
    discover(std::env::var_os(CREDENTIALS_ENV), gcloud_well_known_file())
}

fn gcloud_well_known_file() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CLOUDSDK_CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir).join(WELL_KNOWN_FILE));
    }
    let xdg_dirs = xdg::BaseDirectories::new().ok()?;
    Some(xdg_dirs.get_config_home().join("gcloud").join(WELL_KNOWN_FILE))
}

/// Read the `type` field of a credentials file.
pub fn credential_kind(path: &Path) -> Result<CredentialKind, AuthError> {
    let bytes = std::fs::read(path).map_err(|source| AuthError::Credentials {
        path: path.to_path_buf(),
        source,
    })?;
    let header: CredentialHeader =
        serde_json::from_slice(&bytes).map_err(|source| AuthError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    match header.kind.as_str() {
        "service_account" => Ok(CredentialKind::ServiceAccount),
        "authorized_user" => Ok(CredentialKind::AuthorizedUser),
        _ => Err(AuthError::UnsupportedType {
            path: path.to_path_buf(),
            kind: header.kind,
        }),
    }
}
