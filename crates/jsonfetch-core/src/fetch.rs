//! The single HTTP GET.
//!
//! Uses the curl crate (libcurl). Redirects are followed; no timeout is set,
//! so an unresponsive server blocks the caller.

use std::collections::BTreeMap;

/// Status and raw body of a completed GET.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Body as text, lossily decoded, for error reports.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Performs one GET with exactly `headers` (plus curl's own defaults).
/// Runs in the current thread.
pub fn get(url: &str, headers: &BTreeMap<String, String>) -> Result<FetchResponse, curl::Error> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;

    let mut list = curl::easy::List::new();
    for (k, v) in headers {
        list.append(&header_line(k, v))?;
    }
    if !headers.is_empty() {
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    tracing::debug!(url, status, bytes = body.len(), "GET finished");
    Ok(FetchResponse { status, body })
}

/// curl drops a header given as `Name:`; `Name;` is its syntax for sending an empty value.
fn header_line(name: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{};", name)
    } else {
        format!("{}: {}", name, value)
    }
}
