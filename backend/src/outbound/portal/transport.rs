//! Transport helpers shared by the portal adapters.

use std::time::Duration;

use reqwest::{Client, Url};

/// Header the portal reads the session token from.
pub const PORTAL_TOKEN_HEADER: &str = "X-CSRF-Token";

const USER_AGENT: &str = concat!("portal-backend/", env!("CARGO_PKG_VERSION"));

/// Build a client with the shared user agent and request timeout.
pub(super) fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Ensure `base` ends with `/` so relative joins append instead of replacing.
pub(super) fn directory_base(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

/// Resolve `segment` beneath the portal base URL.
pub(super) fn endpoint(base: &Url, segment: &str) -> Result<Url, url::ParseError> {
    base.join(segment)
}

/// Collapse whitespace and cap the body so error messages stay one line.
pub(super) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// `"upstream <status>"`, followed by the body preview when there is one.
pub(super) fn status_message(status: reqwest::StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("upstream {}", status.as_u16())
    } else {
        format!("upstream {}: {preview}", status.as_u16())
    }
}
