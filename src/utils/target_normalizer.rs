//! Target URL normalization and validation.
//!
//! A bare hostname like `example.com` is accepted and stored as
//! `https://example.com`; anything that is not a well-formed absolute
//! http(s) URL after that is rejected.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Matches an explicit http or https scheme prefix.
static SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("scheme regex is valid"));

/// Errors that can occur during target normalization.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    #[error("target is required")]
    Missing,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Target must have a host")]
    MissingHost,
}

/// Normalizes a target URL to the form persisted in the store.
///
/// # Rules
///
/// 1. Leading/trailing whitespace is trimmed.
/// 2. If no `http://` / `https://` prefix is present, `https://` is prepended.
/// 3. The result must parse as an absolute URL with a host.
///
/// The returned string is the caller's input with at most the scheme
/// prepended; it is deliberately not re-serialized through the parser, so
/// `example.com` is stored as exactly `https://example.com`.
///
/// Dangerous schemes (`javascript:`, `data:`, `file:`, ...) never survive:
/// without the http(s) prefix the whole input is treated as a host and fails
/// to parse.
///
/// # Errors
///
/// Returns [`TargetError::Missing`] for empty input and
/// [`TargetError::InvalidFormat`] / [`TargetError::MissingHost`] for
/// malformed URLs.
pub fn normalize_target(input: &str) -> Result<String, TargetError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TargetError::Missing);
    }

    let candidate = if SCHEME_REGEX.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&candidate).map_err(|e| TargetError::InvalidFormat(e.to_string()))?;

    if url.host_str().is_none() {
        return Err(TargetError::MissingHost);
    }

    Ok(candidate)
}
