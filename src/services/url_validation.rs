//! Bookmark input validation.
//!
//! URLs without an `http://` or `https://` prefix get `https://` prepended and
//! must then parse as an absolute web URL with a host.

use url::Url;

use crate::types::errors::ValidationError;

const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Returns true if `input` starts with `http://` or `https://`, ignoring case.
fn has_web_scheme(input: &str) -> bool {
    let lower = input.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Normalizes a user-entered URL.
///
/// The returned string is the trimmed input (with `https://` prepended when
/// no web scheme was given), not the parser's canonical form, so
/// `"example.com"` becomes `"https://example.com"`.
pub fn normalize_url(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyFields);
    }

    let candidate = if has_web_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, trimmed)
    };

    let parsed =
        Url::parse(&candidate).map_err(|_| ValidationError::InvalidUrl(trimmed.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ValidationError::InvalidUrl(trimmed.to_string()));
    }

    Ok(candidate)
}

/// Validates a title/URL pair from the add form.
///
/// Returns `(trimmed_title, normalized_url)`.
pub fn validate_entry(title: &str, url: &str) -> Result<(String, String), ValidationError> {
    let title = title.trim();
    if title.is_empty() || url.trim().is_empty() {
        return Err(ValidationError::EmptyFields);
    }
    let url = normalize_url(url)?;
    Ok((title.to_string(), url))
}

/// Host of a stored URL without a leading `www.`, for compact list display.
/// Falls back to the input when it does not parse.
pub fn display_domain(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
            None => url.to_string(),
        },
        Err(_) => url.to_string(),
    }
}
