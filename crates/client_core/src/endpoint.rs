//! Backend address resolution.
//!
//! The configured base address is normalized once at startup into the review
//! API base, and the review and health endpoints are derived from it.

use anyhow::{Context, Result};
use tracing::info;
use url::Url;

pub const API_PATH: &str = "/api/v1/task";
pub const HEALTH_PATH: &str = "/health";
pub const REVIEW_PATH: &str = "/review";
pub const HOSTING_SUFFIX: &str = "onrender.com";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000/api/v1/task";

/// Normalizes a raw base address into the fully qualified review API base.
///
/// A bare hostname (no scheme, no `/`) is expanded onto the hosting suffix,
/// other scheme-less input gets `https://`, and the API path is appended
/// unless already present. Re-applying the function is a no-op.
pub fn normalize_backend_url(raw_base: &str) -> String {
    let raw_base = raw_base.trim();

    if raw_base.is_empty() {
        return DEFAULT_BACKEND_URL.to_string();
    }

    let mut url = if has_scheme(raw_base) {
        raw_base.to_string()
    } else if !raw_base.contains('/') {
        format!("https://{raw_base}.{HOSTING_SUFFIX}{API_PATH}")
    } else {
        format!("https://{raw_base}")
    };

    if !url.ends_with(API_PATH) {
        let trimmed = url.strip_suffix('/').unwrap_or(&url);
        url = format!("{trimmed}{API_PATH}");
    }

    url
}

/// Derives the health endpoint by swapping the trailing API path for the
/// health path.
pub fn health_url(api_base: &str) -> String {
    match api_base.strip_suffix(API_PATH) {
        Some(origin) => format!("{origin}{HEALTH_PATH}"),
        None => format!("{}{HEALTH_PATH}", api_base.trim_end_matches('/')),
    }
}

pub fn review_url(api_base: &str) -> String {
    format!("{api_base}{REVIEW_PATH}")
}

fn has_scheme(raw: &str) -> bool {
    let Some((scheme, _)) = raw.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Endpoints used for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api_base: String,
    pub review: String,
    pub health: String,
}

impl Endpoints {
    pub fn from_raw(raw_base: &str) -> Result<Self> {
        let api_base = normalize_backend_url(raw_base);
        Url::parse(&api_base)
            .with_context(|| format!("backend address '{raw_base}' resolved to invalid url '{api_base}'"))?;

        let endpoints = Self {
            review: review_url(&api_base),
            health: health_url(&api_base),
            api_base,
        };
        info!(
            review = %endpoints.review,
            health = %endpoints.health,
            "resolved backend endpoints"
        );
        Ok(endpoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hostname_expands_onto_hosting_suffix() {
        assert_eq!(
            normalize_backend_url("myhost"),
            "https://myhost.onrender.com/api/v1/task"
        );
    }

    #[test]
    fn trailing_slash_is_removed_before_api_path() {
        assert_eq!(
            normalize_backend_url("http://example.com/"),
            "http://example.com/api/v1/task"
        );
    }

    #[test]
    fn schemeless_path_gets_https() {
        assert_eq!(
            normalize_backend_url("example.com/staging/"),
            "https://example.com/staging/api/v1/task"
        );
    }

    #[test]
    fn host_with_port_is_not_mistaken_for_a_scheme() {
        assert_eq!(
            normalize_backend_url("localhost:8000/"),
            "https://localhost:8000/api/v1/task"
        );
    }

    #[test]
    fn already_resolved_url_is_unchanged() {
        let resolved = "https://api.example.com/api/v1/task";
        assert_eq!(normalize_backend_url(resolved), resolved);
        assert_eq!(
            normalize_backend_url(&normalize_backend_url("myhost")),
            normalize_backend_url("myhost")
        );
    }

    #[test]
    fn blank_input_uses_default_address() {
        assert_eq!(normalize_backend_url("   "), DEFAULT_BACKEND_URL);
    }

    #[test]
    fn derives_review_and_health_endpoints() {
        let endpoints = Endpoints::from_raw("http://127.0.0.1:8000").expect("endpoints");
        assert_eq!(endpoints.api_base, "http://127.0.0.1:8000/api/v1/task");
        assert_eq!(endpoints.review, "http://127.0.0.1:8000/api/v1/task/review");
        assert_eq!(endpoints.health, "http://127.0.0.1:8000/health");
    }

    #[test]
    fn rejects_unparseable_address() {
        assert!(Endpoints::from_raw("http://exa mple.com").is_err());
    }
}
