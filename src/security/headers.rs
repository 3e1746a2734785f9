//! Cross-origin response header composition.
//!
//! # Responsibilities
//! - Guarantee a minimum `Access-Control-Expose-Headers` list on relayed responses
//! - Merge that list with whatever the downstream already exposed
//!
//! # Design Decisions
//! - Defaults come first, downstream entries follow in their original order
//! - Duplicates are removed case-insensitively, first spelling wins

use axum::http::{header::ACCESS_CONTROL_EXPOSE_HEADERS, HeaderMap, HeaderValue};

/// Headers every caller may read from a relayed response.
pub const DEFAULT_EXPOSE_HEADERS: &[&str] = &[
    "ETag",
    "Server",
    "Location",
    "x-Amz-Cf-Id",
    "X-Amz-Cd-Pop",
    "X-Cache",
];

/// Build the `Access-Control-Expose-Headers` value from an existing one.
pub fn compose_expose_headers(existing: Option<&str>) -> String {
    let extra = existing
        .into_iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let mut merged: Vec<&str> = Vec::new();
    for name in DEFAULT_EXPOSE_HEADERS.iter().copied().chain(extra) {
        if !merged.iter().any(|m| m.eq_ignore_ascii_case(name)) {
            merged.push(name);
        }
    }
    merged.join(", ")
}

/// Rewrite the expose header on `headers` in place.
pub fn apply_expose_headers(headers: &mut HeaderMap) {
    let existing = headers
        .get_all(ACCESS_CONTROL_EXPOSE_HEADERS)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .collect::<Vec<_>>();
    let existing = (!existing.is_empty()).then(|| existing.join(", "));

    let composed = compose_expose_headers(existing.as_deref());
    match HeaderValue::from_str(&composed) {
        Ok(value) => {
            headers.insert(ACCESS_CONTROL_EXPOSE_HEADERS, value);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to set Access-Control-Expose-Headers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: &str = "ETag, Server, Location, x-Amz-Cf-Id, X-Amz-Cd-Pop, X-Cache";

    #[test]
    fn defaults_when_nothing_present() {
        assert_eq!(compose_expose_headers(None), DEFAULTS);
        assert_eq!(compose_expose_headers(Some(" , ")), DEFAULTS);
    }

    #[test]
    fn existing_entries_are_appended_once() {
        let composed = compose_expose_headers(Some("etag, X-Request-Id,  x-cache ,X-Trace"));
        assert_eq!(composed, format!("{DEFAULTS}, X-Request-Id, X-Trace"));
    }

    #[test]
    fn applies_to_header_map() {
        let mut headers = HeaderMap::new();
        headers.append(ACCESS_CONTROL_EXPOSE_HEADERS, HeaderValue::from_static("X-One"));
        headers.append(ACCESS_CONTROL_EXPOSE_HEADERS, HeaderValue::from_static("x-two, SERVER"));

        apply_expose_headers(&mut headers);

        let values: Vec<_> = headers.get_all(ACCESS_CONTROL_EXPOSE_HEADERS).iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], &format!("{DEFAULTS}, X-One, x-two"));
    }
}
