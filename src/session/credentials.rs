//! Session credential extraction from request headers.

use axum::http::{
    header::{AUTHORIZATION, COOKIE},
    HeaderMap,
};
use secrecy::SecretString;

/// Credential the identity provider issued to the browser or API client.
#[derive(Debug)]
pub enum SessionCredential {
    Cookie(SecretString),
    Bearer(SecretString),
}

/// Pull the session credential out of the request, bearer first.
///
/// Returns `None` when neither a bearer token nor the named cookie is present.
#[must_use]
pub fn extract_credential(headers: &HeaderMap, cookie_name: &str) -> Option<SessionCredential> {
    if let Some(token) = extract_bearer_token(headers) {
        return Some(SessionCredential::Bearer(SecretString::from(token)));
    }
    extract_cookie(headers, cookie_name).map(|token| SessionCredential::Cookie(SecretString::from(token)))
}

fn extract_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    // Several Cookie headers may be present over HTTP/2.
    for header in headers.get_all(COOKIE) {
        let Ok(value) = header.to_str() else {
            continue;
        };
        for pair in value.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            let (Some(key), Some(val)) = (parts.next(), parts.next()) else {
                continue;
            };
            let val = val.trim();
            if key.trim() == cookie_name && !val.is_empty() {
                return Some(val.to_string());
            }
        }
    }
    None
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
