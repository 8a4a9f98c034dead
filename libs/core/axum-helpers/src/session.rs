//! Session-cookie and bearer-token plumbing.
//!
//! The session credential is an opaque token carried in the `session_id`
//! cookie (or an `Authorization: Bearer` header). These helpers only move
//! the token between HTTP and the caller; minting, validating, and
//! clearing tokens is the accounts domain's job.

use axum::http::HeaderMap;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session_id";

/// Extract the session token from the Authorization header or cookie.
///
/// The bearer header wins when both are present.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
        .or_else(|| {
            extract_cookie_value(
                headers.get("cookie").and_then(|v| v.to_str().ok())?,
                SESSION_COOKIE,
            )
        })
}

/// Extract a cookie value by name from a `Cookie` header value
pub fn extract_cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|cookie| {
        let mut parts = cookie.trim().splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(key), Some(value)) if key == name => Some(value.to_string()),
            _ => None,
        }
    })
}

/// Build the `Set-Cookie` value that establishes a session
pub fn session_cookie(token: &str, secure: bool) -> String {
    let secure_flag = if secure { " Secure;" } else { "" };
    format!(
        "{}={}; HttpOnly;{} SameSite=Strict; Path=/",
        SESSION_COOKIE, token, secure_flag
    )
}

/// Build the `Set-Cookie` value that clears the session cookie
pub fn clear_session_cookie(secure: bool) -> String {
    let secure_flag = if secure { " Secure;" } else { "" };
    format!(
        "{}=; HttpOnly;{} SameSite=Strict; Path=/; Max-Age=0",
        SESSION_COOKIE, secure_flag
    )
}
