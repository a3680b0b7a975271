//! Session credential storage in the `token` cookie

use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::{Cookie, SameSite};

pub const SESSION_COOKIE_NAME: &str = "token";

/// Returns the value of the first `name=value` entry of a raw `Cookie`
/// header, or `None` when the cookie is not set.
pub fn read_credential(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header.split(';').find_map(|entry| {
        let (key, value) = entry.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim().to_string())
    })
}

/// The session credential of a request. Browsers list the cookie set on
/// the most specific path first, so the first `token` entry across all
/// `Cookie` headers is the one used. An empty value counts as absent.
pub fn credential_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| read_credential(value, SESSION_COOKIE_NAME))
        .filter(|token| !token.is_empty())
}

/// Cookie written on successful login. Expiry is left to the backend token.
pub fn credential_cookie<'a>(token: String, secure: bool) -> Cookie<'a> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .secure(secure)
        .same_site(SameSite::Strict)
        .build()
}
