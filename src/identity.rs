/// Identifier extraction from host page URLs
use std::sync::OnceLock;

use regex::Regex;
use url::Url;

static USER_ID_RE: OnceLock<Regex> = OnceLock::new();

/// Extract the numeric user id from a profile link.
///
/// Matches the `/users/<id>` path segment anywhere in the URL, so both
/// `https://host/users/123/profile` and `/users/123` work.
pub fn user_id_from_href(href: &str) -> Option<String> {
    let re = USER_ID_RE.get_or_init(|| Regex::new(r"/users/(\d+)").unwrap());
    re.captures(href).map(|caps| caps[1].to_string())
}

/// Extract the numeric universe id from a game link's `universeId` query
/// parameter. Non-numeric values are rejected.
pub fn universe_id_from_href(href: &str) -> Option<String> {
    let url = Url::parse(href).ok()?;
    let value = url
        .query_pairs()
        .find_map(|(key, value)| (key == "universeId").then_some(value))?;

    let value = value.into_owned();
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        Some(value)
    } else {
        None
    }
}
