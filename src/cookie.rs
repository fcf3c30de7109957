//! Single-cookie handling for the replay flows.
//!
//! Only the first `name=value` of the first `Set-Cookie` header is used.
//! Attributes (`Path`, `Domain`, `Expires`, ...) and further cookies are
//! dropped; there is no cookie jar.

use std::fmt::{Display, Formatter};

use crate::headers::HeaderMapping;

pub const SET_COOKIE: &str = "Set-Cookie";

/// Returns the part of the `Set-Cookie` header before the first `;`.
///
/// An absent header, or one whose first pair is empty, yields `None`.
pub fn extract_set_cookie_header(headers: &HeaderMapping) -> Option<String> {
    let set_cookie = headers.get(SET_COOKIE)?;
    return set_cookie
        .split(';')
        .next()
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.to_string());
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePair {
    pub name: String,
    pub value: String,
}

impl CookiePair {
    /// Splits on the first `=`; anything without one is not a cookie pair.
    pub fn parse(cookie: &str) -> Option<CookiePair> {
        let (name, value) = cookie.split_once('=')?;
        return Some(CookiePair { name: name.to_string(), value: value.to_string() });
    }

    /// Blank replacements keep the current part.
    pub fn with_overrides(&self, new_name: &str, new_value: &str) -> CookiePair {
        let new_name = new_name.trim();
        let new_value = new_value.trim();
        return CookiePair {
            name: if new_name.is_empty() { self.name.clone() } else { new_name.to_string() },
            value: if new_value.is_empty() { self.value.clone() } else { new_value.to_string() },
        };
    }
}

impl Display for CookiePair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}
