//! Decoding of `Cookie` request headers and encoding of `Set-Cookie`
//! directives.
//!
//! Both directions percent-encode with the same set of characters as
//! JavaScript's `encodeURIComponent`: everything but ASCII alphanumerics and
//! `-_.!~*'()` is escaped.

use std::fmt::Write;

use http::{header, HeaderMap};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::{CookieMap, CookieOptions};

/// Characters escaped in cookie names and values.
pub const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Decodes a `Cookie` header value into a [`CookieMap`].
///
/// An absent or empty header yields an empty map. Decoding never fails:
/// segments without a `=` or with an empty name are discarded, and a value
/// whose percent-decoding is not valid UTF-8 is kept verbatim.
///
/// ```rust
/// use cookie_guard::codec;
///
/// let cookies = codec::decode(Some("foo=bar; token=abc=def; name=%E4%B8%AD%E6%96%87"));
/// assert_eq!(cookies.get("foo"), Some("bar"));
/// assert_eq!(cookies.get("token"), Some("abc=def"));
/// assert_eq!(cookies.get("name"), Some("中文"));
///
/// assert!(codec::decode(None).is_empty());
/// ```
pub fn decode(header: Option<&str>) -> CookieMap {
    let mut cookies = CookieMap::new();
    if let Some(header) = header {
        decode_into(&mut cookies, header);
    }

    cookies
}

/// Decodes every `Cookie` header in `headers` into a single [`CookieMap`].
///
/// Headers are processed in order, so a name repeated in a later header
/// overrides an earlier one. Raw bytes that are not UTF-8 are replaced with
/// `U+FFFD` and only affect the segment they appear in.
pub fn decode_headers(headers: &HeaderMap) -> CookieMap {
    let mut cookies = CookieMap::new();
    for value in headers.get_all(header::COOKIE) {
        let value = String::from_utf8_lossy(value.as_bytes());
        decode_into(&mut cookies, &value);
    }

    cookies
}

fn decode_into(cookies: &mut CookieMap, header: &str) {
    for segment in header.split(';') {
        let Some((name, value)) = segment.split_once('=') else {
            continue;
        };

        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        let value = value.trim();
        match percent_decode_str(value).decode_utf8() {
            Ok(decoded) => cookies.insert(name, decoded),
            Err(_) => cookies.insert(name, value),
        }
    }
}

/// Encodes one `Set-Cookie` directive.
///
/// Attributes are emitted in a fixed order: `Max-Age`, `Expires`, `Domain`,
/// `Path`, `Secure`, `HttpOnly`, `SameSite`. `Path` is always present and
/// defaults to `/`; `HttpOnly` is present unless explicitly disabled.
///
/// ```rust
/// use cookie_guard::{codec, CookieOptions};
///
/// let directive = codec::encode("foo", "bar", &CookieOptions::default());
/// assert_eq!(directive, "foo=bar; Path=/; HttpOnly");
///
/// let directive = codec::encode("foo", "bar", &CookieOptions::new().http_only(false));
/// assert_eq!(directive, "foo=bar; Path=/");
/// ```
pub fn encode(name: &str, value: &str, options: &CookieOptions) -> String {
    let mut out = format!(
        "{}={}",
        utf8_percent_encode(name, COMPONENT_ENCODE_SET),
        utf8_percent_encode(value, COMPONENT_ENCODE_SET)
    );

    // Writing into a `String` is infallible.
    if let Some(max_age) = options.get_max_age() {
        let _ = write!(out, "; Max-Age={}", max_age.whole_seconds());
    }

    if let Some(date) = options.get_expires().and_then(|e| e.http_date()) {
        let _ = write!(out, "; Expires={}", date);
    }

    if let Some(domain) = options.get_domain() {
        let _ = write!(out, "; Domain={}", domain);
    }

    let _ = write!(out, "; Path={}", options.path_or_default());

    if options.get_secure() {
        out.push_str("; Secure");
    }

    if options.http_only_or_default() {
        out.push_str("; HttpOnly");
    }

    if let Some(same_site) = options.get_same_site() {
        let _ = write!(out, "; SameSite={}", same_site);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Expires, SameSite};
    use http::HeaderValue;
    use time::Duration;

    #[test]
    fn decode_pairs() {
        let cookies = decode(Some("foo=bar; baz=qux"));
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies.get("foo"), Some("bar"));
        assert_eq!(cookies.get("baz"), Some("qux"));
    }

    #[test]
    fn decode_empty_and_absent() {
        assert!(decode(Some("")).is_empty());
        assert!(decode(None).is_empty());
        assert!(decode(Some(" ; ;")).is_empty());
    }

    #[test]
    fn decode_keeps_inner_equals() {
        let cookies = decode(Some("token=abc=def=ghi"));
        assert_eq!(cookies.get("token"), Some("abc=def=ghi"));
    }

    #[test]
    fn decode_percent_encoded() {
        let cookies = decode(Some("name=%E4%B8%AD%E6%96%87"));
        assert_eq!(cookies.get("name"), Some("中文"));
    }

    #[test]
    fn decode_trims_and_discards() {
        let cookies = decode(Some("  a = 1 ;=nameless; flag; b=; =; c=3"));
        assert_eq!(cookies.get("a"), Some("1"));
        assert_eq!(cookies.get("b"), Some(""));
        assert_eq!(cookies.get("c"), Some("3"));
        assert!(!cookies.contains("flag"));
        assert!(!cookies.contains(""));
        assert_eq!(cookies.len(), 3);
    }

    #[test]
    fn decode_last_duplicate_wins() {
        let cookies = decode(Some("id=1; id=2; id=3"));
        assert_eq!(cookies.get("id"), Some("3"));
    }

    #[test]
    fn decode_passes_through_bad_encoding() {
        let cookies = decode(Some("a=100%; b=%zz; c=%FF%FE"));
        assert_eq!(cookies.get("a"), Some("100%"));
        assert_eq!(cookies.get("b"), Some("%zz"));
        assert_eq!(cookies.get("c"), Some("%FF%FE"));
    }

    #[test]
    fn decode_multiple_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1; b=2"));
        headers.append(header::COOKIE, HeaderValue::from_static("b=3"));
        headers.append(header::COOKIE, HeaderValue::from_bytes(b"c=\xff; d=4").unwrap());

        let cookies = decode_headers(&headers);
        assert_eq!(cookies.get("a"), Some("1"));
        assert_eq!(cookies.get("b"), Some("3"));
        assert_eq!(cookies.get("c"), Some("\u{fffd}"));
        assert_eq!(cookies.get("d"), Some("4"));
    }

    #[test]
    fn decode_headers_with_raw_utf8() {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_bytes("session=abc; note=caf\u{e9}".as_bytes()).unwrap();
        headers.append(header::COOKIE, value);

        let cookies = decode_headers(&headers);
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies.get("session"), Some("abc"));
        assert_eq!(cookies.get("note"), Some("caf\u{e9}"));
    }

    #[test]
    fn encode_defaults() {
        assert_eq!(
            encode("foo", "bar", &CookieOptions::default()),
            "foo=bar; Path=/; HttpOnly"
        );
    }

    #[test]
    fn encode_http_only_opt_out() {
        let options = CookieOptions::new().http_only(false);
        assert_eq!(encode("foo", "bar", &options), "foo=bar; Path=/");

        let options = CookieOptions::new().http_only(true);
        assert_eq!(encode("foo", "bar", &options), "foo=bar; Path=/; HttpOnly");
    }

    #[test]
    fn encode_every_attribute() {
        let options = CookieOptions::new()
            .max_age(Duration::seconds(10))
            .expires(Expires::EPOCH)
            .domain("www.rust-lang.org")
            .path("/sub")
            .secure(true)
            .same_site(SameSite::Strict);

        assert_eq!(
            encode("foo", "bar", &options),
            "foo=bar; Max-Age=10; Expires=Thu, 01 Jan 1970 00:00:00 GMT; \
             Domain=www.rust-lang.org; Path=/sub; Secure; HttpOnly; SameSite=Strict"
        );
    }

    #[test]
    fn encode_zero_max_age() {
        let options = CookieOptions::new().max_age(Duration::ZERO);
        assert_eq!(encode("a", "", &options), "a=; Max-Age=0; Path=/; HttpOnly");
    }

    #[test]
    fn encode_escapes_name_and_value() {
        let directive = encode("foo !?=", "bar;; a", &CookieOptions::new().http_only(false));
        assert_eq!(directive, "foo%20!%3F%3D=bar%3B%3B%20a; Path=/");

        let directive = encode("name", "中文", &CookieOptions::new().http_only(false));
        assert_eq!(directive, "name=%E4%B8%AD%E6%96%87; Path=/");
    }

    #[test]
    fn encoded_value_decodes_back() {
        let directive = encode("session", "a b;c=d.e", &CookieOptions::default());
        let pair = directive.split("; ").next().unwrap();
        assert_eq!(decode(Some(pair)).get("session"), Some("a b;c=d.e"));
    }
}
