use crate::CookieOptions;

/// [HTTP RFC6265 draft] cookie name prefixes.
///
/// A client only stores a prefixed cookie if its attributes meet the prefix's
/// requirements. [`Prefix::conform()`] adjusts options so that they do, and
/// [`Jar::set_prefixed()`](crate::Jar::set_prefixed()) applies both the name
/// prefix and the adjustment.
///
/// **Note:** Cookie prefixes are specified in an HTTP draft! Their meaning and
/// definition are subject to change.
///
/// [HTTP RFC6265 draft]:
/// https://datatracker.ietf.org/doc/html/draft-ietf-httpbis-rfc6265bis#name-cookie-name-prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// The [`"__Host-"`] prefix: the cookie is `Secure`, has `Path=/`, and
    /// has no `Domain`.
    ///
    /// [`"__Host-"`]:
    /// https://datatracker.ietf.org/doc/html/draft-ietf-httpbis-rfc6265bis#name-the-__host-prefix
    Host,
    /// The [`"__Secure-"`] prefix: the cookie is `Secure`.
    ///
    /// [`"__Secure-"`]:
    /// https://datatracker.ietf.org/doc/html/draft-ietf-httpbis-rfc6265bis#name-the-__secure-prefix
    Secure,
}

impl Prefix {
    /// The prefix string to prepend.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Prefix::Host => "__Host-",
            Prefix::Secure => "__Secure-",
        }
    }

    /// Returns `name` with `self` prepended.
    ///
    /// ```rust
    /// use cookie_guard::Prefix;
    ///
    /// assert_eq!(Prefix::Host.apply("id"), "__Host-id");
    /// assert_eq!(Prefix::Secure.apply("id"), "__Secure-id");
    /// ```
    pub fn apply(&self, name: &str) -> String {
        format!("{}{}", self.as_str(), name)
    }

    /// Returns `name` without `self`, or `None` if `name` isn't prefixed with
    /// `self`. The match is case-sensitive.
    pub fn strip<'n>(&self, name: &'n str) -> Option<&'n str> {
        name.strip_prefix(self.as_str())
    }

    /// Modifies `options` so they conform to the requirements of `self`.
    ///
    /// ```rust
    /// use cookie_guard::{CookieOptions, Prefix};
    ///
    /// let options = CookieOptions::new()
    ///     .secure(false)
    ///     .path("/foo/bar")
    ///     .domain("rocket.rs");
    ///
    /// let host = Prefix::Host.conform(options.clone());
    /// assert!(host.get_secure());
    /// assert_eq!(host.get_path(), Some("/"));
    /// assert_eq!(host.get_domain(), None);
    ///
    /// let secure = Prefix::Secure.conform(options);
    /// assert!(secure.get_secure());
    /// assert_eq!(secure.get_path(), Some("/foo/bar"));
    /// assert_eq!(secure.get_domain(), Some("rocket.rs"));
    /// ```
    pub fn conform(&self, options: CookieOptions) -> CookieOptions {
        match *self {
            Prefix::Host => options.secure(true).path("/").unset_domain(),
            Prefix::Secure => options.secure(true),
        }
    }
}
