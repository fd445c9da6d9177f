use time::Duration;

use crate::{Expires, SameSite};

/// Attributes of a `Set-Cookie` directive.
///
/// `CookieOptions` follows the builder pattern. Every attribute is unset by
/// default; [`encode`](crate::codec::encode()) then emits `Path=/` and
/// `HttpOnly` and nothing else:
///
/// ```rust
/// use cookie_guard::{codec, CookieOptions, SameSite};
/// use time::Duration;
///
/// let options = CookieOptions::new()
///     .domain("www.rust-lang.org")
///     .path("/docs")
///     .secure(true)
///     .max_age(Duration::hours(1))
///     .same_site(SameSite::Lax);
///
/// assert_eq!(
///     codec::encode("name", "value", &options),
///     "name=value; Max-Age=3600; Domain=www.rust-lang.org; Path=/docs; Secure; HttpOnly; SameSite=Lax"
/// );
/// ```
///
/// `HttpOnly` is on unless explicitly disabled. The field is tri-state so that
/// an unset value and an explicit `false` stay distinguishable; see
/// [`CookieOptions::http_only_or_default()`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieOptions {
    /// The cookie's expiration, if any.
    expires: Option<Expires>,
    /// The cookie's maximum age, if any.
    max_age: Option<Duration>,
    /// The cookie's domain, if any.
    domain: Option<String>,
    /// The cookie's path, if any. Encoding falls back to `/`.
    path: Option<String>,
    /// Whether the cookie is marked `Secure`.
    secure: bool,
    /// Whether the cookie is marked `HttpOnly`. `None` means "use the default".
    http_only: Option<bool>,
    /// The cookie's `SameSite` attribute, if any.
    same_site: Option<SameSite>,
}

impl CookieOptions {
    /// The path used when none is set.
    pub const DEFAULT_PATH: &'static str = "/";

    /// Creates a new `CookieOptions` with every attribute unset.
    pub fn new() -> Self {
        CookieOptions::default()
    }

    /// Sets the `Expires` attribute.
    ///
    /// Anything convertible to an [`Expires`] is accepted, including
    /// [`time::OffsetDateTime`], [`std::time::SystemTime`], and `i64` Unix
    /// timestamps in milliseconds.
    ///
    /// ```rust
    /// use cookie_guard::{CookieOptions, Expires};
    ///
    /// let options = CookieOptions::new().expires(0_i64);
    /// assert_eq!(options.get_expires(), Some(Expires::EPOCH));
    /// ```
    #[inline]
    pub fn expires<E: Into<Expires>>(mut self, when: E) -> Self {
        self.expires = Some(when.into());
        self
    }

    /// Sets the `Max-Age` attribute. A zero duration is emitted as
    /// `Max-Age=0`, which asks clients to discard the cookie immediately.
    #[inline]
    pub fn max_age(mut self, value: Duration) -> Self {
        self.max_age = Some(value);
        self
    }

    /// Sets the `Domain` attribute.
    #[inline]
    pub fn domain<D: Into<String>>(mut self, value: D) -> Self {
        self.domain = Some(value.into());
        self
    }

    /// Sets the `Path` attribute.
    #[inline]
    pub fn path<P: Into<String>>(mut self, value: P) -> Self {
        self.path = Some(value.into());
        self
    }

    /// Sets whether the `Secure` attribute is emitted.
    #[inline]
    pub fn secure(mut self, value: bool) -> Self {
        self.secure = value;
        self
    }

    /// Sets whether the `HttpOnly` attribute is emitted.
    ///
    /// ```rust
    /// use cookie_guard::CookieOptions;
    ///
    /// assert_eq!(CookieOptions::new().get_http_only(), None);
    /// assert!(CookieOptions::new().http_only_or_default());
    ///
    /// let options = CookieOptions::new().http_only(false);
    /// assert_eq!(options.get_http_only(), Some(false));
    /// assert!(!options.http_only_or_default());
    /// ```
    #[inline]
    pub fn http_only(mut self, value: bool) -> Self {
        self.http_only = Some(value);
        self
    }

    /// Sets the `SameSite` attribute.
    #[inline]
    pub fn same_site(mut self, value: SameSite) -> Self {
        self.same_site = Some(value);
        self
    }

    /// Returns the `Expires` attribute, if set.
    #[inline]
    pub fn get_expires(&self) -> Option<Expires> {
        self.expires
    }

    /// Returns the `Max-Age` attribute, if set.
    #[inline]
    pub fn get_max_age(&self) -> Option<Duration> {
        self.max_age
    }

    /// Returns the `Domain` attribute, if set.
    #[inline]
    pub fn get_domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Returns the `Path` attribute, if set.
    #[inline]
    pub fn get_path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the `Path` attribute, or [`CookieOptions::DEFAULT_PATH`].
    #[inline]
    pub fn path_or_default(&self) -> &str {
        self.get_path().unwrap_or(Self::DEFAULT_PATH)
    }

    /// Returns whether `Secure` is set.
    #[inline]
    pub fn get_secure(&self) -> bool {
        self.secure
    }

    /// Returns the explicitly configured `HttpOnly` value, if any.
    #[inline]
    pub fn get_http_only(&self) -> Option<bool> {
        self.http_only
    }

    /// Resolves `HttpOnly`: `true` unless explicitly set to `false`.
    #[inline]
    pub fn http_only_or_default(&self) -> bool {
        self.http_only.unwrap_or(true)
    }

    /// Returns the `SameSite` attribute, if set.
    #[inline]
    pub fn get_same_site(&self) -> Option<SameSite> {
        self.same_site
    }

    pub(crate) fn unset_domain(mut self) -> Self {
        self.domain = None;
        self
    }

    /// Options that remove a cookie from the client: `Max-Age=0` together
    /// with an `Expires` at the epoch. Only `domain` and `path` carry over
    /// from `self`, since a client matches the cookie to discard by name,
    /// domain, and path.
    pub(crate) fn removal(&self) -> Self {
        CookieOptions {
            expires: Some(Expires::EPOCH),
            max_age: Some(Duration::ZERO),
            domain: self.domain.clone(),
            path: self.path.clone(),
            ..CookieOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = CookieOptions::new();
        assert_eq!(options.get_expires(), None);
        assert_eq!(options.get_max_age(), None);
        assert_eq!(options.get_domain(), None);
        assert_eq!(options.path_or_default(), "/");
        assert!(!options.get_secure());
        assert!(options.http_only_or_default());
        assert_eq!(options.get_same_site(), None);
    }

    #[test]
    fn removal_keeps_only_scope() {
        let options = CookieOptions::new()
            .domain("example.com")
            .path("/account")
            .secure(true)
            .http_only(false)
            .same_site(SameSite::Strict)
            .max_age(Duration::days(7));

        let removal = options.removal();
        assert_eq!(removal.get_domain(), Some("example.com"));
        assert_eq!(removal.get_path(), Some("/account"));
        assert_eq!(removal.get_max_age(), Some(Duration::ZERO));
        assert_eq!(removal.get_expires(), Some(Expires::EPOCH));
        assert!(!removal.get_secure());
        assert_eq!(removal.get_http_only(), None);
        assert_eq!(removal.get_same_site(), None);
    }
}
