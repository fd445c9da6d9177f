use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The `SameSite` cookie attribute.
///
/// A cookie with a `SameSite` attribute has restrictions imposed on when it
/// is sent to the origin server in a cross-site request. If the `SameSite`
/// attribute is "Strict", then the cookie is never sent in cross-site requests.
/// If the `SameSite` attribute is "Lax", the cookie is only sent in cross-site
/// requests with "safe" HTTP methods, i.e, `GET`, `HEAD`, `OPTIONS`, `TRACE`.
/// If the `SameSite` attribute is "None", the cookie is sent in all cross-site
/// requests; clients require such cookies to also be `Secure`.
///
/// An unset attribute is modeled as `Option::<SameSite>::None` in
/// [`CookieOptions`](crate::CookieOptions), never as a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SameSite {
    /// The "Strict" `SameSite` attribute.
    Strict,
    /// The "Lax" `SameSite` attribute.
    Lax,
    /// The "None" `SameSite` attribute.
    None,
}

impl SameSite {
    /// Returns `true` if `self` is `SameSite::Strict` and `false` otherwise.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookie_guard::SameSite;
    ///
    /// let strict = SameSite::Strict;
    /// assert!(strict.is_strict());
    /// assert!(!strict.is_lax());
    /// assert!(!strict.is_none());
    /// ```
    #[inline]
    pub fn is_strict(&self) -> bool {
        matches!(self, SameSite::Strict)
    }

    /// Returns `true` if `self` is `SameSite::Lax` and `false` otherwise.
    #[inline]
    pub fn is_lax(&self) -> bool {
        matches!(self, SameSite::Lax)
    }

    /// Returns `true` if `self` is `SameSite::None` and `false` otherwise.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, SameSite::None)
    }

    /// The attribute value as it appears in a `Set-Cookie` header.
    pub fn as_str(&self) -> &'static str {
        match *self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SameSite {
    type Err = Error;

    /// Parses the attribute value, ignoring ASCII case.
    ///
    /// ```rust
    /// use cookie_guard::SameSite;
    ///
    /// assert_eq!("lax".parse::<SameSite>().unwrap(), SameSite::Lax);
    /// assert!("sometimes".parse::<SameSite>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("strict") {
            Ok(SameSite::Strict)
        } else if s.eq_ignore_ascii_case("lax") {
            Ok(SameSite::Lax)
        } else if s.eq_ignore_ascii_case("none") {
            Ok(SameSite::None)
        } else {
            Err(Error::InvalidSameSite(s.to_owned()))
        }
    }
}
