//! Accumulation of outbound `Set-Cookie` directives.
//!
//! A [`Jar`] is created for one response, filled through chained calls, and
//! consumed by [`Jar::apply()`], which appends one `Set-Cookie` header per
//! directive.

use http::header::{HeaderMap, HeaderValue, SET_COOKIE};
use http::Response;

use crate::{codec, CookieOptions, Error, Prefix, SignedCookieConfig, Signer};

/// An ordered collection of pending `Set-Cookie` directives.
///
/// # Example
///
/// ```rust
/// use cookie_guard::{Algorithm, CookieOptions, Jar, Signer};
/// use http::{header::SET_COOKIE, Response};
///
/// let signer = Signer::new("secret", Algorithm::Sha256).unwrap();
/// let mut jar = Jar::with_signer(signer);
/// jar.set("theme", "dark", None)
///     .set_signed("user", "42", CookieOptions::new().secure(true))?
///     .delete("legacy", None);
///
/// let response = jar.apply(Response::new(()));
/// let cookies: Vec<_> = response.headers().get_all(SET_COOKIE).iter().collect();
/// assert_eq!(cookies.len(), 3);
/// assert_eq!(cookies[0], "theme=dark; Path=/; HttpOnly");
/// # Ok::<(), cookie_guard::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Jar {
    directives: Vec<String>,
    signer: Option<Signer>,
}

impl Jar {
    /// Creates an empty jar that cannot sign.
    ///
    /// [`Jar::set_signed()`] on such a jar fails with [`Error::MissingSecret`].
    pub fn new() -> Self {
        Jar::default()
    }

    /// Creates an empty jar that signs with `signer`.
    pub fn with_signer(signer: Signer) -> Self {
        Jar { directives: Vec::new(), signer: Some(signer) }
    }

    /// Creates an empty jar that signs as `config` describes.
    pub fn from_config(config: &SignedCookieConfig) -> Result<Self, Error> {
        config.signer().map(Jar::with_signer)
    }

    /// The signer used by [`Jar::set_signed()`], if any.
    pub fn signer(&self) -> Option<&Signer> {
        self.signer.as_ref()
    }

    /// Queues a cookie with a plaintext value.
    pub fn set<O>(&mut self, name: &str, value: &str, options: O) -> &mut Self
    where
        O: Into<Option<CookieOptions>>,
    {
        let options = options.into().unwrap_or_default();
        self.directives.push(codec::encode(name, value, &options));
        self
    }

    /// Queues a cookie whose value is signed.
    ///
    /// Fails with [`Error::MissingSecret`] and leaves `self` untouched if the
    /// jar was created without a signer.
    ///
    /// ```rust
    /// use cookie_guard::{Error, Jar};
    ///
    /// let mut jar = Jar::new();
    /// assert_eq!(jar.set_signed("user", "42", None).unwrap_err(), Error::MissingSecret);
    /// assert!(jar.is_empty());
    /// ```
    pub fn set_signed<O>(&mut self, name: &str, value: &str, options: O) -> Result<&mut Self, Error>
    where
        O: Into<Option<CookieOptions>>,
    {
        let signed = match self.signer {
            Some(ref signer) => signer.sign(value),
            None => return Err(Error::MissingSecret),
        };

        Ok(self.set(name, &signed, options))
    }

    /// Queues a plaintext cookie named `name` with `prefix` prepended, with
    /// `options` made to [conform](Prefix::conform()) to the prefix.
    ///
    /// ```rust
    /// use cookie_guard::{CookieOptions, Jar, Prefix};
    ///
    /// let mut jar = Jar::new();
    /// jar.set_prefixed(Prefix::Host, "id", "1", CookieOptions::new().domain("x.com"));
    /// assert_eq!(jar.directives().next(), Some("__Host-id=1; Path=/; Secure; HttpOnly"));
    /// ```
    pub fn set_prefixed<O>(&mut self, prefix: Prefix, name: &str, value: &str, options: O) -> &mut Self
    where
        O: Into<Option<CookieOptions>>,
    {
        let options = prefix.conform(options.into().unwrap_or_default());
        self.set(&prefix.apply(name), value, options)
    }

    /// Queues a directive that removes the cookie `name` from the client.
    ///
    /// The directive carries an empty value, `Max-Age=0`, and an `Expires` at
    /// the epoch. Only `domain` and `path` are taken from `options`; they must
    /// match those the cookie was set with.
    ///
    /// ```rust
    /// use cookie_guard::{CookieOptions, Jar};
    ///
    /// let mut jar = Jar::new();
    /// jar.delete("session", CookieOptions::new().path("/app").secure(true));
    /// assert_eq!(
    ///     jar.directives().next(),
    ///     Some("session=; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/app; HttpOnly")
    /// );
    /// ```
    pub fn delete<O>(&mut self, name: &str, options: O) -> &mut Self
    where
        O: Into<Option<CookieOptions>>,
    {
        let options = options.into().unwrap_or_default().removal();
        self.set(name, "", options)
    }

    /// Queues a directive that removes the cookie `name` with `prefix`
    /// prepended.
    ///
    /// Like [`Jar::delete()`], but the removal options are made to
    /// [conform](Prefix::conform()) to the prefix so that clients accept the
    /// directive.
    ///
    /// ```rust
    /// use cookie_guard::{CookieOptions, Jar, Prefix};
    ///
    /// let mut jar = Jar::new();
    /// jar.delete_prefixed(Prefix::Secure, "token", CookieOptions::new().path("/api"));
    /// assert_eq!(
    ///     jar.directives().next(),
    ///     Some("__Secure-token=; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/api; Secure; HttpOnly")
    /// );
    /// ```
    pub fn delete_prefixed<O>(&mut self, prefix: Prefix, name: &str, options: O) -> &mut Self
    where
        O: Into<Option<CookieOptions>>,
    {
        let options = prefix.conform(options.into().unwrap_or_default().removal());
        self.set(&prefix.apply(name), "", options)
    }

    /// The number of queued directives.
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Returns `true` if no directive is queued.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Iterates over the queued directives in the order they were added.
    pub fn directives(&self) -> impl Iterator<Item = &str> + '_ {
        self.directives.iter().map(String::as_str)
    }

    /// Appends one `Set-Cookie` header per queued directive to `response`.
    ///
    /// Existing `Set-Cookie` headers are kept. An empty jar returns
    /// `response` as is.
    pub fn apply<B>(self, mut response: Response<B>) -> Response<B> {
        if !self.is_empty() {
            self.apply_to_headers(response.headers_mut());
        }

        response
    }

    /// Appends one `Set-Cookie` header per queued directive to `headers`.
    ///
    /// A directive that is not a valid header value, which only happens when
    /// a `domain` or `path` contains control characters, is skipped.
    pub fn apply_to_headers(self, headers: &mut HeaderMap) {
        for directive in self.directives {
            match HeaderValue::try_from(directive) {
                Ok(value) => {
                    headers.append(SET_COOKIE, value);
                }
                Err(_) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("skipping Set-Cookie directive that is not a valid header value");
                }
            }
        }
    }
}
