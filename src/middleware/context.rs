use http::{HeaderMap, Request};

use crate::{codec, split, CookieMap, Jar, Signer};

/// The cookies of one request, as seen by handlers downstream of a
/// [`CookieLayer`](super::CookieLayer).
///
/// The stage builds a `CookieContext` before calling the inner service and
/// hands it over in the request's extensions. It is never modified afterwards.
#[derive(Debug, Clone, Default)]
pub struct CookieContext {
    cookies: CookieMap,
    signed_cookies: CookieMap,
    signer: Option<Signer>,
}

impl CookieContext {
    /// Decodes the `Cookie` headers in `headers`. With a `signer`, cookies
    /// whose signature verifies are moved to
    /// [`signed_cookies()`](Self::signed_cookies()).
    pub fn from_headers(headers: &HeaderMap, signer: Option<&Signer>) -> Self {
        let cookies = codec::decode_headers(headers);
        match signer {
            Some(signer) => {
                let parts = split::partition(cookies, signer);
                CookieContext {
                    cookies: parts.plain,
                    signed_cookies: parts.signed,
                    signer: Some(signer.clone()),
                }
            }
            None => CookieContext { cookies, ..CookieContext::default() },
        }
    }

    /// The context a [`CookieLayer`](super::CookieLayer) attached to
    /// `request`, if any.
    pub fn of<B>(request: &Request<B>) -> Option<&CookieContext> {
        request.extensions().get::<CookieContext>()
    }

    /// Cookies that did not carry a valid signature, including every cookie
    /// when the stage has no secret.
    pub fn cookies(&self) -> &CookieMap {
        &self.cookies
    }

    /// Cookies whose signature verified, with the signature removed. Always
    /// empty for the plain stage.
    pub fn signed_cookies(&self) -> &CookieMap {
        &self.signed_cookies
    }

    /// A fresh [`Jar`] that signs with the stage's secret, if it has one.
    ///
    /// Insert the filled jar into the response's extensions and the stage
    /// applies it on the way out.
    pub fn jar(&self) -> Jar {
        match self.signer {
            Some(ref signer) => Jar::with_signer(signer.clone()),
            None => Jar::new(),
        }
    }
}
