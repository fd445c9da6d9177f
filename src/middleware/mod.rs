//! Request pipeline stages built on [`tower`](https://docs.rs/tower).
//!
//! [`CookieLayer::plain()`] decodes the request's cookies;
//! [`CookieLayer::signed()`] additionally separates cookies with a valid
//! signature. Either way the result reaches the inner service as a
//! [`CookieContext`] in the request's extensions:
//!
//! ```rust
//! use std::convert::Infallible;
//!
//! use cookie_guard::middleware::{CookieContext, CookieLayer};
//! use cookie_guard::SignedCookieConfig;
//! use http::{Request, Response};
//! use tower_layer::Layer;
//!
//! #[derive(Clone)]
//! struct Hello;
//!
//! impl tower_service::Service<Request<()>> for Hello {
//!     type Response = Response<String>;
//!     type Error = Infallible;
//!     type Future = std::future::Ready<Result<Self::Response, Infallible>>;
//!
//!     fn poll_ready(&mut self, _: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Infallible>> {
//!         std::task::Poll::Ready(Ok(()))
//!     }
//!
//!     fn call(&mut self, req: Request<()>) -> Self::Future {
//!         let context = CookieContext::of(&req).expect("cookie stage ran");
//!         let user = context.signed_cookies().get("user").unwrap_or("stranger");
//!         std::future::ready(Ok(Response::new(format!("hello, {}", user))))
//!     }
//! }
//!
//! let layer = CookieLayer::signed(&SignedCookieConfig::new("secret"))?;
//! let service = layer.layer(Hello);
//! # Ok::<(), cookie_guard::Error>(())
//! ```

mod context;
mod future;

use std::task::{Context, Poll};

use http::{Request, Response};
use tower_layer::Layer;
use tower_service::Service;

use crate::{Error, SignedCookieConfig, Signer};

pub use self::context::CookieContext;
pub use self::future::ResponseFuture;

/// A [`Layer`] that wraps services in a [`CookieService`].
#[derive(Debug, Clone, Default)]
pub struct CookieLayer {
    signer: Option<Signer>,
}

impl CookieLayer {
    /// The plain-cookie stage: every cookie ends up in
    /// [`CookieContext::cookies()`].
    pub fn plain() -> Self {
        CookieLayer { signer: None }
    }

    /// The signed-cookie stage configured by `config`.
    ///
    /// Fails if the secret is empty or the algorithm is unknown.
    pub fn signed(config: &SignedCookieConfig) -> Result<Self, Error> {
        config.signer().map(CookieLayer::with_signer)
    }

    /// The signed-cookie stage using `signer`.
    pub fn with_signer(signer: Signer) -> Self {
        CookieLayer { signer: Some(signer) }
    }
}

impl<S> Layer<S> for CookieLayer {
    type Service = CookieService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CookieService { inner, signer: self.signer.clone() }
    }
}

/// Middleware that attaches a [`CookieContext`] to each request and applies
/// a [`Jar`](crate::Jar) found in each response's extensions.
#[derive(Debug, Clone)]
pub struct CookieService<S> {
    inner: S,
    signer: Option<Signer>,
}

impl<S> CookieService<S> {
    /// Wraps `inner` in the plain-cookie stage.
    pub fn new(inner: S) -> Self {
        CookieService { inner, signer: None }
    }

    /// Wraps `inner` in the signed-cookie stage using `signer`.
    pub fn with_signer(inner: S, signer: Signer) -> Self {
        CookieService { inner, signer: Some(signer) }
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CookieService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = ResponseFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, fields(http.uri = %req.uri(), http.method = %req.method()))
    )]
    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let context = CookieContext::from_headers(req.headers(), self.signer.as_ref());

        #[cfg(feature = "tracing")]
        tracing::debug!(
            cookies = context.cookies().len(),
            signed = context.signed_cookies().len(),
            "decoded request cookies"
        );

        req.extensions_mut().insert(context);
        ResponseFuture { future: self.inner.call(req) }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::future::{ready, Ready};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use http::header::{COOKIE, SET_COOKIE};
    use http::StatusCode;

    use super::*;
    use crate::{Algorithm, CookieMap, CookieOptions};

    /// A service that records the context it saw and answers with `respond`.
    #[derive(Clone)]
    struct Handler<F> {
        calls: Arc<AtomicUsize>,
        respond: F,
    }

    impl<F, E> Service<Request<()>> for Handler<F>
    where
        F: FnMut(&CookieContext) -> Result<Response<()>, E>,
    {
        type Response = Response<()>;
        type Error = E;
        type Future = Ready<Result<Response<()>, E>>;

        fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), E>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: Request<()>) -> Self::Future {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let context = CookieContext::of(&req).cloned().unwrap_or_default();
            ready((self.respond)(&context))
        }
    }

    fn handler<F, E>(respond: F) -> (Handler<F>, Arc<AtomicUsize>)
    where
        F: FnMut(&CookieContext) -> Result<Response<()>, E>,
    {
        let calls = Arc::new(AtomicUsize::new(0));
        (Handler { calls: calls.clone(), respond }, calls)
    }

    fn request(cookie: &str) -> Request<()> {
        Request::builder().uri("/").header(COOKIE, cookie).body(()).unwrap()
    }

    fn signer() -> Signer {
        Signer::new("keyboard cat", Algorithm::Sha256).unwrap()
    }

    #[tokio::test]
    async fn plain_stage_exposes_cookies() {
        let seen = Arc::new(std::sync::Mutex::new(CookieMap::new()));
        let sink = seen.clone();
        let (inner, calls) = handler(move |cx: &CookieContext| {
            assert!(cx.signed_cookies().is_empty());
            *sink.lock().unwrap() = cx.cookies().clone();
            Ok::<_, Infallible>(Response::new(()))
        });

        let mut service = CookieLayer::plain().layer(inner);
        let response = service.call(request("a=1; b=%20two")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.get("a"), Some("1"));
        assert_eq!(seen.get("b"), Some(" two"));
    }

    #[tokio::test]
    async fn signed_stage_splits_cookies() {
        let signed = signer().sign("42");
        let tampered = signer().sign("7").replacen('7', "8", 1);
        let header = format!("theme=dark; user={}; admin={}", signed, tampered);

        let (inner, calls) = handler(move |cx: &CookieContext| {
            assert_eq!(cx.signed_cookies().get("user"), Some("42"));
            assert_eq!(cx.signed_cookies().len(), 1);
            assert_eq!(cx.cookies().get("theme"), Some("dark"));
            assert_eq!(cx.cookies().get("admin"), Some(tampered.as_str()));
            assert!(!cx.cookies().contains("user"));
            Ok::<_, Infallible>(Response::new(()))
        });

        let config = SignedCookieConfig::new("keyboard cat");
        let mut service = CookieLayer::signed(&config).unwrap().layer(inner);
        service.call(request(&header)).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_cookie_header_is_empty() {
        let (inner, _) = handler(|cx: &CookieContext| {
            assert!(cx.cookies().is_empty());
            assert!(cx.signed_cookies().is_empty());
            Ok::<_, Infallible>(Response::new(()))
        });

        let mut service = CookieService::with_signer(inner, signer());
        let req = Request::builder().body(()).unwrap();
        service.call(req).await.unwrap();
    }

    #[tokio::test]
    async fn inner_errors_propagate() {
        let (inner, calls) = handler(|_: &CookieContext| Err::<Response<()>, _>("boom"));

        let mut service = CookieService::new(inner);
        let err = service.call(request("a=1")).await.unwrap_err();
        assert_eq!(err, "boom");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn response_jar_is_applied() {
        let (inner, _) = handler(|cx: &CookieContext| {
            let mut jar = cx.jar();
            jar.set("visited", "1", CookieOptions::new().http_only(false));
            jar.set_signed("user", "42", None).unwrap();

            let mut response = Response::builder()
                .header(SET_COOKIE, "existing=1")
                .body(())
                .unwrap();
            response.extensions_mut().insert(jar);
            Ok::<_, Infallible>(response)
        });

        let mut service = CookieService::with_signer(inner, signer());
        let response = service.call(request("")).await.unwrap();

        let cookies: Vec<_> = response.headers().get_all(SET_COOKIE).iter().collect();
        assert_eq!(cookies.len(), 3);
        assert_eq!(cookies[0], "existing=1");
        assert_eq!(cookies[1], "visited=1; Path=/");
        assert_eq!(
            cookies[2].to_str().unwrap(),
            format!("user={}; Path=/; HttpOnly", signer().sign("42"))
        );
        assert!(response.extensions().get::<crate::Jar>().is_none());
    }

    #[test]
    fn signed_stage_rejects_bad_config() {
        assert_eq!(
            CookieLayer::signed(&SignedCookieConfig::new("")).unwrap_err(),
            Error::MissingSecret
        );
        assert_eq!(
            CookieLayer::signed(&SignedCookieConfig::new("s").with_algorithm("crc32")).unwrap_err(),
            Error::UnknownAlgorithm("crc32".into())
        );
    }

    #[test]
    fn plain_context_jar_cannot_sign() {
        let context = CookieContext::from_headers(&http::HeaderMap::new(), None);
        assert!(context.jar().signer().is_none());
    }
}
