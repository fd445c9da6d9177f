use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use http::Response;

use crate::Jar;

pin_project_lite::pin_project! {
    /// Response future of [`CookieService`](super::CookieService).
    ///
    /// Resolves to the inner service's output. A [`Jar`] left in the
    /// response's extensions is removed and applied to its headers.
    #[derive(Debug)]
    pub struct ResponseFuture<F> {
        #[pin]
        pub(crate) future: F,
    }
}

impl<F, B, E> Future for ResponseFuture<F>
where
    F: Future<Output = Result<Response<B>, E>>,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let mut response = match this.future.poll(cx) {
            Poll::Ready(Ok(response)) => response,
            Poll::Ready(Err(err)) => return Poll::Ready(Err(err)),
            Poll::Pending => return Poll::Pending,
        };

        if let Some(jar) = response.extensions_mut().remove::<Jar>() {
            #[cfg(feature = "tracing")]
            tracing::debug!(directives = jar.len(), "applying response cookie jar");

            jar.apply_to_headers(response.headers_mut());
        }

        Poll::Ready(Ok(response))
    }
}
