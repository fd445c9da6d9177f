//! HTTP cookie decoding, HMAC-signed cookie values, and `Set-Cookie`
//! construction for request pipelines.
//!
//! The crate has four parts:
//!
//!   * [`codec`] decodes a `Cookie` request header into a [`CookieMap`] and
//!     encodes one `Set-Cookie` directive from a name, a value, and
//!     [`CookieOptions`].
//!   * [`secure`] signs values with a keyed HMAC and verifies them in
//!     constant time. Signing provides integrity, not confidentiality: the
//!     value stays readable by the client.
//!   * [`split`] separates the cookies carrying a valid signature from the
//!     rest.
//!   * [`Jar`] accumulates outbound directives, plain or signed, and appends
//!     them to a response as individual `Set-Cookie` headers.
//!
//! [`middleware`] wires these into a [tower] `Layer` for use with any
//! `http`-based server.
//!
//! # Usage
//!
//! Add the following to the `[dependencies]` section of your `Cargo.toml`:
//!
//! ```toml
//! cookie-guard = "0.1"
//! ```
//!
//! # Example
//!
//! ```rust
//! use cookie_guard::{codec, split, Algorithm, CookieOptions, Jar, Signer};
//! use http::{header::SET_COOKIE, Response};
//!
//! let signer = Signer::new("a long, random secret", Algorithm::Sha256)?;
//!
//! // Outbound: queue cookies and apply them to a response.
//! let mut jar = Jar::with_signer(signer.clone());
//! jar.set("theme", "dark", None)
//!     .set_signed("user", "42", CookieOptions::new().secure(true))?;
//! let response = jar.apply(Response::new(()));
//! assert_eq!(response.headers().get_all(SET_COOKIE).iter().count(), 2);
//!
//! // Inbound: decode the header the client sends back and verify it.
//! let header = format!("theme=dark; user={}", signer.sign("42"));
//! let parts = split::partition(codec::decode(Some(&header)), &signer);
//! assert_eq!(parts.signed.get("user"), Some("42"));
//! assert_eq!(parts.plain.get("theme"), Some("dark"));
//! # Ok::<(), cookie_guard::Error>(())
//! ```
//!
//! # Features
//!
//! * **tracing** (enabled by default)
//!
//!   Emits [`tracing`](https://docs.rs/tracing) events from the middleware,
//!   the splitter, and the jar. Cookie values are never logged.
//!
//! * **serde** (disabled by default)
//!
//!   Implements `Serialize` and `Deserialize` for [`SignedCookieConfig`],
//!   [`Algorithm`], and [`SameSite`].
//!
//! [tower]: https://docs.rs/tower

#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod codec;
mod config;
mod error;
mod expires;
mod jar;
mod map;
pub mod middleware;
mod options;
mod prefix;
mod same_site;
pub mod secure;
pub mod split;

pub use crate::config::SignedCookieConfig;
pub use crate::error::Error;
pub use crate::expires::Expires;
pub use crate::jar::Jar;
pub use crate::map::{CookieMap, Iter};
pub use crate::options::CookieOptions;
pub use crate::prefix::Prefix;
pub use crate::same_site::SameSite;
pub use crate::secure::{Algorithm, Signer};

pub use time;
