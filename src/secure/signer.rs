use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

use crate::secure::Algorithm;
use crate::Error;

/// Separates a value from its tag in a signed value.
const SEPARATOR: char = '.';

/// Number of random bytes in a secret from [`generate_secret()`].
const SECRET_LEN: usize = 64;

macro_rules! hmac_tag {
    ($digest:ty, $key:expr, $value:expr) => {{
        let mut mac = Hmac::<$digest>::new_from_slice($key).expect("HMAC accepts any key length");
        mac.update($value);
        mac.finalize().into_bytes().to_vec()
    }};
}

/// Signs and verifies cookie values with a secret and an [`Algorithm`].
///
/// # Example
///
/// ```rust
/// use cookie_guard::{Algorithm, Signer};
///
/// let signer = Signer::new("keyboard cat", Algorithm::Sha256).unwrap();
/// let signed = signer.sign("user.42");
/// assert!(signed.starts_with("user.42."));
/// assert_eq!(signer.verify(&signed), Some("user.42"));
///
/// // A tampered value does not verify.
/// let forged = signed.replacen("42", "43", 1);
/// assert_eq!(signer.verify(&forged), None);
/// ```
#[derive(Clone)]
pub struct Signer {
    secret: Arc<[u8]>,
    algorithm: Algorithm,
}

impl Signer {
    /// Creates a signer. Fails with [`Error::MissingSecret`] if `secret` is
    /// empty.
    pub fn new<S: AsRef<[u8]>>(secret: S, algorithm: Algorithm) -> Result<Self, Error> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(Error::MissingSecret);
        }

        Ok(Signer { secret: Arc::from(secret), algorithm })
    }

    /// The algorithm `self` signs with.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn tag(&self, value: &str) -> String {
        let key = &*self.secret;
        let bytes = value.as_bytes();
        let tag = match self.algorithm {
            Algorithm::Sha256 => hmac_tag!(Sha256, key, bytes),
            Algorithm::Sha384 => hmac_tag!(Sha384, key, bytes),
            Algorithm::Sha512 => hmac_tag!(Sha512, key, bytes),
        };

        URL_SAFE_NO_PAD.encode(tag)
    }

    /// Returns `value` followed by `.` and its tag.
    pub fn sign(&self, value: &str) -> String {
        let tag = self.tag(value);
        let mut signed = String::with_capacity(value.len() + 1 + tag.len());
        signed.push_str(value);
        signed.push(SEPARATOR);
        signed.push_str(&tag);
        signed
    }

    /// Verifies a value produced by [`Signer::sign()`], returning the
    /// original value if the tag matches and `None` otherwise.
    ///
    /// The tag is everything after the last `.`, so values that contain `.`
    /// round-trip. Tags are compared in constant time; only a length mismatch
    /// returns early, and tag length is fixed per algorithm.
    pub fn verify<'v>(&self, signed: &'v str) -> Option<&'v str> {
        let (value, tag) = signed.rsplit_once(SEPARATOR)?;
        let expected = self.tag(value);
        if tag.len() != expected.len() {
            return None;
        }

        if bool::from(tag.as_bytes().ct_eq(expected.as_bytes())) {
            Some(value)
        } else {
            None
        }
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("secret", &"[redacted]")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// Signs `value` with `secret` using `algorithm`.
///
/// Unlike [`Signer::new()`], an empty secret is not rejected.
///
/// ```rust
/// use cookie_guard::{secure, Algorithm};
///
/// let signed = secure::sign("hello", "secret", Algorithm::Sha256);
/// assert_eq!(signed, "hello.iKqz7ejTrflNJquQ07r9SiCDBww7zOnAFO4EpEOEfAs");
/// ```
pub fn sign<S: AsRef<[u8]>>(value: &str, secret: S, algorithm: Algorithm) -> String {
    let signer = Signer { secret: Arc::from(secret.as_ref()), algorithm };
    signer.sign(value)
}

/// Verifies `signed` with `secret` using `algorithm`. See [`Signer::verify()`].
pub fn verify<S: AsRef<[u8]>>(signed: &str, secret: S, algorithm: Algorithm) -> Option<&str> {
    let signer = Signer { secret: Arc::from(secret.as_ref()), algorithm };
    signer.verify(signed)
}

/// Generates a random secret suitable for signing: 64 bytes from the
/// thread-local CSPRNG, encoded as URL-safe base64.
pub fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
