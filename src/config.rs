use crate::{Algorithm, Error, Signer};

/// Configuration of the signed-cookie stage.
///
/// The secret is supplied by the host; this crate never reads it from the
/// environment. With the `serde` feature enabled the configuration can be
/// deserialized from the host's own configuration source:
///
/// ```toml
/// secret = "a long random string"
/// algorithm = "sha256"
/// ```
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignedCookieConfig {
    /// The secret key. Required and non-empty.
    pub secret: String,
    /// The digest algorithm name, `sha256` when unset.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub algorithm: Option<String>,
}

impl SignedCookieConfig {
    /// Creates a configuration with the default algorithm.
    pub fn new<S: Into<String>>(secret: S) -> Self {
        SignedCookieConfig { secret: secret.into(), algorithm: None }
    }

    /// Sets the algorithm name.
    pub fn with_algorithm<A: Into<String>>(mut self, algorithm: A) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    /// Builds the [`Signer`] this configuration describes.
    ///
    /// ```rust
    /// use cookie_guard::{Algorithm, Error, SignedCookieConfig};
    ///
    /// let signer = SignedCookieConfig::new("secret").signer().unwrap();
    /// assert_eq!(signer.algorithm(), Algorithm::Sha256);
    ///
    /// let err = SignedCookieConfig::new("").signer().unwrap_err();
    /// assert_eq!(err, Error::MissingSecret);
    /// ```
    pub fn signer(&self) -> Result<Signer, Error> {
        let algorithm = match self.algorithm.as_deref() {
            Some(name) => name.parse()?,
            None => Algorithm::default(),
        };

        Signer::new(&self.secret, algorithm)
    }
}

impl std::fmt::Debug for SignedCookieConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedCookieConfig")
            .field("secret", &"[redacted]")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
