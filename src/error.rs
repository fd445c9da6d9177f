/// Errors raised by misconfiguration.
///
/// None of these are produced by untrusted input: decoding a `Cookie` header
/// and verifying signatures never fail. They signal a deployment or
/// programming mistake and are returned at the call site that made it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A signing operation was requested but no secret was configured, or the
    /// configured secret is empty.
    #[error("a non-empty secret is required to sign cookies")]
    MissingSecret,
    /// The digest algorithm name is not one of the supported HMAC digests.
    #[error("unknown signing algorithm `{0}`")]
    UnknownAlgorithm(String),
    /// The `SameSite` value is not one of `Strict`, `Lax`, or `None`.
    #[error("invalid SameSite value `{0}`")]
    InvalidSameSite(String),
}
