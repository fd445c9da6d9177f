use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The digest used to compute a cookie's HMAC.
///
/// Signing and verification must agree on the algorithm. A value signed with
/// one algorithm never verifies under another: the tags differ in length, so
/// such a value is rejected as tampered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// HMAC-SHA-256. A tag is 43 base64 characters.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "sha256", alias = "SHA-256"))]
    Sha256,
    /// HMAC-SHA-384. A tag is 64 base64 characters.
    #[cfg_attr(feature = "serde", serde(rename = "sha384", alias = "SHA-384"))]
    Sha384,
    /// HMAC-SHA-512. A tag is 86 base64 characters.
    #[cfg_attr(feature = "serde", serde(rename = "sha512", alias = "SHA-512"))]
    Sha512,
}

impl Algorithm {
    /// The canonical lowercase name, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Parses `sha256`, `sha384`, or `sha512`, ignoring ASCII case and an
    /// optional dash (`SHA-256`).
    ///
    /// ```rust
    /// use cookie_guard::Algorithm;
    ///
    /// assert_eq!("sha256".parse::<Algorithm>().unwrap(), Algorithm::Sha256);
    /// assert_eq!("SHA-512".parse::<Algorithm>().unwrap(), Algorithm::Sha512);
    /// assert!("md5".parse::<Algorithm>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_lowercase().replacen("sha-", "sha", 1);
        match normalized.as_str() {
            "sha256" => Ok(Algorithm::Sha256),
            "sha384" => Ok(Algorithm::Sha384),
            "sha512" => Ok(Algorithm::Sha512),
            _ => Err(Error::UnknownAlgorithm(s.to_owned())),
        }
    }
}
