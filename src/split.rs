//! Separation of verified signed cookies from plain ones.

use crate::{CookieMap, Signer};

/// The result of [`partition()`]: every input cookie lands in exactly one of
/// the two maps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partitioned {
    /// Cookies whose signature verified, mapped to their unsigned values.
    pub signed: CookieMap,
    /// Every other cookie, with its value unchanged.
    pub plain: CookieMap,
}

/// Splits `cookies` into those carrying a valid signature under `signer` and
/// the rest.
///
/// A cookie that was never signed, was tampered with, or was signed with a
/// different secret or algorithm lands in `plain` with its raw value. None of
/// those cases is an error.
///
/// # Example
///
/// ```rust
/// use cookie_guard::{codec, split, Algorithm, Signer};
///
/// let signer = Signer::new("secret", Algorithm::Sha256).unwrap();
/// let header = format!("theme=dark; user={}", signer.sign("42"));
///
/// let parts = split::partition(codec::decode(Some(&header)), &signer);
/// assert_eq!(parts.signed.get("user"), Some("42"));
/// assert_eq!(parts.plain.get("theme"), Some("dark"));
/// assert!(!parts.plain.contains("user"));
/// ```
pub fn partition(cookies: CookieMap, signer: &Signer) -> Partitioned {
    let mut parts = Partitioned::default();
    for (name, value) in cookies {
        match signer.verify(&value) {
            Some(unsigned) => {
                let unsigned = unsigned.to_owned();
                parts.signed.insert(name, unsigned);
            }
            None => {
                #[cfg(feature = "tracing")]
                if value.contains('.') {
                    tracing::trace!(cookie = %name, "cookie signature did not verify");
                }

                parts.plain.insert(name, value);
            }
        }
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{codec, Algorithm};

    fn signer() -> Signer {
        Signer::new("tobi is a ferret", Algorithm::Sha256).unwrap()
    }

    #[test]
    fn signed_and_plain() {
        let signer = signer();
        let header = format!("plain=hello; signed={}", signer.sign("world"));
        let parts = partition(codec::decode(Some(&header)), &signer);

        assert_eq!(parts.signed.len(), 1);
        assert_eq!(parts.signed.get("signed"), Some("world"));
        assert_eq!(parts.plain.len(), 1);
        assert_eq!(parts.plain.get("plain"), Some("hello"));
    }

    #[test]
    fn tampered_goes_to_plain_verbatim() {
        let signer = signer();
        let tampered = signer.sign("user").replacen("user", "root", 1);
        let header = format!("id={}", tampered);
        let parts = partition(codec::decode(Some(&header)), &signer);

        assert!(parts.signed.is_empty());
        assert_eq!(parts.plain.get("id"), Some(tampered.as_str()));
    }

    #[test]
    fn other_secret_goes_to_plain() {
        let other = Signer::new("not the secret", Algorithm::Sha256).unwrap();
        let signed = other.sign("value");
        let cookies: CookieMap = [("a", signed.as_str())].into_iter().collect();
        let parts = partition(cookies, &signer());

        assert!(parts.signed.is_empty());
        assert_eq!(parts.plain.get("a"), Some(signed.as_str()));
    }

    #[test]
    fn partition_is_total_and_disjoint() {
        let signer = signer();
        let cookies: CookieMap = [
            ("a".to_owned(), signer.sign("1")),
            ("b".to_owned(), "2".to_owned()),
            ("c".to_owned(), signer.sign("3.three")),
            ("d".to_owned(), "4.not-a-signature".to_owned()),
        ]
        .into_iter()
        .collect();

        let parts = partition(cookies.clone(), &signer);
        assert_eq!(parts.signed.len() + parts.plain.len(), cookies.len());
        for (name, _) in &cookies {
            assert!(parts.signed.contains(name) ^ parts.plain.contains(name));
        }

        assert_eq!(parts.signed.get("c"), Some("3.three"));
        assert_eq!(parts.plain.get("d"), Some("4.not-a-signature"));
    }

    #[test]
    fn empty_input() {
        let parts = partition(CookieMap::new(), &signer());
        assert_eq!(parts, Partitioned::default());
    }
}
