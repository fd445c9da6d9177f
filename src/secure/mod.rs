//! Integrity protection for cookie values.
//!
//! A signed value is `value + "." + tag`, where `tag` is the URL-safe,
//! unpadded base64 encoding of `HMAC(secret, value)`. The value is sent in
//! plaintext: signing proves that a holder of the secret produced it but does
//! not hide it.

#[macro_use]
mod macros;
mod algorithm;
mod signer;

pub use self::algorithm::Algorithm;
pub use self::signer::{generate_secret, sign, verify, Signer};
