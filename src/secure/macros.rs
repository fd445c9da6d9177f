#[cfg(test)]
macro_rules! assert_round_trip {
    ($signer:expr, $value:expr) => {{
        let signed = $signer.sign($value);
        assert_ne!(signed, $value);
        assert!(signed.starts_with($value));
        assert_eq!($signer.verify(&signed), Some($value));
    }};
}

#[cfg(test)]
macro_rules! assert_tampered {
    ($signer:expr, $signed:expr) => {{
        let signed: &str = $signed;
        assert_eq!($signer.verify(signed), None, "verified: {:?}", signed);
    }};
}
