#![no_main]

use cookie_guard::{Algorithm, Signer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let signer = Signer::new("fuzzing secret", Algorithm::Sha256).unwrap();
    let _ = signer.verify(data);

    let signed = signer.sign(data);
    assert_eq!(signer.verify(&signed), Some(data));
});
