#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let cookies = cookie_guard::codec::decode(Some(data));
    for (name, _) in &cookies {
        assert!(!name.is_empty());
        assert_eq!(name, name.trim());
    }
});
