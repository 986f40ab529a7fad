#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic on any input.
        let _ = contrata::core::mask_amount_input(s);
        let _ = contrata::core::mask_phone(s);
        if let Some(amount) = contrata::core::parse_amount(s) {
            let _ = contrata::core::format_amount(amount);
            let _ = contrata::core::amount_in_words(amount);
        }
    }
});
