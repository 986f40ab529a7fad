#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic on any input.
        let _ = contrata::core::is_valid_document(s);
        let _ = contrata::core::format_document(s);
        let _ = contrata::core::mask_cpf(s);
        if let Ok(doc) = contrata::core::FiscalDocument::parse(s) {
            assert!(contrata::core::is_valid_document(&doc.formatted()));
        }
    }
});
