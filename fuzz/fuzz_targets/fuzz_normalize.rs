#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic; every input has a value.
        let n = rechnung::normalize(s);
        let _ = rechnung::format_amount(n.value);
        let _ = rechnung::line_amount(s, s);
    }
});
