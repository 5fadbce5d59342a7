#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let rate = rechnung::extract_rate_percent(s);
        let _ = rechnung::tax_amount(rechnung::round2(rate), rate);
    }
});
