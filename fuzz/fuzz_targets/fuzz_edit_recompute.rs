#![no_main]

use libfuzzer_sys::fuzz_target;
use rechnung::{BankDetails, Editor, EditorConfig, Invoice, LineField};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let mut editor = Editor::new(Invoice::blank(), EditorConfig::default());
    editor.set_banking(BankDetails::new(s, "DE89370400440532013000", "COBADEFFXXX"));
    for (i, part) in s.split('|').take(16).enumerate() {
        match i % 4 {
            0 => editor.edit_line(i % 3, LineField::Quantity, part),
            1 => editor.edit_line(i % 3, LineField::Rate, part),
            2 => editor.set_tax_label(part),
            _ => editor.select_page(part.len() % 3),
        }
    }
    // IBAN and BIC are set, so a payload always exists.
    let payload = editor.computed().payload.as_deref().unwrap_or_default();
    assert_eq!(payload.split('\n').count(), 11);
    let _ = editor.export_pages();
});
