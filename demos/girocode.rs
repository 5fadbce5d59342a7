use rechnung::core::*;
use rechnung::sepa::{EncodeSlot, lint_payment_request, payment_request};

fn main() -> Result<(), RechnungError> {
    let config = EditorConfigBuilder::new()
        .default_reference("Rechnung")
        .build()?;
    let mut editor = Editor::new(Invoice::blank(), config);

    editor.edit_line(0, LineField::Description, "Beratung");
    editor.edit_line(0, LineField::Quantity, "10");
    editor.edit_line(0, LineField::Rate, "150");
    assert!(editor.computed().payload.is_none(), "no bank details yet");

    editor.set_banking(BankDetails::new(
        "ACME GmbH",
        "DE89370400440532013000",
        "COBADEFFXXX",
    ));
    editor.set_title("RE-2024-001");

    let request = payment_request(editor.invoice(), &editor.computed().totals, editor.config())
        .expect("bank details are complete");
    into_result(lint_payment_request(&request))?;

    // Stand-in for an image encoder: only the newest render is kept.
    let slot = EncodeSlot::new();
    let stale = slot.request();
    editor.edit_line(0, LineField::Quantity, "12");
    let fresh = slot.request();

    let payload = editor.computed().payload.clone().unwrap_or_default();
    slot.fulfil(fresh, payload);
    slot.fulfil(stale, String::from("outdated"));

    println!("{}", slot.latest().unwrap_or_default());
    Ok(())
}
