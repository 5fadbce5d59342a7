use rechnung::core::*;

fn main() {
    let mut editor = Editor::new(Invoice::blank(), EditorConfig::default());

    editor.set_title("RE-2024-001");
    editor.set_tax_label("MwSt. 19%");
    editor.set_currency("€");
    editor.set_sender(Party {
        name: "Max Mustermann".into(),
        company: "ACME GmbH".into(),
        address: "Friedrichstraße 123, 10115 Berlin".into(),
        ..Default::default()
    });
    editor.set_recipient(Party {
        company: "Kunde AG".into(),
        address: "Marienplatz 1, 80331 München".into(),
        ..Default::default()
    });

    editor.edit_line(0, LineField::Description, "Softwareentwicklung");
    editor.edit_line(0, LineField::Quantity, "80");
    editor.edit_line(0, LineField::Rate, "120");

    for i in 1..=24 {
        editor.add_line();
        editor.edit_line(i, LineField::Description, &format!("Wartung Modul {i}"));
        editor.edit_line(i, LineField::Quantity, "1,5");
        editor.edit_line(i, LineField::Rate, "95");
    }

    let invoice = editor.invoice();
    let totals = editor.computed().totals;

    println!("Invoice: {}", invoice.title);
    println!("Seller:  {}", invoice.sender.company);
    println!("Buyer:   {}", invoice.recipient.company);

    for page in editor.export_pages() {
        println!("--- page {} ---", page.number);
        for line in &page.items {
            println!(
                "  {} x {} @ {} = {}",
                line.quantity,
                line.description,
                line.rate,
                line.display_amount()
            );
        }
        if page.renders_totals {
            println!("---");
            println!("Net:   {}", format_money(totals.subtotal, &invoice.currency));
            println!("{}: {}", invoice.tax_label, format_money(totals.tax, &invoice.currency));
            println!("Total: {}", format_money(totals.total, &invoice.currency));
        }
    }
}
