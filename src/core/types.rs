use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::number;

/// A single table row of the invoice.
///
/// Quantity and rate are kept as the text the user sees (comma decimal
/// separator). They are parsed on demand; text without a number counts as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Free text, never parsed.
    pub description: String,
    /// Quantity as display text, e.g. "2,5".
    pub quantity: String,
    /// Unit price as display text, e.g. "120".
    pub rate: String,
}

impl LineItem {
    pub fn new(
        description: impl Into<String>,
        quantity: impl Into<String>,
        rate: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            quantity: quantity.into(),
            rate: rate.into(),
        }
    }

    /// Numeric quantity (zero if the text holds no number).
    pub fn quantity_value(&self) -> Decimal {
        number::parse_lenient(&self.quantity)
    }

    /// Numeric rate (zero if the text holds no number).
    pub fn rate_value(&self) -> Decimal {
        number::parse_lenient(&self.rate)
    }

    /// Full-precision line amount. Round only for display.
    pub fn amount(&self) -> Decimal {
        super::totals::line_amount(&self.quantity, &self.rate)
    }

    /// Line amount rounded and formatted for the table, e.g. "1190,00".
    pub fn display_amount(&self) -> String {
        number::format_amount(self.amount())
    }

    /// The text held by `field`.
    pub fn field(&self, field: LineField) -> &str {
        match field {
            LineField::Description => &self.description,
            LineField::Quantity => &self.quantity,
            LineField::Rate => &self.rate,
        }
    }
}

/// Editable column of a [`LineItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineField {
    Description,
    Quantity,
    Rate,
}

impl LineField {
    /// Whether edits to this field go through the decimal field parser.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Quantity | Self::Rate)
    }
}

/// One manually managed page of line items, in table row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<LineItem>,
}

impl Page {
    pub fn new(items: Vec<LineItem>) -> Self {
        Self { items }
    }
}

/// Sender or recipient block. All fields are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Person name.
    pub name: String,
    /// Company name.
    pub company: String,
    /// Postal address, possibly multi-line.
    pub address: String,
    pub email: String,
    pub phone: String,
}

impl Party {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Bank account of the sender, printed on the invoice and used for the
/// payment payload. Treated as opaque text, never checksum-validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    /// Name of the account holder (payment recipient).
    pub account_holder: String,
    pub iban: String,
    pub bic: String,
    pub bank_name: String,
}

impl BankDetails {
    pub fn new(
        account_holder: impl Into<String>,
        iban: impl Into<String>,
        bic: impl Into<String>,
    ) -> Self {
        Self {
            account_holder: account_holder.into(),
            iban: iban.into(),
            bic: bic.into(),
            bank_name: String::new(),
        }
    }

    /// A payment payload is only generated when both IBAN and BIC are present.
    pub fn is_complete(&self) -> bool {
        !self.iban.trim().is_empty() && !self.bic.trim().is_empty()
    }
}

/// The invoice document: aggregate root of all editable state.
///
/// An `Invoice` is a snapshot value. Edit operations take `&self` and return
/// a new, complete snapshot; derived amounts are never stored on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Document title, also used as payment reference.
    pub title: String,
    pub number: String,
    /// Issue date as entered.
    pub issue_date: String,
    /// Due date as entered.
    pub due_date: String,
    pub sender: Party,
    pub recipient: Party,
    /// Free text expected to contain a percentage token, e.g. "MwSt. 19%".
    pub tax_label: String,
    /// Currency symbol or code shown next to amounts.
    pub currency: String,
    pub notes: String,
    pub banking: BankDetails,
    /// Manually managed pages. Never empty.
    pub pages: Vec<Page>,
}

impl Invoice {
    /// A fresh invoice with one page holding one blank line.
    pub fn blank() -> Self {
        Self {
            title: String::new(),
            number: String::new(),
            issue_date: String::new(),
            due_date: String::new(),
            sender: Party::default(),
            recipient: Party::default(),
            tax_label: String::new(),
            currency: "EUR".into(),
            notes: String::new(),
            banking: BankDetails::default(),
            pages: vec![Page::new(vec![LineItem::default()])],
        }
    }

    /// Accept a persisted or passed-in snapshot, restoring the one invariant
    /// the editor relies on: at least one page.
    pub fn hydrate(mut snapshot: Invoice) -> Self {
        if snapshot.pages.is_empty() {
            tracing::debug!("hydrated invoice had no pages, adding a blank one");
            snapshot.pages.push(Page::new(vec![LineItem::default()]));
        }
        snapshot
    }

    /// All line items, page by page, in row order.
    pub fn line_items(&self) -> impl Iterator<Item = &LineItem> {
        self.pages.iter().flat_map(|p| p.items.iter())
    }

    /// Number of line items across all pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.items.len()).sum()
    }
}

impl Default for Invoice {
    fn default() -> Self {
        Self::blank()
    }
}
