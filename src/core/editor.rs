//! Snapshot ownership and the explicit recompute pipeline.
//!
//! Every mutation replaces the whole [`Invoice`] snapshot and then runs
//! [`recompute`]: subtotal, tax, total, then the payment payload. Callers
//! never observe totals that belong to an older snapshot.

use serde::{Deserialize, Serialize};

use super::config::EditorConfig;
use super::error::Degradation;
use super::number;
use super::pagination::{self, ExportPage};
use super::totals::{self, Totals};
use super::types::{BankDetails, Invoice, LineField, Party};

/// Everything derived from one invoice snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Computed {
    pub totals: Totals,
    /// EPC QR payload text; `None` without IBAN and BIC (or without the
    /// `sepa` feature).
    pub payload: Option<String>,
    /// Fallbacks taken while computing, in page/line order.
    pub degradations: Vec<Degradation>,
}

/// Derive totals and the payment payload from a snapshot.
pub fn recompute(invoice: &Invoice, config: &EditorConfig) -> Computed {
    let mut degradations = Vec::new();

    for (page_idx, page) in invoice.pages.iter().enumerate() {
        for (line_idx, item) in page.items.iter().enumerate() {
            for field in [LineField::Quantity, LineField::Rate] {
                if number::is_invalid_numeric(item.field(field)) {
                    tracing::trace!(page = page_idx, line = line_idx, ?field, "non-numeric input counts as zero");
                    degradations.push(Degradation::InvalidNumericInput {
                        page: page_idx,
                        line: line_idx,
                        field,
                    });
                }
            }
        }
    }

    if !invoice.tax_label.trim().is_empty() && totals::find_rate_percent(&invoice.tax_label).is_none() {
        degradations.push(Degradation::MalformedTaxLabel {
            label: invoice.tax_label.clone(),
        });
    }

    let totals = totals::calculate_totals(invoice);
    let payload = payment_payload(invoice, &totals, config, &mut degradations);

    tracing::debug!(
        subtotal = %totals.subtotal,
        tax = %totals.tax,
        total = %totals.total,
        has_payload = payload.is_some(),
        "recomputed invoice"
    );

    Computed {
        totals,
        payload,
        degradations,
    }
}

#[cfg(feature = "sepa")]
fn payment_payload(
    invoice: &Invoice,
    totals: &Totals,
    config: &EditorConfig,
    degradations: &mut Vec<Degradation>,
) -> Option<String> {
    match crate::sepa::payment_request(invoice, totals, config) {
        Some(request) => Some(crate::sepa::build_payload(&request)),
        None => {
            degradations.push(Degradation::MissingBankingDetails);
            None
        }
    }
}

#[cfg(not(feature = "sepa"))]
fn payment_payload(
    _invoice: &Invoice,
    _totals: &Totals,
    _config: &EditorConfig,
    _degradations: &mut Vec<Degradation>,
) -> Option<String> {
    None
}

/// Single owner of the invoice being edited.
///
/// Holds the current snapshot, the selected page (pure view state) and the
/// derived [`Computed`] for that snapshot. Line operations target the
/// selected page.
#[derive(Debug, Clone)]
pub struct Editor {
    invoice: Invoice,
    selected_page: usize,
    config: EditorConfig,
    computed: Computed,
}

impl Editor {
    /// Start editing `invoice` (normalized via [`Invoice::hydrate`]).
    pub fn new(invoice: Invoice, config: EditorConfig) -> Self {
        let invoice = Invoice::hydrate(invoice);
        let computed = recompute(&invoice, &config);
        Self {
            invoice,
            selected_page: 0,
            config,
            computed,
        }
    }

    /// Start from a blank invoice in the configured default currency.
    pub fn blank(config: EditorConfig) -> Self {
        let invoice = Invoice {
            currency: config.default_currency.clone(),
            ..Invoice::blank()
        };
        Self::new(invoice, config)
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    pub fn computed(&self) -> &Computed {
        &self.computed
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn selected_page(&self) -> usize {
        self.selected_page
    }

    /// Change the selected page. Data and totals are untouched; a page that
    /// does not exist yet is created by the next line operation, capped at
    /// [`MAX_PAGES`](super::MAX_PAGES).
    pub fn select_page(&mut self, page: usize) {
        self.selected_page = page;
    }

    pub fn add_line(&mut self) {
        let next = self.invoice.with_line_added(self.selected_page);
        self.replace(next);
    }

    pub fn edit_line(&mut self, line: usize, field: LineField, raw: &str) {
        let next = self
            .invoice
            .with_line_edited(self.selected_page, line, field, raw);
        self.replace(next);
    }

    pub fn remove_line(&mut self, line: usize) {
        let next = self.invoice.with_line_removed(self.selected_page, line);
        self.replace(next);
    }

    pub fn add_page(&mut self) {
        let next = self.invoice.with_page_added();
        self.replace(next);
    }

    /// Remove the selected page and move the selection to the page before it
    /// (the first page stays selected when it is removed).
    pub fn remove_page(&mut self) {
        let next = self.invoice.with_page_removed(self.selected_page);
        let last = next.pages.len().saturating_sub(1);
        self.selected_page = self.selected_page.saturating_sub(1).min(last);
        self.replace(next);
    }

    pub fn set_title(&mut self, title: &str) {
        let next = Invoice {
            title: title.to_string(),
            ..self.invoice.clone()
        };
        self.replace(next);
    }

    pub fn set_tax_label(&mut self, label: &str) {
        let next = Invoice {
            tax_label: label.to_string(),
            ..self.invoice.clone()
        };
        self.replace(next);
    }

    pub fn set_currency(&mut self, currency: &str) {
        let next = Invoice {
            currency: currency.to_string(),
            ..self.invoice.clone()
        };
        self.replace(next);
    }

    pub fn set_banking(&mut self, banking: BankDetails) {
        let next = Invoice {
            banking,
            ..self.invoice.clone()
        };
        self.replace(next);
    }

    pub fn set_sender(&mut self, sender: Party) {
        let next = Invoice {
            sender,
            ..self.invoice.clone()
        };
        self.replace(next);
    }

    pub fn set_recipient(&mut self, recipient: Party) {
        let next = Invoice {
            recipient,
            ..self.invoice.clone()
        };
        self.replace(next);
    }

    /// Replace the whole snapshot, e.g. after loading from storage.
    pub fn load(&mut self, invoice: Invoice) {
        self.selected_page = 0;
        self.replace(Invoice::hydrate(invoice));
    }

    /// Fixed-layout pages for print/archival output.
    pub fn export_pages(&self) -> Vec<ExportPage> {
        pagination::export_pages(&self.invoice, self.config.export_page_capacity)
    }

    fn replace(&mut self, next: Invoice) {
        self.computed = recompute(&next, &self.config);
        self.invoice = next;
    }
}
