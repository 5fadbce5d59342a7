//! EPC QR (GiroCode) credit-transfer payload text.
//!
//! Consumers parse by line position, so the field count and order are
//! fixed. Purpose and remittance-text lines are always emitted, even empty.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{EditorConfig, Invoice, Totals, round2};

/// Service tag.
pub const SERVICE_TAG: &str = "BCD";
/// Payload format version.
pub const VERSION: &str = "002";
/// Character set (1 = UTF-8).
pub const CHARACTER_SET: &str = "1";
/// Identification code for SEPA credit transfer.
pub const IDENTIFICATION: &str = "SCT";

/// Inputs of one payment payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub bic: String,
    /// Beneficiary name.
    pub recipient_name: String,
    /// Used when `recipient_name` is empty.
    pub fallback_name: String,
    pub iban: String,
    /// Settlement amount.
    pub amount: Decimal,
    /// Prefix written directly before the amount, e.g. "EUR".
    pub currency: String,
    /// Remittance reference.
    pub reference: String,
}

impl PaymentRequest {
    /// Beneficiary name after fallback; may be empty.
    pub fn beneficiary(&self) -> &str {
        if self.recipient_name.is_empty() {
            &self.fallback_name
        } else {
            &self.recipient_name
        }
    }
}

/// Build the 11-line payload:
///
/// ```text
/// BCD
/// 002
/// 1
/// SCT
/// <BIC>
/// <name>
/// <IBAN>
/// <currency><amount, 2 decimals, period>
/// <purpose, empty>
/// <unused, empty>
/// <reference>
/// ```
///
/// Bank details are not validated here; see
/// [`lint_payment_request`](super::lint_payment_request). Line breaks inside
/// any field are flattened to spaces, so the payload has exactly 11 lines.
pub fn build_payload(request: &PaymentRequest) -> String {
    let amount = format!("{}{}", request.currency, format_payload_amount(request.amount));
    [
        SERVICE_TAG.to_string(),
        VERSION.to_string(),
        CHARACTER_SET.to_string(),
        IDENTIFICATION.to_string(),
        single_line(&request.bic),
        single_line(request.beneficiary()),
        single_line(&request.iban),
        single_line(&amount),
        String::new(),
        String::new(),
        single_line(&request.reference),
    ]
    .join("\n")
}

/// `\r\n`, `\r` and `\n` each become one space.
fn single_line(field: &str) -> String {
    field.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

/// Amount as the payload expects it: 2 decimals, period separator.
pub fn format_payload_amount(amount: Decimal) -> String {
    format!("{:.2}", round2(amount))
}

/// `subtotal + subtotal * rate`, rounded to 2 decimal places.
///
/// `rate` is the fixed payment tax rate as a fraction, not the rate from the
/// editable tax label.
pub fn settlement_amount(subtotal: Decimal, rate: Decimal) -> Decimal {
    subtotal
        .checked_mul(rate)
        .and_then(|tax| subtotal.checked_add(tax))
        .map(round2)
        .unwrap_or(Decimal::ZERO)
}

/// Collect the payment inputs of an invoice, or `None` if IBAN or BIC is
/// empty (no payload exists then).
pub fn payment_request(
    invoice: &Invoice,
    totals: &Totals,
    config: &EditorConfig,
) -> Option<PaymentRequest> {
    if !invoice.banking.is_complete() {
        return None;
    }

    let reference = if invoice.title.trim().is_empty() {
        config.default_reference.clone()
    } else {
        invoice.title.clone()
    };

    Some(PaymentRequest {
        bic: invoice.banking.bic.clone(),
        recipient_name: invoice.banking.account_holder.clone(),
        fallback_name: invoice.sender.name.clone(),
        iban: invoice.banking.iban.clone(),
        amount: settlement_amount(totals.subtotal, config.payment_tax_rate),
        currency: invoice.currency.clone(),
        reference,
    })
}
