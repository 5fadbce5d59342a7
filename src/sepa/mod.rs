//! SEPA credit-transfer payloads for EPC QR codes (GiroCode).
//!
//! Builds the fixed 11-line text scanned by banking apps, offers opt-in
//! plausibility checks, and keeps only the newest rendered graphic.
//!
//! # Example
//!
//! ```
//! use rechnung::sepa::*;
//! use rust_decimal_macros::dec;
//!
//! let payload = build_payload(&PaymentRequest {
//!     bic: "ABCDDEFG".into(),
//!     recipient_name: "Jane Doe".into(),
//!     fallback_name: String::new(),
//!     iban: "DE12...".into(),
//!     amount: dec!(119.00),
//!     currency: "EUR".into(),
//!     reference: "INV-1".into(),
//! });
//! assert_eq!(payload, "BCD\n002\n1\nSCT\nABCDDEFG\nJane Doe\nDE12...\nEUR119.00\n\n\nINV-1");
//! ```

mod encode;
mod lint;
mod payload;

pub use encode::{EncodeSlot, EncodeTicket};
pub use lint::{MAX_AMOUNT, lint_payment_request};
pub use payload::{
    CHARACTER_SET, IDENTIFICATION, PaymentRequest, SERVICE_TAG, VERSION, build_payload,
    format_payload_amount, payment_request, settlement_amount,
};
