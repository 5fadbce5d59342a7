//! # rechnung
//!
//! Computational engine behind an editable invoice document:
//! locale-aware quantity/rate input, line and invoice totals, manual and
//! fixed-layout pagination, and SEPA credit-transfer (EPC QR / GiroCode)
//! payloads.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! Nothing in the editing loop returns an error: malformed input degrades to
//! zero and is reported as a [`core::Degradation`].
//!
//! ## Quick Start
//!
//! ```rust
//! use rechnung::core::*;
//! use rust_decimal_macros::dec;
//!
//! let mut editor = Editor::new(Invoice::blank(), EditorConfig::default());
//! editor.edit_line(0, LineField::Description, "Beratung");
//! editor.edit_line(0, LineField::Quantity, "10");
//! editor.edit_line(0, LineField::Rate, "150");
//! editor.set_tax_label("MwSt. 19%");
//!
//! let totals = &editor.computed().totals;
//! assert_eq!(totals.subtotal, dec!(1500.00));
//! assert_eq!(totals.tax, dec!(285.00));
//! assert_eq!(totals.total, dec!(1785.00));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice snapshot, field parser, totals, pagination, editor |
//! | `sepa` | EPC QR payload builder, payload lint, latest-only encode slot |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "sepa")]
pub mod sepa;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
