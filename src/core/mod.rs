//! Core invoice snapshot, field parsing, totals, pagination, and editor.
//!
//! This module holds everything the editing loop needs. None of its editing
//! operations fail; malformed input degrades to zero.

mod config;
mod editor;
mod error;
pub mod number;
mod pagination;
mod totals;
mod types;

pub use config::*;
pub use editor::*;
pub use error::*;
pub use number::{NormalizedField, format_amount, format_money, normalize, round2};
pub use pagination::*;
pub use totals::*;
pub use types::*;
