use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::LineField;

/// Errors raised outside the editing loop (configuration, lint).
///
/// Edit operations and recomputation never return this type; see
/// [`Degradation`] for how malformed editing input is reported.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RechnungError {
    /// Configuration builder received an unusable value.
    #[error("config error: {0}")]
    Config(String),

    /// One or more lint rules failed.
    #[error("validation failed: {0}")]
    Validation(String),
}

/// A silent fallback taken while recomputing an invoice.
///
/// None of these block editing. They are collected on
/// [`Computed`](super::Computed) so a caller may surface hints if it wants to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Degradation {
    /// A quantity or rate field holds text without a number; it counts as zero.
    InvalidNumericInput {
        page: usize,
        line: usize,
        field: LineField,
    },
    /// The tax label has no `<digits>%` token; the tax rate is zero.
    MalformedTaxLabel { label: String },
    /// IBAN or BIC is empty, so no payment payload exists.
    MissingBankingDetails,
}

/// One lint finding about a payment field.
///
/// Displays as `payment.bic: message (EPC-AT-23)`; the parenthesized part is
/// the EPC069-12 attribute and only appears when one is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field path such as "payment.iban".
    pub field: String,
    pub message: String,
    pub rule: Option<&'static str>,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            message: message.into(),
            rule: None,
        }
    }

    /// Attach the EPC069-12 attribute the finding refers to.
    pub fn rule(self, rule: &'static str) -> Self {
        Self {
            rule: Some(rule),
            ..self
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        match self.rule {
            Some(rule) => write!(f, " ({rule})"),
            None => Ok(()),
        }
    }
}

/// Join findings into a single [`RechnungError::Validation`], or `Ok` if empty.
pub fn into_result(errors: Vec<ValidationError>) -> Result<(), RechnungError> {
    if errors.is_empty() {
        return Ok(());
    }
    let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
    Err(RechnungError::Validation(joined.join("; ")))
}
