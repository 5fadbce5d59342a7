use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::RechnungError;

/// Settings for the editor and its derived outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Line items per page in the export layout.
    pub export_page_capacity: usize,
    /// Fixed tax rate (fraction, 0.19 = 19%) used for the payment amount.
    /// Independent of the editable tax label.
    pub payment_tax_rate: Decimal,
    /// Payment reference used when the invoice title is empty.
    pub default_reference: String,
    /// Currency for newly created invoices.
    pub default_currency: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            export_page_capacity: 20,
            payment_tax_rate: dec!(0.19),
            default_reference: "Invoice".into(),
            default_currency: "EUR".into(),
        }
    }
}

/// Builder for [`EditorConfig`].
///
/// ```
/// use rechnung::core::EditorConfigBuilder;
/// use rust_decimal_macros::dec;
///
/// let config = EditorConfigBuilder::new()
///     .export_page_capacity(25)
///     .payment_tax_rate(dec!(0.07))
///     .default_reference("Rechnung")
///     .build()
///     .unwrap();
/// assert_eq!(config.export_page_capacity, 25);
/// ```
#[derive(Debug, Default)]
pub struct EditorConfigBuilder {
    config: EditorConfig,
}

impl EditorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn export_page_capacity(mut self, capacity: usize) -> Self {
        self.config.export_page_capacity = capacity;
        self
    }

    /// Set the payment tax rate as a fraction (0.19 for 19%).
    pub fn payment_tax_rate(mut self, rate: Decimal) -> Self {
        self.config.payment_tax_rate = rate;
        self
    }

    pub fn default_reference(mut self, reference: impl Into<String>) -> Self {
        self.config.default_reference = reference.into();
        self
    }

    pub fn default_currency(mut self, currency: impl Into<String>) -> Self {
        self.config.default_currency = currency.into();
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<EditorConfig, RechnungError> {
        let config = self.config;
        if config.export_page_capacity == 0 {
            return Err(RechnungError::Config(
                "export page capacity must be at least 1".into(),
            ));
        }
        if config.payment_tax_rate < Decimal::ZERO || config.payment_tax_rate > Decimal::ONE {
            return Err(RechnungError::Config(format!(
                "payment tax rate {} must be a fraction between 0 and 1",
                config.payment_tax_rate
            )));
        }
        if config.default_reference.trim().is_empty() {
            return Err(RechnungError::Config(
                "default payment reference must not be empty".into(),
            ));
        }
        Ok(config)
    }
}
