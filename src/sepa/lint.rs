//! Plausibility checks for EPC QR payment data (EPC069-12).
//!
//! Opt-in only: [`build_payload`](super::build_payload) never calls this, and
//! IBAN/BIC checksums are not verified.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::payload::PaymentRequest;
use crate::core::ValidationError;

/// Largest amount the payload format can carry.
pub const MAX_AMOUNT: Decimal = dec!(999999999.99);

/// Lint a payment request. Returns all findings (not just the first).
pub fn lint_payment_request(request: &PaymentRequest) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let bic = request.bic.trim();
    if !(bic.len() == 8 || bic.len() == 11) || !bic.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push(
            ValidationError::new(
                "payment.bic",
                format!("BIC '{bic}' must be 8 or 11 alphanumeric characters"),
            )
            .rule("EPC-AT-23"),
        );
    }

    let iban = request.iban.trim();
    if !(15..=34).contains(&iban.len())
        || !iban.chars().all(|c| c.is_ascii_alphanumeric())
        || !iban.chars().take(2).all(|c| c.is_ascii_uppercase())
    {
        errors.push(
            ValidationError::new(
                "payment.iban",
                format!("IBAN '{iban}' must be 15-34 alphanumeric characters with a country prefix"),
            )
            .rule("EPC-AT-C"),
        );
    }

    let name = request.beneficiary();
    if name.trim().is_empty() {
        errors.push(
            ValidationError::new(
                "payment.name",
                "beneficiary name must not be empty",
            )
            .rule("EPC-AT-21"),
        );
    } else if name.chars().count() > 70 {
        errors.push(
            ValidationError::new(
                "payment.name",
                "beneficiary name must not exceed 70 characters",
            )
            .rule("EPC-AT-21"),
        );
    }

    if request.currency != "EUR" {
        errors.push(
            ValidationError::new(
                "payment.currency",
                format!("currency '{}' is not EUR", request.currency),
            )
            .rule("EPC-AT-T"),
        );
    }

    if request.amount < dec!(0.01) || request.amount > MAX_AMOUNT {
        errors.push(
            ValidationError::new(
                "payment.amount",
                format!("amount {} must be between 0.01 and {MAX_AMOUNT}", request.amount),
            )
            .rule("EPC-AT-T"),
        );
    }

    if request.reference.chars().count() > 140 {
        errors.push(
            ValidationError::new(
                "payment.reference",
                "remittance text must not exceed 140 characters",
            )
            .rule("EPC-AT-05"),
        );
    }

    if request
        .reference
        .chars()
        .chain(name.chars())
        .any(|c| c == '\n' || c == '\r')
    {
        errors.push(ValidationError::new(
            "payment",
            "line breaks in name or reference are flattened to spaces",
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> PaymentRequest {
        PaymentRequest {
            bic: "COBADEFFXXX".into(),
            recipient_name: "ACME GmbH".into(),
            fallback_name: String::new(),
            iban: "DE89370400440532013000".into(),
            amount: dec!(119.00),
            currency: "EUR".into(),
            reference: "RE-2024-001".into(),
        }
    }

    #[test]
    fn valid_request_has_no_findings() {
        assert!(lint_payment_request(&valid()).is_empty());
    }

    #[test]
    fn short_bic() {
        let req = PaymentRequest {
            bic: "COBADE".into(),
            ..valid()
        };
        let errors = lint_payment_request(&req);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "payment.bic");
    }

    #[test]
    fn currency_symbol_flagged() {
        let req = PaymentRequest {
            currency: "€".into(),
            ..valid()
        };
        let errors = lint_payment_request(&req);
        assert!(errors.iter().any(|e| e.field == "payment.currency"));
    }

    #[test]
    fn zero_amount_flagged() {
        let req = PaymentRequest {
            amount: Decimal::ZERO,
            ..valid()
        };
        assert!(
            lint_payment_request(&req)
                .iter()
                .any(|e| e.field == "payment.amount")
        );
    }

    #[test]
    fn newline_in_reference_flagged() {
        let req = PaymentRequest {
            reference: "RE-1\nRE-2".into(),
            ..valid()
        };
        assert!(lint_payment_request(&req).iter().any(|e| e.field == "payment"));
    }

    #[test]
    fn all_findings_reported() {
        let req = PaymentRequest {
            bic: String::new(),
            recipient_name: String::new(),
            iban: String::new(),
            amount: Decimal::ZERO,
            currency: String::new(),
            ..valid()
        };
        assert_eq!(lint_payment_request(&req).len(), 5);
    }
}
