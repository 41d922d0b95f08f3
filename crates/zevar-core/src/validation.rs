//! # Validation Module
//!
//! Input validation for the billing counter.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Browser UI          required fields, focus handling          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP handler        JSON deserialization                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE         business rules before any side effect    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: SQLite              NOT NULL / UNIQUE / CHECK constraints    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::cart::{normalize_code, Cart};
use crate::error::ValidationError;
use crate::types::Customer;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

pub const MAX_CODE_LEN: usize = 64;
pub const MAX_NAME_LEN: usize = 200;
pub const MAX_ADDRESS_LEN: usize = 500;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_EMAIL_LEN: usize = 254;

// =============================================================================
// Product Validators
// =============================================================================

/// Normalizes a scanned token, rejecting only a blank one.
///
/// Anything else is left for the catalogue to accept or not, so an odd
/// token is reported as not found rather than malformed.
pub fn validate_scan_token(token: &str) -> ValidationResult<String> {
    let code = normalize_code(token);

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    Ok(code)
}

/// Validates a catalogue code and returns its normalized form.
///
/// ## Example
/// ```rust
/// use zevar_core::validation::validate_code;
///
/// assert_eq!(validate_code(" zc-1001 ").unwrap(), "ZC-1001");
/// assert!(validate_code("   ").is_err());
/// ```
pub fn validate_code(code: &str) -> ValidationResult<String> {
    let code = validate_scan_token(code)?;

    if code.chars().count() > MAX_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LEN,
        });
    }

    if code.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must not contain spaces".to_string(),
        });
    }

    Ok(code)
}

/// Validates a product name for the catalogue.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a price in paise. Zero is allowed (complimentary items).
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Customer Validators
// =============================================================================

/// Validates the optional customer fields as they are typed in.
///
/// The name may still be empty here; it is only required at submission.
pub fn validate_customer_details(customer: &Customer) -> ValidationResult<()> {
    check_len("customer name", &customer.name, MAX_NAME_LEN)?;
    check_len("phone", &customer.phone, MAX_PHONE_LEN)?;
    check_len("address", &customer.address, MAX_ADDRESS_LEN)?;
    check_len("email", &customer.email, MAX_EMAIL_LEN)?;

    let phone = customer.phone.trim();
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "may contain only digits, spaces and + - ( )".to_string(),
        });
    }

    if let Some(email) = customer.email_address() {
        validate_email(email)?;
    }

    Ok(())
}

/// Minimal shape check for an email address: `local@domain.tld`.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@example.com".to_string(),
    };

    let (local, domain) = email.trim().split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.is_empty()
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || email.chars().any(char::is_whitespace)
    {
        return Err(invalid());
    }

    Ok(())
}

// =============================================================================
// Submission Validators
// =============================================================================

/// Preconditions for turning a cart into an invoice.
///
/// ## Rules
/// - Customer name must not be empty
/// - Cart must hold at least one line
pub fn validate_submission(cart: &Cart, customer: &Customer) -> ValidationResult<()> {
    if customer.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customer name".to_string(),
        });
    }

    if cart.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    validate_customer_details(customer)
}

fn check_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::ProductQuote;

    fn cart_with_one_item() -> Cart {
        let mut cart = Cart::new();
        cart.add_quote(ProductQuote {
            code: "ZC-1".into(),
            name: "Ring".into(),
            list_price: Money::from_rupees(100),
            unit_price: Money::from_rupees(90),
        })
        .unwrap();
        cart
    }

    #[test]
    fn test_validate_scan_token() {
        assert_eq!(validate_scan_token(" zc-1001\t").unwrap(), "ZC-1001");
        assert_eq!(validate_scan_token("zc 1001").unwrap(), "ZC 1001");
        assert_eq!(validate_scan_token(&"a".repeat(65)).unwrap(), "A".repeat(65));
        assert!(matches!(
            validate_scan_token(" \n "),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_code() {
        assert_eq!(validate_code("zc-1001").unwrap(), "ZC-1001");
        assert!(validate_code("").is_err());
        assert!(validate_code("ZC 1001").is_err());
        assert!(validate_code(&"A".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Temple Jhumka").is_ok());
        assert!(validate_product_name("  ").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents("unit_price", 0).is_ok());
        assert!(validate_price_cents("unit_price", -1).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("asha@example.com").is_ok());
        assert!(validate_email("asha@example").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("asha example.com").is_err());
    }

    #[test]
    fn test_customer_details_allow_empty_name() {
        let customer = Customer::default();
        assert!(validate_customer_details(&customer).is_ok());

        let customer = Customer {
            phone: "+91 94701-28088".into(),
            ..Customer::default()
        };
        assert!(validate_customer_details(&customer).is_ok());

        let customer = Customer {
            phone: "call me".into(),
            ..Customer::default()
        };
        assert!(validate_customer_details(&customer).is_err());
    }

    #[test]
    fn test_submission_requires_name() {
        let err = validate_submission(&cart_with_one_item(), &Customer::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                field: "customer name".into()
            }
        );
    }

    #[test]
    fn test_submission_requires_items() {
        let customer = Customer {
            name: "Asha".into(),
            ..Customer::default()
        };
        let err = validate_submission(&Cart::new(), &customer).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                field: "items".into()
            }
        );
    }

    #[test]
    fn test_submission_ok() {
        let customer = Customer {
            name: "Asha".into(),
            ..Customer::default()
        };
        assert!(validate_submission(&cart_with_one_item(), &customer).is_ok());
    }
}
