//! # Validation
//!
//! Every write path runs through one of these checks before anything is
//! persisted. Rules fire in a fixed order and the first failure wins, so the
//! caller always gets a single actionable message.
//!
//! ## Rule Order
//! - Company: name, contact person, email present, email format, email
//!   unique, price non-negative
//! - Employee: name, email present, email format, email unique
//! - Order submission: company selected, item names present, delivery
//!   address present when the order type is delivery
//!
//! Email uniqueness is case-insensitive and skips the record being edited.

use crate::draft::OrderDraft;
use crate::error::ValidationError;
use crate::types::OrderType;

/// Fields checked when creating or editing a company.
#[derive(Debug, Clone, Copy)]
pub struct CompanyFields<'a> {
    pub name: &'a str,
    pub contact_person: &'a str,
    pub email: &'a str,
    pub price_per_item_cents: i64,
}

/// Fields checked when creating or editing an employee.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeFields<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Validates a company form.
///
/// `existing` holds `(id, email)` pairs for every stored company;
/// `editing_id` names the record being edited so its own email does not
/// count as a duplicate.
pub fn validate_company(
    fields: &CompanyFields<'_>,
    existing: &[(String, String)],
    editing_id: Option<&str>,
) -> Result<(), ValidationError> {
    if fields.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "Company name".to_string(),
        });
    }
    if fields.contact_person.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "Contact person".to_string(),
        });
    }
    let email = fields.email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "Email".to_string(),
        });
    }
    if !email_is_valid(email) {
        return Err(ValidationError::InvalidFormat {
            field: "Email".to_string(),
            reason: "expected name@example.com".to_string(),
        });
    }
    if email_taken(email, existing, editing_id) {
        return Err(ValidationError::Duplicate {
            field: "Email".to_string(),
            value: email.to_string(),
        });
    }
    if fields.price_per_item_cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "Price per item".to_string(),
        });
    }
    Ok(())
}

/// Validates an employee form. Same shape as [`validate_company`]; role and
/// start date carry defaults so only identity fields are checked.
pub fn validate_employee(
    fields: &EmployeeFields<'_>,
    existing: &[(String, String)],
    editing_id: Option<&str>,
) -> Result<(), ValidationError> {
    if fields.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "Employee name".to_string(),
        });
    }
    let email = fields.email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "Email".to_string(),
        });
    }
    if !email_is_valid(email) {
        return Err(ValidationError::InvalidFormat {
            field: "Email".to_string(),
            reason: "expected name@example.com".to_string(),
        });
    }
    if email_taken(email, existing, editing_id) {
        return Err(ValidationError::Duplicate {
            field: "Email".to_string(),
            value: email.to_string(),
        });
    }
    Ok(())
}

/// Validates a draft about to become an order. Nothing is persisted unless
/// this passes.
pub fn validate_order_submission(draft: &OrderDraft) -> Result<(), ValidationError> {
    if draft.company_id.is_none() {
        return Err(ValidationError::MissingCompany);
    }
    for item in &draft.items {
        if item.name.trim().is_empty() {
            return Err(ValidationError::EmptyItemName { item_id: item.id });
        }
    }
    if draft.order_type == OrderType::Delivery && draft.delivery_address.trim().is_empty() {
        return Err(ValidationError::DeliveryAddressRequired);
    }
    Ok(())
}

/// Structural email check: one `@`, a non-empty local part, and a domain
/// with a dot separating non-empty segments. No whitespace anywhere.
fn email_is_valid(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let (local, domain) = match email.split_once('@') {
        Some(parts) => parts,
        None => return false,
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Case-insensitive membership test over `(id, email)` pairs, skipping the
/// record identified by `editing_id`.
fn email_taken(email: &str, existing: &[(String, String)], editing_id: Option<&str>) -> bool {
    let needle = email.to_lowercase();
    existing.iter().any(|(id, other)| {
        editing_id != Some(id.as_str()) && other.trim().to_lowercase() == needle
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn company_fields<'a>(name: &'a str, email: &'a str) -> CompanyFields<'a> {
        CompanyFields {
            name,
            contact_person: "Alex Chen",
            email,
            price_per_item_cents: 250,
        }
    }

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(id, email)| (id.to_string(), email.to_string()))
            .collect()
    }

    #[test]
    fn test_valid_company_passes() {
        let fields = company_fields("Lakeside Catering", "orders@lakeside.com");
        assert!(validate_company(&fields, &[], None).is_ok());
    }

    #[test]
    fn test_blank_name_fails_first() {
        // Name is checked before the (also invalid) email
        let fields = company_fields("   ", "not-an-email");
        let err = validate_company(&fields, &[], None).unwrap_err();
        assert_eq!(err.to_string(), "Company name is required");
    }

    #[test]
    fn test_contact_person_required() {
        let fields = CompanyFields {
            name: "Lakeside Catering",
            contact_person: "",
            email: "orders@lakeside.com",
            price_per_item_cents: 250,
        };
        let err = validate_company(&fields, &[], None).unwrap_err();
        assert_eq!(err.to_string(), "Contact person is required");
    }

    #[test]
    fn test_email_format() {
        for bad in [
            "plain",
            "no-at.example.com",
            "two@@example.com",
            "spaced name@example.com",
            "@example.com",
            "user@",
            "user@nodot",
            "user@.com",
            "user@host.",
        ] {
            let fields = company_fields("Lakeside Catering", bad);
            let err = validate_company(&fields, &[], None).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidFormat { .. }),
                "{} should be rejected",
                bad
            );
        }
        for good in ["a@b.co", "first.last@mail.example.com", "x+tag@host.io"] {
            let fields = company_fields("Lakeside Catering", good);
            assert!(
                validate_company(&fields, &[], None).is_ok(),
                "{} should be accepted",
                good
            );
        }
    }

    #[test]
    fn test_duplicate_email_is_case_insensitive() {
        let existing = pairs(&[("1", "a@b.com")]);
        let fields = company_fields("Lakeside Catering", "A@B.COM");
        let err = validate_company(&fields, &existing, None).unwrap_err();
        assert!(matches!(err, ValidationError::Duplicate { .. }));
        assert_eq!(err.to_string(), "Email 'A@B.COM' already exists");
    }

    #[test]
    fn test_edited_record_keeps_its_own_email() {
        let existing = pairs(&[("1", "a@b.com"), ("2", "c@d.com")]);

        // Re-saving company 1 with its own email is fine
        let fields = company_fields("Lakeside Catering", "a@b.com");
        assert!(validate_company(&fields, &existing, Some("1")).is_ok());

        // Taking company 2's email is not
        let fields = company_fields("Lakeside Catering", "C@D.COM");
        assert!(validate_company(&fields, &existing, Some("1")).is_err());
    }

    #[test]
    fn test_negative_price_rejected_zero_allowed() {
        let mut fields = company_fields("Lakeside Catering", "orders@lakeside.com");
        fields.price_per_item_cents = -1;
        let err = validate_company(&fields, &[], None).unwrap_err();
        assert_eq!(err.to_string(), "Price per item cannot be negative");

        fields.price_per_item_cents = 0;
        assert!(validate_company(&fields, &[], None).is_ok());
    }

    #[test]
    fn test_employee_rules() {
        let existing = pairs(&[("e1", "sam@kitchen.com")]);

        let err = validate_employee(
            &EmployeeFields {
                name: "",
                email: "sam@kitchen.com",
            },
            &existing,
            None,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Employee name is required");

        let err = validate_employee(
            &EmployeeFields {
                name: "Sam Riley",
                email: "SAM@kitchen.com",
            },
            &existing,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::Duplicate { .. }));

        assert!(validate_employee(
            &EmployeeFields {
                name: "Sam Riley",
                email: "sam@kitchen.com",
            },
            &existing,
            Some("e1"),
        )
        .is_ok());
    }

    #[test]
    fn test_submission_checks_run_in_order() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let draft = OrderDraft::new(date);

        // No company selected yet; that fires before the blank item name
        let err = validate_order_submission(&draft).unwrap_err();
        assert!(matches!(err, ValidationError::MissingCompany));
    }
}
