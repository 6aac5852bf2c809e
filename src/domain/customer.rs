use crate::error::FieldError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::sync::LazyLock;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z' \\-]{1,50}$").expect("customer name pattern"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[^@\\s]+@[^@\\s]+\\.[^@\\s]+$").expect("email pattern"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^0[0-9]{10}$").expect("phone number pattern"));

/// A customer of the travel agent. `email` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

/// Create payload. Missing fields deserialize as empty strings so they fail
/// validation with a field message instead of a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

impl NewCustomer {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if !NAME_RE.is_match(&self.name) {
            errors.push(FieldError::new(
                "name",
                "must be a non-empty alphabetical string of at most 50 characters",
            ));
        }
        if !EMAIL_RE.is_match(&self.email) {
            errors.push(FieldError::new("email", "must be a valid email address"));
        }
        if !PHONE_RE.is_match(&self.phone_number) {
            errors.push(FieldError::new(
                "phoneNumber",
                "must start with 0 and consist of 11 digits",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, email: &str, phone: &str) -> NewCustomer {
        NewCustomer {
            name: name.into(),
            email: email.into(),
            phone_number: phone.into(),
        }
    }

    #[test]
    fn accepts_a_well_formed_customer() {
        assert!(payload("Ada Lovelace", "ada@example.org", "07700900123")
            .validate()
            .is_ok());
    }

    #[test]
    fn rejects_a_malformed_email() {
        let errors = payload("Ada Lovelace", "not-an-email", "07700900123")
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
    }

    #[test]
    fn rejects_a_phone_number_not_starting_with_zero() {
        let errors = payload("Ada Lovelace", "ada@example.org", "17700900123")
            .validate()
            .unwrap_err();
        assert_eq!(errors[0].field, "phoneNumber");
    }

    #[test]
    fn rejects_a_name_with_digits_or_over_50_characters() {
        assert!(payload("4da", "ada@example.org", "07700900123")
            .validate()
            .is_err());
        let long = "a".repeat(51);
        assert!(payload(&long, "ada@example.org", "07700900123")
            .validate()
            .is_err());
    }
}
