use crate::error::FieldError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::sync::LazyLock;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9]{5}$").expect("flight number pattern"));
static AIRPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Z]{3}$").expect("airport code pattern"));

/// A scheduled flight. `number` is the natural key; `id` is store-generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: i64,
    pub number: String,
    pub point_of_departure: String,
    pub destination: String,
}

/// Create payload: a flight before it has an identity. Missing fields
/// deserialize as empty strings so they fail validation with a field message
/// instead of a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewFlight {
    pub number: String,
    pub point_of_departure: String,
    pub destination: String,
}

impl NewFlight {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if !NUMBER_RE.is_match(&self.number) {
            errors.push(FieldError::new(
                "number",
                "must be a non-empty alphanumeric string of exactly 5 characters",
            ));
        }
        if !AIRPORT_RE.is_match(&self.point_of_departure) {
            errors.push(FieldError::new(
                "pointOfDeparture",
                "must be an upper case alphabetical string of exactly 3 characters",
            ));
        }
        if !AIRPORT_RE.is_match(&self.destination) {
            errors.push(FieldError::new(
                "destination",
                "must be an upper case alphabetical string of exactly 3 characters",
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

    fn payload(number: &str, from: &str, to: &str) -> NewFlight {
        NewFlight {
            number: number.into(),
            point_of_departure: from.into(),
            destination: to.into(),
        }
    }

    #[test]
    fn accepts_a_well_formed_flight() {
        assert!(payload("AB123", "LHR", "JFK").validate().is_ok());
    }

    #[test]
    fn rejects_a_number_of_the_wrong_length() {
        let errors = payload("AB12", "LHR", "JFK").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "number");
    }

    #[test]
    fn rejects_lower_case_airport_codes() {
        let errors = payload("AB123", "lhr", "jfk").validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["pointOfDeparture", "destination"]);
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = NewFlight::default().validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn same_airports_still_pass_shape_validation() {
        // The self-conflict rule is a business rule, checked by the service.
        assert!(payload("AB123", "LHR", "LHR").validate().is_ok());
    }
}
