use crate::error::FieldError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A booking of one customer on one flight for one date.
/// `(customer_id, flight_id, date)` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub customer_id: i64,
    pub flight_id: i64,
    pub date: NaiveDate,
}

/// Create payload. All fields optional on the wire so absences come back as
/// field messages rather than deserialization errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub customer_id: Option<i64>,
    pub flight_id: Option<i64>,
    pub date: Option<NaiveDate>,
}

/// A shape-validated booking payload, ready for the business-rule checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidBooking {
    pub customer_id: i64,
    pub flight_id: i64,
    pub date: NaiveDate,
}

impl NewBooking {
    /// Field-level checks. The booking date must lie strictly after `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<ValidBooking, Vec<FieldError>> {
        let mut errors = Vec::new();
        let customer_id = match self.customer_id {
            Some(id) if id > 0 => Some(id),
            Some(_) => {
                errors.push(FieldError::new("customerId", "must be a positive integer"));
                None
            }
            None => {
                errors.push(FieldError::new("customerId", "is required"));
                None
            }
        };
        let flight_id = match self.flight_id {
            Some(id) if id > 0 => Some(id),
            Some(_) => {
                errors.push(FieldError::new("flightId", "must be a positive integer"));
                None
            }
            None => {
                errors.push(FieldError::new("flightId", "is required"));
                None
            }
        };
        let date = match self.date {
            Some(d) if d > today => Some(d),
            Some(_) => {
                errors.push(FieldError::new("date", "must be in the future"));
                None
            }
            None => {
                errors.push(FieldError::new("date", "is required"));
                None
            }
        };
        match (customer_id, flight_id, date) {
            (Some(customer_id), Some(flight_id), Some(date)) => Ok(ValidBooking {
                customer_id,
                flight_id,
                date,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    #[test]
    fn accepts_a_future_booking() {
        let payload = NewBooking {
            customer_id: Some(1),
            flight_id: Some(2),
            date: NaiveDate::from_ymd_opt(2026, 9, 1),
        };
        let valid = payload.validate(today()).unwrap();
        assert_eq!(valid.customer_id, 1);
        assert_eq!(valid.flight_id, 2);
    }

    #[test]
    fn rejects_a_booking_for_today_or_the_past() {
        let mut payload = NewBooking {
            customer_id: Some(1),
            flight_id: Some(2),
            date: Some(today()),
        };
        assert_eq!(payload.validate(today()).unwrap_err()[0].field, "date");
        payload.date = NaiveDate::from_ymd_opt(2026, 1, 1);
        assert_eq!(payload.validate(today()).unwrap_err()[0].field, "date");
    }

    #[test]
    fn reports_every_absent_field() {
        let errors = NewBooking::default().validate(today()).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["customerId", "flightId", "date"]);
    }

    #[test]
    fn rejects_non_positive_ids() {
        let payload = NewBooking {
            customer_id: Some(0),
            flight_id: Some(-4),
            date: NaiveDate::from_ymd_opt(2026, 9, 1),
        };
        let errors = payload.validate(today()).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["customerId", "flightId"]);
    }
}
