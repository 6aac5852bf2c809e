//! Store access: one trait per entity plus the PostgreSQL implementations.
//!
//! Implementations take the pool at construction; nothing here is ambient.
//! Unique violations raised by the store are folded back into the same
//! duplicate-key rejection the service produces from its own lookup, so a
//! create that loses the check-then-act race reports the identical error.

mod booking;
mod customer;
mod flight;

pub use booking::{BookingRepository, PgBookingRepository};
pub use customer::{CustomerRepository, PgCustomerRepository};
pub use flight::{FlightRepository, PgFlightRepository};

use crate::error::AppError;

/// The duplicate-key rejection for a named unique constraint, if it is one of ours.
fn duplicate_for_constraint(name: &str) -> Option<AppError> {
    match name {
        "uq_flight_number" => Some(AppError::DuplicateKey {
            field: "number",
            message: "that flight number already exists".into(),
        }),
        "uq_customer_email" => Some(AppError::DuplicateKey {
            field: "email",
            message: "that email is already used".into(),
        }),
        "uq_booking_natural_key" => Some(AppError::DuplicateKey {
            field: "flightId",
            message: "a booking for this customer, flight and date already exists".into(),
        }),
        _ => None,
    }
}

/// Maps a unique violation to its duplicate-key rejection; everything else
/// stays a database error.
fn map_unique_violation(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db) = err {
        if db.is_unique_violation() {
            if let Some(dup) = db.constraint().and_then(duplicate_for_constraint) {
                return dup;
            }
        }
    }
    AppError::Db(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_schema_constraint_maps_to_a_field() {
        for (constraint, field) in [
            ("uq_flight_number", "number"),
            ("uq_customer_email", "email"),
            ("uq_booking_natural_key", "flightId"),
        ] {
            match duplicate_for_constraint(constraint) {
                Some(AppError::DuplicateKey { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected DuplicateKey for {constraint}, got {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_constraints_are_not_claimed() {
        assert!(duplicate_for_constraint("booking_pkey").is_none());
    }
}
