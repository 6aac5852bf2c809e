use crate::domain::{Booking, NewBooking};
use crate::error::AppError;
use crate::repository::{BookingRepository, CustomerRepository, FlightRepository};
use chrono::Utc;

/// Orchestrates validation, business rules and the repositories for bookings.
///
/// Bookings reference a customer and a flight, so this is the one service
/// composed from more than one repository.
pub struct BookingService<B, C, F> {
    bookings: B,
    customers: C,
    flights: F,
}

impl<B, C, F> BookingService<B, C, F>
where
    B: BookingRepository,
    C: CustomerRepository,
    F: FlightRepository,
{
    pub fn new(bookings: B, customers: C, flights: F) -> Self {
        BookingService {
            bookings,
            customers,
            flights,
        }
    }

    /// Create workflow: shape validation, then referential integrity of the
    /// customer and flight ids, then uniqueness of the natural key, then
    /// persist.
    pub async fn create(&self, new: NewBooking) -> Result<Booking, AppError> {
        let today = Utc::now().date_naive();
        let valid = new.validate(today).map_err(AppError::Validation)?;
        if self.customers.find_by_id(valid.customer_id).await?.is_none() {
            return Err(AppError::InvalidReference {
                field: "customerId",
                message: format!("no customer with id {}", valid.customer_id),
            });
        }
        if self.flights.find_by_id(valid.flight_id).await?.is_none() {
            return Err(AppError::InvalidReference {
                field: "flightId",
                message: format!("no flight with id {}", valid.flight_id),
            });
        }
        if self
            .bookings
            .find_by_natural_key(valid.customer_id, valid.flight_id, valid.date)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateKey {
                field: "flightId",
                message: "a booking for this customer, flight and date already exists".into(),
            });
        }
        let booking = self.bookings.create(&valid).await?;
        tracing::info!(
            id = booking.id,
            customer_id = booking.customer_id,
            flight_id = booking.flight_id,
            "booking created"
        );
        Ok(booking)
    }

    pub async fn find_all(&self) -> Result<Vec<Booking>, AppError> {
        self.bookings.find_all_ordered_by_date().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Booking, AppError> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no booking with id {id}")))
    }

    /// All bookings of one customer; the customer must exist.
    pub async fn find_by_customer(&self, customer_id: i64) -> Result<Vec<Booking>, AppError> {
        if self.customers.find_by_id(customer_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "no customer with id {customer_id}"
            )));
        }
        self.bookings.find_by_customer(customer_id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.bookings.delete(id).await? {
            return Err(AppError::NotFound(format!("no booking with id {id}")));
        }
        tracing::info!(id, "booking deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewCustomer, NewFlight};
    use crate::service::testing::{InMemoryBookings, InMemoryCustomers, InMemoryFlights};
    use chrono::{Duration, NaiveDate};

    async fn service_with_one_customer_and_flight(
    ) -> BookingService<InMemoryBookings, InMemoryCustomers, InMemoryFlights> {
        let customers = InMemoryCustomers::default();
        customers
            .create(&NewCustomer {
                name: "Ada Lovelace".into(),
                email: "ada@example.org".into(),
                phone_number: "07700900123".into(),
            })
            .await
            .unwrap();
        let flights = InMemoryFlights::default();
        flights
            .create(&NewFlight {
                number: "AB123".into(),
                point_of_departure: "LHR".into(),
                destination: "JFK".into(),
            })
            .await
            .unwrap();
        BookingService::new(InMemoryBookings::default(), customers, flights)
    }

    fn next_week() -> NaiveDate {
        Utc::now().date_naive() + Duration::days(7)
    }

    fn payload(customer_id: i64, flight_id: i64, date: NaiveDate) -> NewBooking {
        NewBooking {
            customer_id: Some(customer_id),
            flight_id: Some(flight_id),
            date: Some(date),
        }
    }

    #[tokio::test]
    async fn create_assigns_an_id_and_persists() {
        let service = service_with_one_customer_and_flight().await;
        let booking = service.create(payload(1, 1, next_week())).await.unwrap();
        assert!(booking.id > 0);
        assert_eq!(service.find_all().await.unwrap(), vec![booking]);
    }

    #[tokio::test]
    async fn unknown_customer_is_rejected_before_the_flight_is_checked() {
        let service = service_with_one_customer_and_flight().await;
        // Both references are dangling; the customer check must win.
        let err = service.create(payload(9, 9, next_week())).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidReference {
                field: "customerId",
                ..
            }
        ));
        assert!(service.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_flight_is_rejected() {
        let service = service_with_one_customer_and_flight().await;
        let err = service.create(payload(1, 9, next_week())).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidReference {
                field: "flightId",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn duplicate_natural_key_is_rejected_and_one_row_remains() {
        let service = service_with_one_customer_and_flight().await;
        let date = next_week();
        service.create(payload(1, 1, date)).await.unwrap();
        let err = service.create(payload(1, 1, date)).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey { .. }));
        assert_eq!(service.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn the_same_flight_on_another_date_is_a_distinct_booking() {
        let service = service_with_one_customer_and_flight().await;
        let date = next_week();
        service.create(payload(1, 1, date)).await.unwrap();
        service
            .create(payload(1, 1, date + Duration::days(1)))
            .await
            .unwrap();
        assert_eq!(service.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn a_past_date_is_a_shape_failure() {
        let service = service_with_one_customer_and_flight().await;
        let err = service
            .create(payload(1, 1, Utc::now().date_naive() - Duration::days(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn listing_by_customer_requires_the_customer_to_exist() {
        let service = service_with_one_customer_and_flight().await;
        service.create(payload(1, 1, next_week())).await.unwrap();
        assert_eq!(service.find_by_customer(1).await.unwrap().len(), 1);
        assert!(matches!(
            service.find_by_customer(9).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
