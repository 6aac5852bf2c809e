use crate::domain::{Flight, NewFlight};
use crate::error::AppError;
use crate::repository::FlightRepository;

/// Orchestrates validation, business rules and the repository for flights.
pub struct FlightService<R> {
    repo: R,
}

impl<R: FlightRepository> FlightService<R> {
    pub fn new(repo: R) -> Self {
        FlightService { repo }
    }

    /// Create workflow: shape validation, then self-consistency, then
    /// uniqueness of the number, then persist.
    pub async fn create(&self, new: NewFlight) -> Result<Flight, AppError> {
        new.validate().map_err(AppError::Validation)?;
        if new.destination == new.point_of_departure {
            return Err(AppError::SelfConflict {
                field: "destination",
                message: "destination must differ from the point of departure".into(),
            });
        }
        if self.repo.find_by_number(&new.number).await?.is_some() {
            return Err(AppError::DuplicateKey {
                field: "number",
                message: format!("flight number {} already exists", new.number),
            });
        }
        let flight = self.repo.create(&new).await?;
        tracing::info!(id = flight.id, number = %flight.number, "flight created");
        Ok(flight)
    }

    pub async fn find_all(&self) -> Result<Vec<Flight>, AppError> {
        self.repo.find_all_ordered_by_number().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Flight, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no flight with id {id}")))
    }

    pub async fn find_by_number(&self, number: &str) -> Result<Flight, AppError> {
        self.repo
            .find_by_number(number)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no flight with number {number}")))
    }

    /// Deletes the flight and its dependent bookings.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound(format!("no flight with id {id}")));
        }
        tracing::info!(id, "flight deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::InMemoryFlights;

    fn payload(number: &str, from: &str, to: &str) -> NewFlight {
        NewFlight {
            number: number.into(),
            point_of_departure: from.into(),
            destination: to.into(),
        }
    }

    #[tokio::test]
    async fn create_assigns_an_id_and_persists() {
        let service = FlightService::new(InMemoryFlights::default());
        let flight = service.create(payload("AB123", "LHR", "JFK")).await.unwrap();
        assert!(flight.id > 0);
        let all = service.find_all().await.unwrap();
        assert_eq!(all, vec![flight]);
    }

    #[tokio::test]
    async fn equal_airports_are_rejected_and_nothing_is_persisted() {
        let service = FlightService::new(InMemoryFlights::default());
        let err = service
            .create(payload("AB123", "LHR", "LHR"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::SelfConflict {
                field: "destination",
                ..
            }
        ));
        assert!(service.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_number_is_rejected_and_one_row_remains() {
        let service = FlightService::new(InMemoryFlights::default());
        service.create(payload("AB123", "LHR", "JFK")).await.unwrap();
        let err = service
            .create(payload("AB123", "CDG", "AMS"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey { field: "number", .. }));
        let all = service.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].point_of_departure, "LHR");
    }

    #[tokio::test]
    async fn shape_errors_come_before_business_rules() {
        let service = FlightService::new(InMemoryFlights::default());
        // Malformed number AND equal airports: the shape failure must win.
        let err = service.create(payload("ab", "LHR", "LHR")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn listing_is_ordered_by_number_regardless_of_insertion_order() {
        let service = FlightService::new(InMemoryFlights::default());
        service.create(payload("ZZ900", "LHR", "JFK")).await.unwrap();
        service.create(payload("AA100", "CDG", "AMS")).await.unwrap();
        service.create(payload("MM500", "FRA", "OSL")).await.unwrap();
        let numbers: Vec<_> = service
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.number)
            .collect();
        assert_eq!(numbers, vec!["AA100", "MM500", "ZZ900"]);
    }

    #[tokio::test]
    async fn delete_of_an_unknown_id_is_not_found_and_leaves_the_store_unchanged() {
        let service = FlightService::new(InMemoryFlights::default());
        service.create(payload("AB123", "LHR", "JFK")).await.unwrap();
        let err = service.delete(99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(service.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn lookup_by_number_finds_the_flight_or_reports_not_found() {
        let service = FlightService::new(InMemoryFlights::default());
        service.create(payload("AB123", "LHR", "JFK")).await.unwrap();
        assert_eq!(service.find_by_number("AB123").await.unwrap().number, "AB123");
        assert!(matches!(
            service.find_by_number("XX000").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
