//! In-memory repository implementations for service tests.
//!
//! They mirror the store's behavior where it matters to the workflow:
//! ordered listings, first-match unique lookups, and unique-constraint
//! enforcement on create.

use crate::domain::{Booking, Customer, Flight, NewCustomer, NewFlight, ValidBooking};
use crate::error::AppError;
use crate::repository::{BookingRepository, CustomerRepository, FlightRepository};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;

struct Table<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table {
            rows: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct InMemoryFlights {
    table: Mutex<Table<Flight>>,
}

#[async_trait]
impl FlightRepository for InMemoryFlights {
    async fn find_all_ordered_by_number(&self) -> Result<Vec<Flight>, AppError> {
        let mut rows = self.table.lock().unwrap().rows.clone();
        rows.sort_by(|a, b| a.number.cmp(&b.number));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Flight>, AppError> {
        Ok(self
            .table
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|f| f.id == id)
            .cloned())
    }

    async fn find_by_number(&self, number: &str) -> Result<Option<Flight>, AppError> {
        Ok(self
            .table
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|f| f.number == number)
            .cloned())
    }

    async fn create(&self, new: &NewFlight) -> Result<Flight, AppError> {
        let mut table = self.table.lock().unwrap();
        if table.rows.iter().any(|f| f.number == new.number) {
            return Err(AppError::DuplicateKey {
                field: "number",
                message: "that flight number already exists".into(),
            });
        }
        let flight = Flight {
            id: table.assign_id(),
            number: new.number.clone(),
            point_of_departure: new.point_of_departure.clone(),
            destination: new.destination.clone(),
        };
        table.rows.push(flight.clone());
        Ok(flight)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|f| f.id != id);
        Ok(table.rows.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryCustomers {
    table: Mutex<Table<Customer>>,
}

#[async_trait]
impl CustomerRepository for InMemoryCustomers {
    async fn find_all_ordered_by_name(&self) -> Result<Vec<Customer>, AppError> {
        let mut rows = self.table.lock().unwrap().rows.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        Ok(self
            .table
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, AppError> {
        Ok(self
            .table
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn create(&self, new: &NewCustomer) -> Result<Customer, AppError> {
        let mut table = self.table.lock().unwrap();
        if table.rows.iter().any(|c| c.email == new.email) {
            return Err(AppError::DuplicateKey {
                field: "email",
                message: "that email is already used".into(),
            });
        }
        let customer = Customer {
            id: table.assign_id(),
            name: new.name.clone(),
            email: new.email.clone(),
            phone_number: new.phone_number.clone(),
        };
        table.rows.push(customer.clone());
        Ok(customer)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|c| c.id != id);
        Ok(table.rows.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryBookings {
    table: Mutex<Table<Booking>>,
}

#[async_trait]
impl BookingRepository for InMemoryBookings {
    async fn find_all_ordered_by_date(&self) -> Result<Vec<Booking>, AppError> {
        let mut rows = self.table.lock().unwrap().rows.clone();
        rows.sort_by_key(|b| (b.date, b.id));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError> {
        Ok(self
            .table
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn find_by_natural_key(
        &self,
        customer_id: i64,
        flight_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Booking>, AppError> {
        Ok(self
            .table
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|b| b.customer_id == customer_id && b.flight_id == flight_id && b.date == date)
            .cloned())
    }

    async fn find_by_customer(&self, customer_id: i64) -> Result<Vec<Booking>, AppError> {
        let mut rows: Vec<Booking> = self
            .table
            .lock()
            .unwrap()
            .rows
            .iter()
            .filter(|b| b.customer_id == customer_id)
            .cloned()
            .collect();
        rows.sort_by_key(|b| (b.date, b.id));
        Ok(rows)
    }

    async fn create(&self, new: &ValidBooking) -> Result<Booking, AppError> {
        let mut table = self.table.lock().unwrap();
        if table.rows.iter().any(|b| {
            b.customer_id == new.customer_id && b.flight_id == new.flight_id && b.date == new.date
        }) {
            return Err(AppError::DuplicateKey {
                field: "flightId",
                message: "a booking for this customer, flight and date already exists".into(),
            });
        }
        let booking = Booking {
            id: table.assign_id(),
            customer_id: new.customer_id,
            flight_id: new.flight_id,
            date: new.date,
        };
        table.rows.push(booking.clone());
        Ok(booking)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|b| b.id != id);
        Ok(table.rows.len() < before)
    }
}
