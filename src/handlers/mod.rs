//! REST handlers: HTTP-shape translation per entity.
//!
//! Handlers parse the request, call the service and map the outcome to a
//! status code. All rejection payloads come from the error type.

pub mod booking;
pub mod customer;
pub mod flight;
