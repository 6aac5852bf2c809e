use crate::domain::{Customer, NewCustomer};
use crate::error::AppError;
use crate::repository::CustomerRepository;

/// Orchestrates validation, business rules and the repository for customers.
pub struct CustomerService<R> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: R) -> Self {
        CustomerService { repo }
    }

    /// Create workflow: shape validation, then uniqueness of the email,
    /// then persist.
    pub async fn create(&self, new: NewCustomer) -> Result<Customer, AppError> {
        new.validate().map_err(AppError::Validation)?;
        if self.repo.find_by_email(&new.email).await?.is_some() {
            return Err(AppError::DuplicateKey {
                field: "email",
                message: "that email is already used".into(),
            });
        }
        let customer = self.repo.create(&new).await?;
        tracing::info!(id = customer.id, "customer created");
        Ok(customer)
    }

    pub async fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        self.repo.find_all_ordered_by_name().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Customer, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no customer with id {id}")))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Customer, AppError> {
        self.repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no customer with email {email}")))
    }

    /// Deletes the customer and their dependent bookings.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound(format!("no customer with id {id}")));
        }
        tracing::info!(id, "customer deleted");
        Ok(())
    }
}
