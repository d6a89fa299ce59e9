//! Customer registry service

use chrono::{NaiveDate, Utc};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::customer::{CreateCustomer, Customer, CustomerQuery, UpdateCustomer},
    repository::Repository,
    validation,
};

use super::auth::hash_password;

#[derive(Clone)]
pub struct CustomersService {
    repository: Repository,
}

impl CustomersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Active customers with their stored ages refreshed from the birth
    /// date. Changed ages are persisted so later reads stay consistent.
    pub async fn list_customers(&self) -> AppResult<Vec<Customer>> {
        let mut customers = self.repository.customers.list_active().await?;
        let today = Utc::now().date_naive();

        let mut updated = 0usize;
        for customer in customers.iter_mut() {
            let calculated = validation::age_on(customer.birth_date, today);
            if customer.age != Some(calculated) {
                self.repository.customers.set_age(customer.id, calculated).await?;
                customer.age = Some(calculated);
                updated += 1;
            }
        }

        if updated > 0 {
            tracing::info!(updated, "refreshed customer ages");
        }

        Ok(customers)
    }

    /// Filtered registry search
    pub async fn find_customers(&self, query: &CustomerQuery) -> AppResult<Vec<Customer>> {
        self.repository.customers.find(query).await
    }

    /// Single customer for the edit form
    pub async fn get_customer(&self, id: i32) -> AppResult<Customer> {
        self.repository.customers.get_by_id(id).await
    }

    /// Validate and create a customer (staff form)
    pub async fn create_customer(&self, customer: CreateCustomer) -> AppResult<Customer> {
        customer
            .validate()
            .map_err(|e| AppError::Validation(validation::first_message(&e)))?;

        let birth_date = parse_birth_date(&customer.birth_date)?;
        let age = validation::age_on(birth_date, Utc::now().date_naive());

        if self.repository.customers.username_exists(&customer.username).await? {
            return Err(AppError::BadRequest("Username is already taken.".to_string()));
        }
        if self.repository.customers.email_exists(&customer.email).await? {
            return Err(AppError::BadRequest("Email is already registered.".to_string()));
        }
        if self.repository.customers.phone_exists(&customer.phone_number).await? {
            return Err(AppError::BadRequest(
                "Phone number is already registered.".to_string(),
            ));
        }

        let password_hash = hash_password(&customer.password)?;
        let created = self
            .repository
            .customers
            .create(&customer, birth_date, age, &password_hash)
            .await?;

        tracing::info!(customer_id = created.id, username = %created.username, "customer created");
        Ok(created)
    }

    /// Self-registration: the staff create flow plus the password
    /// strength rule enforced on public signups.
    pub async fn register(&self, customer: CreateCustomer) -> AppResult<Customer> {
        validation::validate_password_strength(&customer.password).map_err(|e| {
            AppError::Validation(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid password".to_string()),
            )
        })?;

        self.create_customer(customer).await
    }

    /// Partial update; only provided fields are validated and applied
    pub async fn update_customer(&self, update: UpdateCustomer) -> AppResult<Customer> {
        update
            .validate()
            .map_err(|e| AppError::Validation(validation::first_message(&e)))?;

        // Make sure the target exists before uniqueness checks, so an
        // unknown id answers 404 rather than a misleading duplicate error
        self.repository.customers.get_by_id(update.id).await?;

        let (birth_date, age) = match update.birth_date {
            Some(ref raw) => {
                let parsed = parse_birth_date(raw)?;
                let age = validation::age_on(parsed, Utc::now().date_naive());
                (Some(parsed), Some(age))
            }
            None => (None, None),
        };

        if let Some(ref email) = update.email {
            if self.repository.customers.email_exists(email).await? {
                return Err(AppError::BadRequest(
                    "Please provide a valid email address, or email is already registered."
                        .to_string(),
                ));
            }
        }
        if let Some(ref phone) = update.phone_number {
            if self.repository.customers.phone_exists(phone).await? {
                return Err(AppError::BadRequest(
                    "Phone number must be between 10 and 15 characters and include digits, spaces, '-', '+', or '()'."
                        .to_string(),
                ));
            }
        }

        let password_hash = match update.password {
            Some(ref password) => Some(hash_password(password)?),
            None => None,
        };

        let updated = self
            .repository
            .customers
            .update(&update, birth_date, age, password_hash)
            .await?;

        tracing::info!(customer_id = updated.id, "customer updated");
        Ok(updated)
    }

    /// Soft-delete a customer
    pub async fn delete_customer(&self, id: i32) -> AppResult<()> {
        self.repository.customers.delete(id).await?;
        tracing::info!(customer_id = id, "customer deleted");
        Ok(())
    }
}

fn parse_birth_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Birthdate must be in the format YYYY-MM-DD.".to_string()))
}
