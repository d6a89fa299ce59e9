//! Customers repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::customer::{CreateCustomer, Customer, CustomerQuery, UpdateCustomer},
};

/// Bind parameter for the dynamically built search query
enum SearchParam {
    Text(String),
    Int(i32),
}

#[derive(Clone)]
pub struct CustomersRepository {
    pool: Pool<Postgres>,
}

impl CustomersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get customer by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer with id {} not found", id)))
    }

    /// Get customer by username
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE LOWER(username) = LOWER($1)",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// All active (non-deleted) customers
    pub async fn list_active(&self) -> AppResult<Vec<Customer>> {
        let customers =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE active = TRUE ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(customers)
    }

    /// Search customers. Like book search this scans the whole registry,
    /// deleted rows included.
    pub async fn find(&self, query: &CustomerQuery) -> AppResult<Vec<Customer>> {
        let mut conditions = Vec::new();
        let mut params: Vec<SearchParam> = Vec::new();

        macro_rules! like_filter {
            ($field:expr, $column:expr) => {
                if let Some(ref value) = $field {
                    params.push(SearchParam::Text(format!("%{}%", value)));
                    conditions.push(format!("{} ILIKE ${}", $column, params.len()));
                }
            };
        }

        like_filter!(query.first_name, "first_name");
        like_filter!(query.last_name, "last_name");
        like_filter!(query.email, "email");
        like_filter!(query.phone_number, "phone_number");
        like_filter!(query.city, "city");
        like_filter!(query.username, "username");

        if let Some(id) = query.id {
            params.push(SearchParam::Int(id));
            conditions.push(format!("id = ${}", params.len()));
        }
        if let Some(role) = query.role {
            params.push(SearchParam::Text(role.as_str().to_string()));
            conditions.push(format!("role = ${}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_query = format!(
            "SELECT * FROM customers {} ORDER BY id",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, Customer>(&select_query);
        for param in &params {
            builder = match param {
                SearchParam::Text(s) => builder.bind(s),
                SearchParam::Int(i) => builder.bind(i),
            };
        }
        let customers = builder.fetch_all(&self.pool).await?;

        Ok(customers)
    }

    /// Check if username already exists
    pub async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE LOWER(username) = LOWER($1))",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Check if phone number already exists
    pub async fn phone_exists(&self, phone_number: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE phone_number = $1)")
                .bind(phone_number)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create a new customer
    pub async fn create(
        &self,
        customer: &CreateCustomer,
        birth_date: NaiveDate,
        age: i32,
        password_hash: &str,
    ) -> AppResult<Customer> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO customers (
                first_name, last_name, age, birth_date, city, email,
                phone_number, username, password, role, active
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, TRUE)
            RETURNING id
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(age)
        .bind(birth_date)
        .bind(&customer.city)
        .bind(&customer.email)
        .bind(&customer.phone_number)
        .bind(&customer.username)
        .bind(password_hash)
        .bind(customer.role)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update an existing customer; only provided fields change
    pub async fn update(
        &self,
        update: &UpdateCustomer,
        birth_date: Option<NaiveDate>,
        age: Option<i32>,
        password_hash: Option<String>,
    ) -> AppResult<Customer> {
        // Build dynamic update query
        let mut sets: Vec<String> = Vec::new();
        let mut param_idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, param_idx));
                    param_idx += 1;
                }
            };
        }

        add_field!(update.first_name, "first_name");
        add_field!(update.last_name, "last_name");
        add_field!(birth_date, "birth_date");
        add_field!(age, "age");
        add_field!(update.city, "city");
        add_field!(update.email, "email");
        add_field!(update.phone_number, "phone_number");
        add_field!(update.username, "username");
        add_field!(update.role, "role");
        add_field!(password_hash, "password");

        if sets.is_empty() {
            return self.get_by_id(update.id).await;
        }

        let query = format!(
            "UPDATE customers SET {} WHERE id = ${}",
            sets.join(", "),
            param_idx
        );

        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(update.first_name);
        bind_field!(update.last_name);
        bind_field!(birth_date);
        bind_field!(age);
        bind_field!(update.city);
        bind_field!(update.email);
        bind_field!(update.phone_number);
        bind_field!(update.username);
        bind_field!(update.role);
        bind_field!(password_hash);

        let result = builder.bind(update.id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Customer with id {} not found",
                update.id
            )));
        }

        self.get_by_id(update.id).await
    }

    /// Soft-delete a customer
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("UPDATE customers SET active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Customer with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Persist a recomputed age
    pub async fn set_age(&self, id: i32, age: i32) -> AppResult<()> {
        sqlx::query("UPDATE customers SET age = $1 WHERE id = $2")
            .bind(age)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
