//! Biblion Library Loan Management System
//!
//! A Rust implementation of the Biblion library backend, providing the
//! REST JSON API consumed by the staff interface: book catalog, customer
//! registry, loan tracking and authentication.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
