//! Library Catalog
//!
//! A REST JSON API over a small library: books, students and the loans
//! linking them, stored in SQLite.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire repositories and services on top of an open pool
    pub fn new(pool: db::DbPool) -> Self {
        let repository = repository::Repository::new(pool);

        Self {
            services: Arc::new(services::Services::new(repository)),
        }
    }
}
