//! Business logic services

pub mod books;
pub mod borrowing;
pub mod students;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub students: students::StudentsService,
    pub borrowing: borrowing::BorrowingService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            books: books::BooksService::new(repository.clone()),
            students: students::StudentsService::new(repository.clone()),
            borrowing: borrowing::BorrowingService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the database answers
    pub async fn ping_database(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
