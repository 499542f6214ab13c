//! Repository layer for database operations

pub mod books;
pub mod borrowing;
pub mod students;

use crate::db::DbPool;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: DbPool,
    pub books: books::BooksRepository,
    pub students: students::StudentsRepository,
    pub borrowing: borrowing::BorrowingRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            students: students::StudentsRepository::new(pool.clone()),
            borrowing: borrowing::BorrowingRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database, used by the readiness probe
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
