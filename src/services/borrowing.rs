//! Borrowing service

use crate::{error::AppResult, repository::Repository};

#[derive(Clone)]
pub struct BorrowingService {
    repository: Repository,
}

impl BorrowingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Record that a student borrows a book and return the confirmation message
    pub async fn borrow(&self, student_id: i64, book_id: i64) -> AppResult<String> {
        let (student, book) = self.repository.borrowing.borrow(student_id, book_id).await?;

        tracing::info!(student_id, book_id, "Book borrowed");

        Ok(format!("{} borrowed {} successfully", student.name, book.title))
    }
}
