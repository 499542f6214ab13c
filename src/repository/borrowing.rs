//! Borrowing repository: links a book to the student who borrows it

use crate::{
    db::DbPool,
    error::{AppError, AppResult},
    models::{book::Book, student::Student},
};

#[derive(Clone)]
pub struct BorrowingRepository {
    pool: DbPool,
}

impl BorrowingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Set `book_id`'s borrower to `student_id` inside one transaction.
    ///
    /// A missing student is reported before a missing book. A previous
    /// borrower is overwritten. Returns the student and the updated book.
    pub async fn borrow(&self, student_id: i64, book_id: i64) -> AppResult<(Student, Book)> {
        let mut tx = self.pool.begin().await?;

        // Must be the first statement: the write lock is taken before any read snapshot
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET borrower_id = ?
            WHERE id = ? AND EXISTS (SELECT 1 FROM students WHERE id = ?)
            RETURNING id, title, author, borrower_id
            "#,
        )
        .bind(student_id)
        .bind(book_id)
        .bind(student_id)
        .fetch_optional(&mut *tx)
        .await?;

        let student = sqlx::query_as::<_, Student>("SELECT id, name, age FROM students WHERE id = ?")
            .bind(student_id)
            .fetch_optional(&mut *tx)
            .await?;

        match (student, book) {
            (None, _) => Err(AppError::NotFound("Student not found".to_string())),
            (Some(_), None) => Err(AppError::NotFound("Book not found".to_string())),
            (Some(student), Some(book)) => {
                tx.commit().await?;
                Ok((student, book))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::DatabaseConfig,
        db,
        models::{book::CreateBook, student::CreateStudent},
        repository::Repository,
    };

    async fn seeded() -> (Repository, Student, Book) {
        let repo = Repository::new(db::in_memory().await.unwrap());
        let student = repo
            .students
            .create(&CreateStudent { name: "Ana".into(), age: 20 })
            .await
            .unwrap();
        let book = repo
            .books
            .create(&CreateBook { title: "Dune".into(), author: "Herbert".into() })
            .await
            .unwrap();
        (repo, student, book)
    }

    #[tokio::test]
    async fn test_borrow_sets_borrower() {
        let (repo, student, book) = seeded().await;

        let (_, borrowed) = repo.borrowing.borrow(student.id, book.id).await.unwrap();

        assert_eq!(borrowed.borrower_id, Some(student.id));
        let loans = repo.books.list_by_borrower(student.id).await.unwrap();
        assert_eq!(loans, vec![borrowed]);
    }

    #[tokio::test]
    async fn test_borrow_unknown_student_leaves_book_untouched() {
        let (repo, _, book) = seeded().await;

        let err = repo.borrowing.borrow(99, book.id).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Student not found"));
        assert_eq!(repo.books.get_by_id(book.id).await.unwrap().borrower_id, None);
    }

    #[tokio::test]
    async fn test_borrow_checks_student_before_book() {
        let (repo, _, _) = seeded().await;

        let err = repo.borrowing.borrow(99, 99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Student not found"));
    }

    #[tokio::test]
    async fn test_borrow_unknown_book_is_not_found() {
        let (repo, student, _) = seeded().await;

        let err = repo.borrowing.borrow(student.id, 99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Book not found"));
    }

    #[tokio::test]
    async fn test_borrow_overwrites_previous_borrower() {
        let (repo, ana, book) = seeded().await;
        let bo = repo
            .students
            .create(&CreateStudent { name: "Bo".into(), age: 22 })
            .await
            .unwrap();

        repo.borrowing.borrow(ana.id, book.id).await.unwrap();
        repo.borrowing.borrow(bo.id, book.id).await.unwrap();

        assert!(repo.books.list_by_borrower(ana.id).await.unwrap().is_empty());
        assert_eq!(repo.books.list_by_borrower(bo.id).await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_borrows_on_file_database_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite:{}", dir.path().join("library.db").display()),
            max_connections: 8,
            min_connections: 1,
        };
        let pool = db::create_pool(&config).await.unwrap();
        db::create_schema(&pool).await.unwrap();
        let repo = Repository::new(pool);

        let mut student_ids = Vec::new();
        for i in 0..8 {
            let student = repo
                .students
                .create(&CreateStudent { name: format!("Student {}", i), age: 20 })
                .await
                .unwrap();
            student_ids.push(student.id);
        }
        let book = repo
            .books
            .create(&CreateBook { title: "Dune".into(), author: "Herbert".into() })
            .await
            .unwrap();
        let book_id = book.id;

        for _ in 0..20 {
            let handles: Vec<_> = student_ids
                .iter()
                .map(|&student_id| {
                    let repo = repo.clone();
                    tokio::spawn(async move { repo.borrowing.borrow(student_id, book_id).await })
                })
                .collect();

            for handle in handles {
                let result = handle.await.unwrap();
                assert!(result.is_ok(), "borrow failed: {:?}", result.err());
            }
        }

        let borrower = repo.books.get_by_id(book_id).await.unwrap().borrower_id;
        assert!(borrower.map_or(false, |id| student_ids.contains(&id)));
    }
}
