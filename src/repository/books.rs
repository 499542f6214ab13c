//! Books repository for database operations

use crate::{
    db::DbPool,
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

const BOOK_COLUMNS: &str = "id, title, author, borrower_id";

#[derive(Clone)]
pub struct BooksRepository {
    pool: DbPool,
}

impl BooksRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// List books, optionally restricted to an exact author
    pub async fn list(&self, author: Option<&str>) -> AppResult<Vec<Book>> {
        let books = match author {
            Some(author) => {
                sqlx::query_as::<_, Book>(&format!(
                    "SELECT {} FROM books WHERE author = ? ORDER BY id",
                    BOOK_COLUMNS
                ))
                .bind(author)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books ORDER BY id", BOOK_COLUMNS))
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(books)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books WHERE id = ?", BOOK_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Books currently borrowed by a student
    pub async fn list_by_borrower(&self, student_id: i64) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE borrower_id = ? ORDER BY id",
            BOOK_COLUMNS
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Every book that has a borrower, used to populate student lists in one query
    pub async fn list_borrowed(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE borrower_id IS NOT NULL ORDER BY id",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Create a new book
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "INSERT INTO books (title, author) VALUES (?, ?) RETURNING {}",
            BOOK_COLUMNS
        ))
        .bind(&data.title)
        .bind(&data.author)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    /// Replace title and author of an existing book
    pub async fn update(&self, id: i64, data: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            "UPDATE books SET title = ?, author = ? WHERE id = ? RETURNING {}",
            BOOK_COLUMNS
        ))
        .bind(&data.title)
        .bind(&data.author)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Delete a book
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn new_book(title: &str, author: &str) -> CreateBook {
        CreateBook {
            title: title.to_string(),
            author: author.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_fields() {
        let repo = BooksRepository::new(db::in_memory().await.unwrap());

        let created = repo.create(&new_book("Dune", "Herbert")).await.unwrap();
        let fetched = repo.get_by_id(created.id).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(fetched, created);
        assert_eq!(fetched.borrower_id, None);
    }

    #[tokio::test]
    async fn test_list_filters_on_exact_author() {
        let repo = BooksRepository::new(db::in_memory().await.unwrap());
        repo.create(&new_book("Dune", "Herbert")).await.unwrap();
        repo.create(&new_book("Emma", "Austen")).await.unwrap();
        repo.create(&new_book("Children of Dune", "Herbert")).await.unwrap();
        repo.create(&new_book("Persuasion", "Austen ")).await.unwrap();

        let herbert = repo.list(Some("Herbert")).await.unwrap();
        let titles: Vec<_> = herbert.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Dune", "Children of Dune"]);

        let austen = repo.list(Some("Austen")).await.unwrap();
        assert_eq!(austen.len(), 1);

        assert_eq!(repo.list(None).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_update_missing_book_does_not_insert() {
        let repo = BooksRepository::new(db::in_memory().await.unwrap());

        let err = repo
            .update(42, &UpdateBook { title: "X".into(), author: "Y".into() })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(repo.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_twice_reports_not_found() {
        let repo = BooksRepository::new(db::in_memory().await.unwrap());
        let book = repo.create(&new_book("Dune", "Herbert")).await.unwrap();

        repo.delete(book.id).await.unwrap();
        let err = repo.delete(book.id).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
