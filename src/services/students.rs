//! Student management service
//!
//! Responses always carry the student's borrowed books, loaded with an
//! explicit query on `books.borrower_id`.

use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::{
        book::Book,
        student::{CreateStudent, Student, StudentDetails, UpdateStudent},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct StudentsService {
    repository: Repository,
}

impl StudentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List students with their borrowed books (two queries in total)
    pub async fn list(&self) -> AppResult<Vec<StudentDetails>> {
        let students = self.repository.students.list().await?;

        let mut loans: HashMap<i64, Vec<Book>> = HashMap::new();
        for book in self.repository.books.list_borrowed().await? {
            if let Some(borrower_id) = book.borrower_id {
                loans.entry(borrower_id).or_default().push(book);
            }
        }

        Ok(students
            .into_iter()
            .map(|student| {
                let books = loans.remove(&student.id).unwrap_or_default();
                StudentDetails::new(student, books)
            })
            .collect())
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<StudentDetails> {
        let student = self.repository.students.get_by_id(id).await?;
        self.with_books(student).await
    }

    pub async fn create(&self, data: &CreateStudent) -> AppResult<StudentDetails> {
        let student = self.repository.students.create(data).await?;
        tracing::info!(student_id = student.id, "Student created: {}", student.name);
        self.get_by_id(student.id).await
    }

    pub async fn update(&self, id: i64, data: &UpdateStudent) -> AppResult<StudentDetails> {
        let student = self.repository.students.update(id, data).await?;
        tracing::info!(student_id = id, "Student updated");
        self.with_books(student).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.students.delete(id).await?;
        tracing::info!(student_id = id, "Student deleted");
        Ok(())
    }

    /// Books whose borrower is `student_id`; the student itself is not looked up
    pub async fn borrowed_books(&self, student_id: i64) -> AppResult<Vec<Book>> {
        self.repository.books.list_by_borrower(student_id).await
    }

    async fn with_books(&self, student: Student) -> AppResult<StudentDetails> {
        let books = self.repository.books.list_by_borrower(student.id).await?;
        Ok(StudentDetails::new(student, books))
    }
}
