//! Student model and related request types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::Book;

/// Student record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

/// Student with the books currently borrowed, as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentDetails {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub borrowed_books: Vec<Book>,
}

impl StudentDetails {
    pub fn new(student: Student, borrowed_books: Vec<Book>) -> Self {
        Self {
            id: student.id,
            name: student.name,
            age: student.age,
            borrowed_books,
        }
    }
}

/// Create student request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudent {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0, message = "age must not be negative"))]
    pub age: i64,
}

/// Update student request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudent {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "age must not be negative"))]
    pub age: Option<i64>,
}
