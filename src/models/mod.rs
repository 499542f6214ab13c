//! Data models for the library catalog

pub mod book;
pub mod student;

// Re-export commonly used types
pub use book::{Book, BookQuery, CreateBook, UpdateBook};
pub use student::{CreateStudent, Student, StudentDetails, UpdateStudent};
