//! Student endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::{
        book::Book,
        student::{CreateStudent, StudentDetails, UpdateStudent},
    },
    AppState,
};

use super::{ResourceId, ValidatedJson};

/// List students with their borrowed books
#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    responses(
        (status = 200, description = "List of students", body = Vec<StudentDetails>)
    )
)]
pub async fn list_students(State(state): State<AppState>) -> AppResult<Json<Vec<StudentDetails>>> {
    let students = state.services.students.list().await?;
    Ok(Json(students))
}

/// Get student by ID
#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "students",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student details", body = StudentDetails),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid student ID", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<StudentDetails>> {
    let student = state.services.students.get_by_id(id).await?;
    Ok(Json(student))
}

/// Create a new student
#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    request_body = CreateStudent,
    responses(
        (status = 200, description = "Student created", body = StudentDetails),
        (status = 422, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<CreateStudent>,
) -> AppResult<Json<StudentDetails>> {
    let student = state.services.students.create(&data).await?;
    Ok(Json(student))
}

/// Update name and/or age of a student
#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "students",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    request_body = UpdateStudent,
    responses(
        (status = 200, description = "Student updated", body = StudentDetails),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ValidatedJson(data): ValidatedJson<UpdateStudent>,
) -> AppResult<Json<StudentDetails>> {
    let student = state.services.students.update(id, &data).await?;
    Ok(Json(student))
}

/// Delete a student
#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "students",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<StatusCode> {
    state.services.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Books currently borrowed by a student
#[utoipa::path(
    get,
    path = "/students/{id}/books",
    tag = "students",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Borrowed books (empty for unknown students)", body = Vec<Book>)
    )
)]
pub async fn list_borrowed_books(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.students.borrowed_books(id).await?;
    Ok(Json(books))
}
