//! Borrow endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::AppResult, AppState};

use super::ValidatedJson;

/// Borrow request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BorrowRequest {
    /// Borrowing student
    pub student_id: i64,
    /// Borrowed book
    pub book_id: i64,
}

/// Borrow confirmation
#[derive(Serialize, ToSchema)]
pub struct BorrowResponse {
    pub message: String,
}

/// Lend a book to a student
#[utoipa::path(
    post,
    path = "/books/borrow",
    tag = "books",
    request_body = BorrowRequest,
    responses(
        (status = 200, description = "Book borrowed", body = BorrowResponse),
        (status = 404, description = "Student or book not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BorrowRequest>,
) -> AppResult<Json<BorrowResponse>> {
    let message = state
        .services
        .borrowing
        .borrow(request.student_id, request.book_id)
        .await?;

    Ok(Json(BorrowResponse { message }))
}
