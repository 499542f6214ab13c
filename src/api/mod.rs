//! API handlers for the library catalog REST endpoints

pub mod books;
pub mod borrowing;
pub mod health;
pub mod openapi;
pub mod students;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use validator::Validate;

use crate::{
    error::{AppError, FieldErrors},
    AppState,
};

/// JSON body that has been deserialized and passed its `validator` rules.
/// Any failure is reported as a 422 before the handler runs.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection_error)?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// Map a JSON body rejection to a 422, naming the offending field when the
/// deserializer reported one (missing field or `path: message`).
fn json_rejection_error(rejection: JsonRejection) -> AppError {
    let message = rejection.body_text();

    let fields = match rejection {
        JsonRejection::JsonDataError(_) => data_error_field(&message).map(|(field, detail)| {
            let mut fields = FieldErrors::new();
            fields.insert(field, vec![detail]);
            fields
        }),
        _ => None,
    };

    AppError::Validation { message, fields }
}

fn data_error_field(message: &str) -> Option<(String, String)> {
    let detail = message.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(message);

    if let Some(start) = detail.find("missing field `") {
        let rest = &detail[start + "missing field `".len()..];
        let end = rest.find('`')?;
        return Some((rest[..end].to_string(), "field required".to_string()));
    }

    let (path, reason) = detail.split_once(": ")?;
    if path.is_empty() || path.contains(' ') {
        return None;
    }
    Some((path.to_string(), reason.to_string()))
}

/// Positive integer `:id` path segment
pub struct ResourceId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        if id <= 0 {
            let mut fields = FieldErrors::new();
            fields.insert("id".to_string(), vec!["must be greater than 0".to_string()]);
            return Err(AppError::Validation {
                message: format!("Invalid id {}", id),
                fields: Some(fields),
            });
        }

        Ok(ResourceId(id))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // Development setting: any origin, method and header
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/", get(health::root))
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books))
        .route("/books", post(books::create_book))
        .route("/books/borrow", post(borrowing::borrow_book))
        .route("/books/:id", get(books::get_book))
        .route("/books/:id", put(books::update_book))
        .route("/books/:id", delete(books::delete_book))
        // Students
        .route("/students", get(students::list_students))
        .route("/students", post(students::create_student))
        .route("/students/:id", get(students::get_student))
        .route("/students/:id", put(students::update_student))
        .route("/students/:id", delete(students::delete_student))
        .route("/students/:id/books", get(students::list_borrowed_books))
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
