//! Error types for MovieWorld server

use std::collections::BTreeMap;

use axum::{
    extract::rejection::{HostRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::multipart::MultipartRejection;
use thiserror::Error;
use validator::ValidationErrors;

use crate::response::{Envelope, SOMETHING_WENT_WRONG, VALIDATION_FAILED};

pub const INVALID_ACTORS: &str = "Invalid actors assigned.";

/// Field name -> error messages, keyed by wire (camelCase) name
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),

    #[error("Invalid actors assigned")]
    InvalidActors,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Single-field validation failure
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        AppError::Validation(errors)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect::<Vec<_>>();
            fields
                .entry(camel_case(&field))
                .or_default()
                .extend(messages);
        }
        AppError::Validation(fields)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid_field("body", rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::invalid_field("query", rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::invalid_field("id", rejection.body_text())
    }
}

impl From<HostRejection> for AppError {
    fn from(rejection: HostRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// `release_date` -> `releaseDate`
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Every failure is reported as a client error; internal causes stay in the log.
        let body = match self {
            AppError::Validation(fields) => Envelope::failure_with(VALIDATION_FAILED, fields),
            AppError::InvalidActors => Envelope::failure(INVALID_ACTORS),
            AppError::NotFound(msg) | AppError::BadRequest(msg) => Envelope::failure(msg),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                Envelope::failure(SOMETHING_WENT_WRONG)
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {:?}", e);
                Envelope::failure(SOMETHING_WENT_WRONG)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                Envelope::failure(SOMETHING_WENT_WRONG)
            }
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
