//! Uniform response envelope: `{ status, message, data }`.

use serde::{Deserialize, Serialize};

pub const SUCCESS: &str = "Success";
pub const CREATED: &str = "Created successfully.";
pub const UPDATED: &str = "Updated successfully.";
pub const DELETED: &str = "Deleted successfully.";
pub const VALIDATION_FAILED: &str = "Validation failed.";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong.";

/// Every endpoint outcome is wrapped in this structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn ok(data: T) -> Self {
        Self::success(SUCCESS, data)
    }

    pub fn created(data: T) -> Self {
        Self::success(CREATED, data)
    }

    pub fn updated(data: T) -> Self {
        Self::success(UPDATED, data)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            data: None,
        }
    }

    pub fn failure_with(message: impl Into<String>, data: T) -> Self {
        Self {
            status: false,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// Success without payload
    pub fn deleted() -> Self {
        Self {
            status: true,
            message: DELETED.to_string(),
            data: None,
        }
    }
}
