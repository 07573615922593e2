//! Person (actor) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Person record as stored and as listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: i32,
    pub name: String,
    pub date_of_birth: NaiveDate,
}

/// Person with the titles of the movies they appear in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetails {
    pub id: i32,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub movies: Vec<String>,
}

impl PersonDetails {
    pub fn new(actor: Actor, movies: Vec<String>) -> Self {
        Self {
            id: actor.id,
            name: actor.name,
            date_of_birth: actor.date_of_birth,
            movies,
        }
    }
}

/// Create person request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePerson {
    #[validate(
        required(message = "Name of the person is required."),
        length(min = 1, message = "Name of the person is required.")
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::date::deserialize_optional_date")]
    #[validate(required(message = "Date of birth is required."))]
    pub date_of_birth: Option<NaiveDate>,
}

/// Column values written for a person row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonFields {
    pub name: String,
    pub date_of_birth: NaiveDate,
}

impl CreatePerson {
    /// Take the validated column values. Returns `None` if a required field is absent.
    pub fn fields(&self) -> Option<PersonFields> {
        Some(PersonFields {
            name: self.name.clone()?,
            date_of_birth: self.date_of_birth?,
        })
    }
}

/// One page of persons plus the total row count
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersonPage {
    pub persons: Vec<Actor>,
    pub count: i64,
}
