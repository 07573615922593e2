//! Movie model and related types

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::person::Actor;

/// Full movie model (DB + API)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub language: String,
    pub release_date: NaiveDate,
    /// URL or path of the poster image
    pub cover_image: Option<String>,
    // Relations (loaded separately)
    #[sqlx(skip)]
    #[serde(default)]
    pub actors: Vec<Actor>,
}

impl Movie {
    /// Ids of the persons currently cast in this movie
    pub fn actor_ids(&self) -> BTreeSet<i32> {
        self.actors.iter().map(|a| a.id).collect()
    }
}

/// Create movie request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovie {
    #[validate(
        required(message = "Name of the movie is required."),
        length(min = 1, message = "Name of the movie is required.")
    )]
    pub title: Option<String>,
    pub description: Option<String>,
    /// Person ids to cast
    #[validate(required(message = "Actors of the movie are required."))]
    pub actors: Option<Vec<i32>>,
    #[validate(
        required(message = "Language of the movie is required."),
        length(min = 1, message = "Language of the movie is required.")
    )]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "super::date::deserialize_optional_date")]
    #[validate(required(message = "Release date of the movie is required."))]
    pub release_date: Option<NaiveDate>,
    pub cover_image: Option<String>,
}

/// Update movie request. The target id travels in the body.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovie {
    #[serde(default)]
    pub id: i32,
    #[validate(
        required(message = "Name of the movie is required."),
        length(min = 1, message = "Name of the movie is required.")
    )]
    pub title: Option<String>,
    pub description: Option<String>,
    /// Person ids that make up the whole new cast
    #[validate(required(message = "Actors of the movie are required."))]
    pub actors: Option<Vec<i32>>,
    #[validate(
        required(message = "Language of the movie is required."),
        length(min = 1, message = "Language of the movie is required.")
    )]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "super::date::deserialize_optional_date")]
    #[validate(required(message = "Release date of the movie is required."))]
    pub release_date: Option<NaiveDate>,
    pub cover_image: Option<String>,
}

/// Column values written for a movie row, on insert or update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieFields {
    pub title: String,
    pub description: Option<String>,
    pub language: String,
    pub release_date: NaiveDate,
    pub cover_image: Option<String>,
}

impl CreateMovie {
    /// Requested cast; empty when absent
    pub fn actor_ids(&self) -> &[i32] {
        self.actors.as_deref().unwrap_or_default()
    }

    /// Take the validated column values. Returns `None` if a required field is absent.
    pub fn fields(&self) -> Option<MovieFields> {
        Some(MovieFields {
            title: self.title.clone()?,
            description: self.description.clone(),
            language: self.language.clone()?,
            release_date: self.release_date?,
            cover_image: self.cover_image.clone(),
        })
    }
}

impl UpdateMovie {
    pub fn actor_ids(&self) -> &[i32] {
        self.actors.as_deref().unwrap_or_default()
    }

    /// Column values to write over `current`.
    ///
    /// Only `title` and `cover_image` come from the request; description,
    /// language and release date keep their stored values.
    pub fn fields_over(&self, current: &Movie) -> Option<MovieFields> {
        Some(MovieFields {
            title: self.title.clone()?,
            description: current.description.clone(),
            language: current.language.clone(),
            release_date: current.release_date,
            cover_image: self.cover_image.clone(),
        })
    }
}

/// One page of movies plus the total row count
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub count: i64,
}
