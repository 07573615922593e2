//! Person endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Actor, CreatePerson, PageQuery, PersonDetails, PersonPage},
    response::Envelope,
    AppState,
};

/// List persons with pagination
#[utoipa::path(
    get,
    path = "/persons",
    tag = "persons",
    params(PageQuery),
    responses(
        (status = 200, description = "Envelope with a page of persons and the total count", body = PersonPage),
        (status = 400, description = "Validation failed or something went wrong")
    )
)]
pub async fn list_persons(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<PageQuery>, AppError>,
) -> AppResult<Json<Envelope<PersonPage>>> {
    query.validate()?;
    let page = state.services.persons.list(query.into()).await?;
    Ok(Json(Envelope::ok(page)))
}

/// Get a person with the titles of the movies they act in
#[utoipa::path(
    get,
    path = "/persons/{id}",
    tag = "persons",
    params(("id" = i32, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Envelope with the person and movie titles", body = PersonDetails),
        (status = 400, description = "Person does not exist")
    )
)]
pub async fn get_person(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<Envelope<PersonDetails>>> {
    let person = state.services.persons.get(id).await?;
    Ok(Json(Envelope::ok(person)))
}

/// Create a new person
#[utoipa::path(
    post,
    path = "/persons",
    tag = "persons",
    request_body = CreatePerson,
    responses(
        (status = 200, description = "Envelope with the created person", body = Actor),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_person(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<CreatePerson>, AppError>,
) -> AppResult<Json<Envelope<Actor>>> {
    let person = state.services.persons.create(&req).await?;
    Ok(Json(Envelope::created(person)))
}
