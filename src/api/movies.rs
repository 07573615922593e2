//! Movie endpoints

use axum::{
    extract::{Host, OriginalUri, Path, Query, State},
    http::HeaderMap,
    Json,
};
use axum_extra::extract::{Multipart, WithRejection};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{CreateMovie, Movie, MoviePage, PageQuery, UpdateMovie},
    response::Envelope,
    AppState,
};

pub const NO_FILE_UPLOADED: &str = "No file was uploaded.";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteMovieParams {
    /// Movie ID
    #[serde(default)]
    pub id: i32,
}

/// Public location of a stored poster
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub profile_image: String,
}

/// List movies with pagination
#[utoipa::path(
    get,
    path = "/movies",
    tag = "movies",
    params(PageQuery),
    responses(
        (status = 200, description = "Envelope with a page of movies and the total count", body = MoviePage),
        (status = 400, description = "Validation failed or something went wrong")
    )
)]
pub async fn list_movies(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<PageQuery>, AppError>,
) -> AppResult<Json<Envelope<MoviePage>>> {
    query.validate()?;
    let page = state.services.movies.list(query.into()).await?;
    Ok(Json(Envelope::ok(page)))
}

/// Get movie details by ID
#[utoipa::path(
    get,
    path = "/movies/{id}",
    tag = "movies",
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Envelope with the movie and its actors", body = Movie),
        (status = 400, description = "Movie does not exist")
    )
)]
pub async fn get_movie(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<Envelope<Movie>>> {
    let movie = state.services.movies.get(id).await?;
    Ok(Json(Envelope::ok(movie)))
}

/// Create a new movie
#[utoipa::path(
    post,
    path = "/movies",
    tag = "movies",
    request_body = CreateMovie,
    responses(
        (status = 200, description = "Envelope with the created movie", body = Movie),
        (status = 400, description = "Validation failed or invalid actors assigned")
    )
)]
pub async fn create_movie(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<CreateMovie>, AppError>,
) -> AppResult<Json<Envelope<Movie>>> {
    let movie = state.services.movies.create(&req).await?;
    Ok(Json(Envelope::created(movie)))
}

/// Update an existing movie
#[utoipa::path(
    put,
    path = "/movies",
    tag = "movies",
    request_body = UpdateMovie,
    responses(
        (status = 200, description = "Envelope with the updated movie", body = Movie),
        (status = 400, description = "Validation failed, invalid movie record or invalid actors assigned")
    )
)]
pub async fn update_movie(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateMovie>, AppError>,
) -> AppResult<Json<Envelope<Movie>>> {
    let movie = state.services.movies.update(&req).await?;
    Ok(Json(Envelope::updated(movie)))
}

/// Delete a movie
#[utoipa::path(
    delete,
    path = "/movies",
    tag = "movies",
    params(DeleteMovieParams),
    responses(
        (status = 200, description = "Envelope without payload"),
        (status = 400, description = "Invalid movie record")
    )
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<DeleteMovieParams>, AppError>,
) -> AppResult<Json<Envelope<()>>> {
    state.services.movies.delete(params.id).await?;
    Ok(Json(Envelope::deleted()))
}

/// Upload a poster image (multipart, a single .jpg, .jpeg or .png file)
#[utoipa::path(
    post,
    path = "/movies/upload",
    tag = "movies",
    responses(
        (status = 200, description = "Public URL of the stored image", body = UploadResponse),
        (status = 400, description = "File type not allowed or no file")
    )
)]
pub async fn upload_poster(
    State(state): State<AppState>,
    WithRejection(Host(host), _): WithRejection<Host, AppError>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    WithRejection(mut multipart, _): WithRejection<Multipart, AppError>,
) -> AppResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let uploads = &state.services.uploads;
        let stored = uploads.store_poster(&file_name, &bytes).await?;
        let scheme = request_scheme(&headers, &uri);

        return Ok(Json(UploadResponse {
            profile_image: uploads.public_url(&scheme, &host, &stored),
        }));
    }

    Err(AppError::BadRequest(NO_FILE_UPLOADED.to_string()))
}

/// Scheme the client used: `X-Forwarded-Proto`, then the request URI, then `http`
fn request_scheme(headers: &HeaderMap, uri: &axum::http::Uri) -> String {
    headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| uri.scheme_str().map(str::to_string))
        .unwrap_or_else(|| "http".to_string())
}
