//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, movies, persons};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MovieWorld API",
        version = "1.0.0",
        description = "Movie and cast catalog REST API. Every response body is wrapped in a \
                       `{ status, message, data }` envelope."
    ),
    servers(
        (url = "/api", description = "MovieWorld API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Movies
        movies::list_movies,
        movies::get_movie,
        movies::create_movie,
        movies::update_movie,
        movies::delete_movie,
        movies::upload_poster,
        // Persons
        persons::list_persons,
        persons::get_person,
        persons::create_person,
    ),
    components(
        schemas(
            // Movies
            crate::models::Movie,
            crate::models::MoviePage,
            crate::models::CreateMovie,
            crate::models::UpdateMovie,
            movies::UploadResponse,
            // Persons
            crate::models::Actor,
            crate::models::PersonDetails,
            crate::models::PersonPage,
            crate::models::CreatePerson,
            // Paging
            crate::models::PageQuery,
            // Health
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "movies", description = "Movie catalog and poster uploads"),
        (name = "persons", description = "Persons who can be cast as actors")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
