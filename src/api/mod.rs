//! API handlers for MovieWorld REST endpoints

pub mod health;
pub mod movies;
pub mod openapi;
pub mod persons;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads = state.config.uploads.clone();

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Movies
        .route(
            "/movies",
            get(movies::list_movies)
                .post(movies::create_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route(
            "/movies/upload",
            post(movies::upload_poster).layer(DefaultBodyLimit::max(uploads.max_bytes)),
        )
        .route("/movies/:id", get(movies::get_movie))
        // Persons
        .route(
            "/persons",
            get(persons::list_persons).post(persons::create_person),
        )
        .route("/persons/:id", get(persons::get_person))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api", api)
        .nest_service(
            uploads.route.trim_end_matches('/'),
            ServeDir::new(&uploads.dir),
        )
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
