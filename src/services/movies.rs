//! Movie catalog service

use std::collections::BTreeSet;
use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{CastDiff, CreateMovie, Movie, MoviePage, Page, UpdateMovie},
    repository::CatalogStore,
};

pub const MOVIE_NOT_FOUND: &str = "Movie does not exist.";
pub const INVALID_MOVIE_RECORD: &str = "Invalid movie record.";

#[derive(Clone)]
pub struct MovieService {
    store: Arc<dyn CatalogStore>,
}

impl MovieService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// One page of movies with the total count
    pub async fn list(&self, page: Page) -> AppResult<MoviePage> {
        let (movies, count) = self.store.movies_page(page).await?;
        Ok(MoviePage { movies, count })
    }

    /// Get movie by ID with its actors
    pub async fn get(&self, id: i32) -> AppResult<Movie> {
        self.store
            .movies_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(MOVIE_NOT_FOUND.to_string()))
    }

    /// Create a movie. Every actor id must name an existing person.
    pub async fn create(&self, req: &CreateMovie) -> AppResult<Movie> {
        req.validate()?;
        self.resolve_cast(req.actor_ids()).await?;

        let fields = req
            .fields()
            .ok_or_else(|| AppError::Internal("validated movie is missing fields".to_string()))?;
        let movie = self.store.movies_create(&fields, req.actor_ids()).await?;

        tracing::info!("Created movie id={} with {} actors", movie.id, movie.actors.len());
        Ok(movie)
    }

    /// Update a movie and reconcile its cast with the requested actor ids
    pub async fn update(&self, req: &UpdateMovie) -> AppResult<Movie> {
        req.validate()?;
        if req.id <= 0 {
            return Err(AppError::NotFound(INVALID_MOVIE_RECORD.to_string()));
        }
        let requested = self.resolve_cast(req.actor_ids()).await?;

        let current = self
            .store
            .movies_get(req.id)
            .await?
            .ok_or_else(|| AppError::NotFound(INVALID_MOVIE_RECORD.to_string()))?;

        let fields = req
            .fields_over(&current)
            .ok_or_else(|| AppError::Internal("validated movie is missing fields".to_string()))?;
        let cast = CastDiff::between(&current.actor_ids(), &requested);

        tracing::debug!(
            "Movie id={}: removing actors {:?}, adding {:?}",
            req.id,
            cast.to_remove,
            cast.to_add
        );
        self.store.movies_update(req.id, &fields, &cast).await?;

        let updated = self
            .store
            .movies_get(req.id)
            .await?
            .ok_or_else(|| AppError::NotFound(INVALID_MOVIE_RECORD.to_string()))?;

        tracing::info!("Updated movie id={}", updated.id);
        Ok(updated)
    }

    /// Delete a movie
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.store.movies_delete(id).await? {
            return Err(AppError::NotFound(INVALID_MOVIE_RECORD.to_string()));
        }
        tracing::info!("Deleted movie id={}", id);
        Ok(())
    }

    /// Check that `ids` are distinct and all exist as persons
    async fn resolve_cast(&self, ids: &[i32]) -> AppResult<BTreeSet<i32>> {
        let requested: BTreeSet<i32> = ids.iter().copied().collect();
        if requested.len() != ids.len() {
            tracing::debug!("Rejected cast with duplicate ids: {:?}", ids);
            return Err(AppError::InvalidActors);
        }
        if requested.is_empty() {
            return Ok(requested);
        }

        let found = self.store.persons_find(ids).await?;
        if found.len() != requested.len() {
            tracing::debug!("Rejected cast {:?}: only {} persons exist", ids, found.len());
            return Err(AppError::InvalidActors);
        }
        Ok(requested)
    }
}
