//! Repository layer for database operations

pub mod movies;
pub mod persons;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Actor, CastDiff, Movie, MovieFields, Page, PersonFields},
};

/// Persistence operations the services rely on.
///
/// Implemented by [`Repository`] for PostgreSQL; tests substitute their own store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;

    /// One page of movies (actors joined) and the total movie count
    async fn movies_page(&self, page: Page) -> AppResult<(Vec<Movie>, i64)>;

    /// Movie with its actors, if it exists
    async fn movies_get(&self, id: i32) -> AppResult<Option<Movie>>;

    /// Insert a movie and its cast in one transaction
    async fn movies_create(&self, fields: &MovieFields, actor_ids: &[i32]) -> AppResult<Movie>;

    /// Overwrite the movie row and apply the cast diff in one transaction
    async fn movies_update(&self, id: i32, fields: &MovieFields, cast: &CastDiff) -> AppResult<()>;

    /// Returns whether a row was removed
    async fn movies_delete(&self, id: i32) -> AppResult<bool>;

    /// One page of persons and the total person count
    async fn persons_page(&self, page: Page) -> AppResult<(Vec<Actor>, i64)>;

    async fn persons_get(&self, id: i32) -> AppResult<Option<Actor>>;

    /// The persons among `ids` that exist
    async fn persons_find(&self, ids: &[i32]) -> AppResult<Vec<Actor>>;

    /// Titles of the movies a person is cast in
    async fn persons_movie_titles(&self, id: i32) -> AppResult<Vec<String>>;

    async fn persons_create(&self, fields: &PersonFields) -> AppResult<Actor>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub movies: movies::MoviesRepository,
    pub persons: persons::PersonsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            movies: movies::MoviesRepository::new(pool.clone()),
            persons: persons::PersonsRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    async fn movies_page(&self, page: Page) -> AppResult<(Vec<Movie>, i64)> {
        self.movies.page(page).await
    }

    async fn movies_get(&self, id: i32) -> AppResult<Option<Movie>> {
        self.movies.get_by_id(id).await
    }

    async fn movies_create(&self, fields: &MovieFields, actor_ids: &[i32]) -> AppResult<Movie> {
        self.movies.create(fields, actor_ids).await
    }

    async fn movies_update(&self, id: i32, fields: &MovieFields, cast: &CastDiff) -> AppResult<()> {
        self.movies.update(id, fields, cast).await
    }

    async fn movies_delete(&self, id: i32) -> AppResult<bool> {
        self.movies.delete(id).await
    }

    async fn persons_page(&self, page: Page) -> AppResult<(Vec<Actor>, i64)> {
        self.persons.page(page).await
    }

    async fn persons_get(&self, id: i32) -> AppResult<Option<Actor>> {
        self.persons.get_by_id(id).await
    }

    async fn persons_find(&self, ids: &[i32]) -> AppResult<Vec<Actor>> {
        self.persons.find_many(ids).await
    }

    async fn persons_movie_titles(&self, id: i32) -> AppResult<Vec<String>> {
        self.persons.movie_titles(id).await
    }

    async fn persons_create(&self, fields: &PersonFields) -> AppResult<Actor> {
        self.persons.create(fields).await
    }
}
