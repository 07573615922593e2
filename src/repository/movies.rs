//! Movies repository for database operations

use std::collections::HashMap;

use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{Actor, CastDiff, Movie, MovieFields, Page},
    services::movies::INVALID_MOVIE_RECORD,
};

const MOVIE_COLUMNS: &str = "id, title, description, language, release_date, cover_image";

#[derive(Clone)]
pub struct MoviesRepository {
    pool: Pool<Postgres>,
}

impl MoviesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List movies with pagination. The total is counted separately from the slice.
    pub async fn page(&self, page: Page) -> AppResult<(Vec<Movie>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await?;

        let mut movies = sqlx::query_as::<_, Movie>(&format!(
            "SELECT {} FROM movies ORDER BY id LIMIT $1 OFFSET $2",
            MOVIE_COLUMNS
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        self.attach_actors(&mut movies).await?;

        Ok((movies, total))
    }

    /// Get movie by ID with its actors
    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(&format!(
            "SELECT {} FROM movies WHERE id = $1",
            MOVIE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut movie) = movie else {
            return Ok(None);
        };
        movie.actors = self.get_movie_actors(id).await?;
        Ok(Some(movie))
    }

    /// Load all actors for a movie via the movie_actors junction table
    async fn get_movie_actors(&self, movie_id: i32) -> AppResult<Vec<Actor>> {
        let actors = sqlx::query_as::<_, Actor>(
            r#"
            SELECT p.id, p.name, p.date_of_birth
            FROM movie_actors ma
            JOIN persons p ON p.id = ma.person_id
            WHERE ma.movie_id = $1
            ORDER BY p.id
            "#,
        )
        .bind(movie_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(actors)
    }

    /// Load the actors of a whole page with a single query
    async fn attach_actors(&self, movies: &mut [Movie]) -> AppResult<()> {
        if movies.is_empty() {
            return Ok(());
        }
        let ids: Vec<i32> = movies.iter().map(|m| m.id).collect();

        let rows = sqlx::query(
            r#"
            SELECT ma.movie_id, p.id, p.name, p.date_of_birth
            FROM movie_actors ma
            JOIN persons p ON p.id = ma.person_id
            WHERE ma.movie_id = ANY($1)
            ORDER BY p.id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_movie: HashMap<i32, Vec<Actor>> = HashMap::new();
        for r in &rows {
            by_movie.entry(r.get("movie_id")).or_default().push(Actor {
                id: r.get("id"),
                name: r.get("name"),
                date_of_birth: r.get("date_of_birth"),
            });
        }

        for movie in movies.iter_mut() {
            movie.actors = by_movie.remove(&movie.id).unwrap_or_default();
        }
        Ok(())
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Create a movie and its cast
    pub async fn create(&self, fields: &MovieFields, actor_ids: &[i32]) -> AppResult<Movie> {
        let mut tx = self.pool.begin().await?;

        let movie = sqlx::query_as::<_, Movie>(&format!(
            r#"
            INSERT INTO movies (title, description, language, release_date, cover_image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            MOVIE_COLUMNS
        ))
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.language)
        .bind(fields.release_date)
        .bind(&fields.cover_image)
        .fetch_one(&mut *tx)
        .await?;

        if !actor_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO movie_actors (movie_id, person_id)
                SELECT $1, UNNEST($2::int4[])
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(movie.id)
            .bind(actor_ids.to_vec())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!("Inserted movie id={} with {} actors", movie.id, actor_ids.len());

        let id = movie.id;
        self.get_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Movie {} vanished after insert", id)))
    }

    /// Overwrite movie columns, then remove and add cast rows
    pub async fn update(&self, id: i32, fields: &MovieFields, cast: &CastDiff) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE movies
            SET title = $1, description = $2, language = $3, release_date = $4, cover_image = $5
            WHERE id = $6
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.language)
        .bind(fields.release_date)
        .bind(&fields.cover_image)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(INVALID_MOVIE_RECORD.to_string()));
        }

        if !cast.to_remove.is_empty() {
            sqlx::query("DELETE FROM movie_actors WHERE movie_id = $1 AND person_id = ANY($2)")
                .bind(id)
                .bind(cast.removed())
                .execute(&mut *tx)
                .await?;
        }

        if !cast.to_add.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO movie_actors (movie_id, person_id)
                SELECT $1, UNNEST($2::int4[])
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(id)
            .bind(cast.added())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete a movie. Cast rows cascade.
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
