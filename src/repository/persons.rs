//! Persons repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Actor, Page, PersonFields},
};

#[derive(Clone)]
pub struct PersonsRepository {
    pool: Pool<Postgres>,
}

impl PersonsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List persons with pagination
    pub async fn page(&self, page: Page) -> AppResult<(Vec<Actor>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM persons")
            .fetch_one(&self.pool)
            .await?;

        let persons = sqlx::query_as::<_, Actor>(
            "SELECT id, name, date_of_birth FROM persons ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((persons, total))
    }

    /// Get person by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Actor>> {
        let person = sqlx::query_as::<_, Actor>(
            "SELECT id, name, date_of_birth FROM persons WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(person)
    }

    /// Persons whose id is in `ids`
    pub async fn find_many(&self, ids: &[i32]) -> AppResult<Vec<Actor>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let persons = sqlx::query_as::<_, Actor>(
            "SELECT id, name, date_of_birth FROM persons WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await?;
        Ok(persons)
    }

    /// Titles of all movies the person is cast in
    pub async fn movie_titles(&self, id: i32) -> AppResult<Vec<String>> {
        let titles: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT m.title
            FROM movies m
            JOIN movie_actors ma ON ma.movie_id = m.id
            WHERE ma.person_id = $1
            ORDER BY m.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(titles)
    }

    /// Create person
    pub async fn create(&self, fields: &PersonFields) -> AppResult<Actor> {
        let person = sqlx::query_as::<_, Actor>(
            r#"
            INSERT INTO persons (name, date_of_birth)
            VALUES ($1, $2)
            RETURNING id, name, date_of_birth
            "#,
        )
        .bind(&fields.name)
        .bind(fields.date_of_birth)
        .fetch_one(&self.pool)
        .await?;
        Ok(person)
    }
}
