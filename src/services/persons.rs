//! Person (actor) service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Actor, CreatePerson, Page, PersonDetails, PersonPage},
    repository::CatalogStore,
};

pub const PERSON_NOT_FOUND: &str = "Person does not exist.";

#[derive(Clone)]
pub struct PersonService {
    store: Arc<dyn CatalogStore>,
}

impl PersonService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, page: Page) -> AppResult<PersonPage> {
        let (persons, count) = self.store.persons_page(page).await?;
        Ok(PersonPage { persons, count })
    }

    /// Person with the titles of the movies they appear in
    pub async fn get(&self, id: i32) -> AppResult<PersonDetails> {
        let person = self
            .store
            .persons_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(PERSON_NOT_FOUND.to_string()))?;
        let titles = self.store.persons_movie_titles(id).await?;
        Ok(PersonDetails::new(person, titles))
    }

    pub async fn create(&self, req: &CreatePerson) -> AppResult<Actor> {
        req.validate()?;
        let fields = req
            .fields()
            .ok_or_else(|| AppError::Internal("validated person is missing fields".to_string()))?;
        let person = self.store.persons_create(&fields).await?;
        tracing::info!("Created person id={}", person.id);
        Ok(person)
    }
}
