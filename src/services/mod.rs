//! Business logic services

pub mod movies;
pub mod persons;
pub mod uploads;

use std::sync::Arc;

use crate::{config::UploadConfig, repository::CatalogStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn CatalogStore>,
    pub movies: movies::MovieService,
    pub persons: persons::PersonService,
    pub uploads: uploads::UploadService,
}

impl Services {
    /// Create all services on top of the given store
    pub fn new(store: Arc<dyn CatalogStore>, uploads: &UploadConfig) -> Self {
        Self {
            movies: movies::MovieService::new(store.clone()),
            persons: persons::PersonService::new(store.clone()),
            uploads: uploads::UploadService::new(uploads),
            store,
        }
    }
}
