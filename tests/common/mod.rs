//! Shared fixtures for router-level tests: an in-memory catalog store and request helpers

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::sync::Barrier;
use tower::ServiceExt;

use movieworld_server::{
    api,
    config::{AppConfig, UploadConfig},
    models::{Actor, CastDiff, Movie, MovieFields, Page, PersonFields},
    repository::CatalogStore,
    services::Services,
    AppError, AppResult, AppState,
};

pub const HOST: &str = "movies.test:8080";

#[derive(Default)]
struct Tables {
    movies: BTreeMap<i32, MovieFields>,
    persons: BTreeMap<i32, Actor>,
    /// movie id -> person ids
    cast: BTreeMap<i32, BTreeSet<i32>>,
    next_movie: i32,
    next_person: i32,
}

impl Tables {
    fn movie(&self, id: i32) -> Option<Movie> {
        let fields = self.movies.get(&id)?;
        let actors = self
            .cast
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|pid| self.persons.get(pid).cloned())
            .collect();
        Some(Movie {
            id,
            title: fields.title.clone(),
            description: fields.description.clone(),
            language: fields.language.clone(),
            release_date: fields.release_date,
            cover_image: fields.cover_image.clone(),
            actors,
        })
    }
}

/// Catalog kept in process memory, ordered by id like the SQL store
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failing: AtomicBool,
    /// Movie updates wait here before writing, once armed
    write_gate: Mutex<Option<Arc<Barrier>>>,
    /// Titles of committed movie updates, in commit order
    commits: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent call fail the way a dropped database connection would
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Hold every movie update before its write until `writers` updates are waiting
    pub fn hold_writes_until(&self, writers: usize) {
        *self.write_gate.lock().unwrap() = Some(Arc::new(Barrier::new(writers)));
    }

    pub fn commit_log(&self) -> Vec<String> {
        self.commits.lock().unwrap().clone()
    }

    pub fn cover_of(&self, movie_id: i32) -> Option<String> {
        self.tables
            .lock()
            .unwrap()
            .movies
            .get(&movie_id)
            .and_then(|m| m.cover_image.clone())
    }

    pub fn movie_count(&self) -> usize {
        self.tables.lock().unwrap().movies.len()
    }

    pub fn cast_of(&self, movie_id: i32) -> BTreeSet<i32> {
        self.tables
            .lock()
            .unwrap()
            .cast
            .get(&movie_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn title_of(&self, movie_id: i32) -> Option<String> {
        self.tables
            .lock()
            .unwrap()
            .movies
            .get(&movie_id)
            .map(|m| m.title.clone())
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

fn window<T: Clone>(rows: &[T], page: Page) -> Vec<T> {
    rows.iter()
        .skip(page.offset().max(0) as usize)
        .take(page.limit().max(0) as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        self.check()
    }

    async fn movies_page(&self, page: Page) -> AppResult<(Vec<Movie>, i64)> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        let all: Vec<Movie> = t.movies.keys().filter_map(|id| t.movie(*id)).collect();
        Ok((window(&all, page), all.len() as i64))
    }

    async fn movies_get(&self, id: i32) -> AppResult<Option<Movie>> {
        self.check()?;
        Ok(self.tables.lock().unwrap().movie(id))
    }

    async fn movies_create(&self, fields: &MovieFields, actor_ids: &[i32]) -> AppResult<Movie> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        t.next_movie += 1;
        let id = t.next_movie;
        t.movies.insert(id, fields.clone());
        t.cast.insert(id, actor_ids.iter().copied().collect());
        t.movie(id)
            .ok_or_else(|| AppError::Internal("inserted movie vanished".to_string()))
    }

    async fn movies_update(&self, id: i32, fields: &MovieFields, cast: &CastDiff) -> AppResult<()> {
        self.check()?;
        let gate = self.write_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.wait().await;
        }

        let mut t = self.tables.lock().unwrap();
        match t.movies.get_mut(&id) {
            Some(row) => *row = fields.clone(),
            None => return Err(AppError::NotFound("Invalid movie record.".to_string())),
        }
        cast.apply(t.cast.entry(id).or_default());
        self.commits.lock().unwrap().push(fields.title.clone());
        Ok(())
    }

    async fn movies_delete(&self, id: i32) -> AppResult<bool> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        t.cast.remove(&id);
        Ok(t.movies.remove(&id).is_some())
    }

    async fn persons_page(&self, page: Page) -> AppResult<(Vec<Actor>, i64)> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        let all: Vec<Actor> = t.persons.values().cloned().collect();
        Ok((window(&all, page), all.len() as i64))
    }

    async fn persons_get(&self, id: i32) -> AppResult<Option<Actor>> {
        self.check()?;
        Ok(self.tables.lock().unwrap().persons.get(&id).cloned())
    }

    async fn persons_find(&self, ids: &[i32]) -> AppResult<Vec<Actor>> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        let wanted: BTreeSet<i32> = ids.iter().copied().collect();
        Ok(wanted
            .iter()
            .filter_map(|id| t.persons.get(id).cloned())
            .collect())
    }

    async fn persons_movie_titles(&self, id: i32) -> AppResult<Vec<String>> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        Ok(t.cast
            .iter()
            .filter(|(_, persons)| persons.contains(&id))
            .filter_map(|(movie_id, _)| t.movies.get(movie_id).map(|m| m.title.clone()))
            .collect())
    }

    async fn persons_create(&self, fields: &PersonFields) -> AppResult<Actor> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        t.next_person += 1;
        let actor = Actor {
            id: t.next_person,
            name: fields.name.clone(),
            date_of_birth: fields.date_of_birth,
        };
        t.persons.insert(actor.id, actor.clone());
        Ok(actor)
    }
}

/// Router over `store`, writing uploads below `upload_dir`
pub fn app(store: Arc<MemoryStore>, upload_dir: &Path) -> Router {
    let mut config = AppConfig::default();
    config.uploads = UploadConfig {
        dir: upload_dir.to_path_buf(),
        route: "/StaticFiles".to_string(),
        max_bytes: 64 * 1024,
    };
    let services = Services::new(store, &config.uploads);
    api::create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .header(header::HOST, HOST)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(header::HOST, HOST)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn json(app: &Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, HOST)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST a single-file multipart form to the upload endpoint
pub async fn upload(app: &Router, file_name: &str, contents: &[u8]) -> (StatusCode, Value) {
    const BOUNDARY: &str = "movieworld-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/movies/upload")
        .header(header::HOST, HOST)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}
