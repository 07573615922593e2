//! Poster upload storage

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::{
    config::UploadConfig,
    error::{AppError, AppResult},
};

/// Matched exactly as supplied; no case folding
pub const ALLOWED_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];
pub const EXTENSION_REJECTED: &str = "Only .jpg, .jpeg, .png type files are allowed.";

#[derive(Clone)]
pub struct UploadService {
    dir: PathBuf,
    route: String,
}

impl UploadService {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            route: config.route.clone(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write an uploaded image under a fresh random name and return that name.
    ///
    /// The original extension is kept. Nothing is written when the extension is rejected.
    pub async fn store_poster(&self, original_name: &str, bytes: &[u8]) -> AppResult<String> {
        let original_name = original_name.trim_matches('"');
        let ext = extension(original_name);
        if !ALLOWED_EXTENSIONS.contains(&ext) {
            tracing::debug!("Rejected upload {:?}", original_name);
            return Err(AppError::BadRequest(EXTENSION_REJECTED.to_string()));
        }

        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = format!("{}{}", Uuid::new_v4(), ext);
        tokio::fs::write(self.dir.join(&file_name), bytes).await?;

        tracing::info!(
            "Stored upload {:?} as {} ({} bytes)",
            original_name,
            file_name,
            bytes.len()
        );
        Ok(file_name)
    }

    /// `<scheme>://<host><route>/<file_name>`
    pub fn public_url(&self, scheme: &str, host: &str, file_name: &str) -> String {
        format!(
            "{}://{}{}/{}",
            scheme,
            host,
            self.route.trim_end_matches('/'),
            file_name
        )
    }
}

/// Extension of the last path segment, dot included; empty when there is none
fn extension(name: &str) -> &str {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name);
    match base.rfind('.') {
        Some(idx) => &base[idx..],
        None => "",
    }
}
