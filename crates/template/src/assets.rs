//! Asset resolution
//!
//! Templates reference images by URL. The editor and exporter fetch the
//! bytes through an [`AssetSource`] so the storage backend stays out of
//! this crate: tests and the wasm bindings preload bytes into a
//! [`MemoryAssets`], while the demo programs read from disk with
//! [`DirAssets`]. Both understand base64 `data:` URIs, the form the
//! dashboard uses for cross-origin images.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from fetching an asset
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of image bytes for template URLs
pub trait AssetSource: Sync {
    /// Fetch the raw bytes behind a URL
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, AssetError>;
}

/// Decode a base64 `data:` URI
fn decode_data_uri(uri: &str) -> std::result::Result<Vec<u8>, AssetError> {
    let rest = &uri["data:".len()..];
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AssetError::InvalidDataUri("missing comma".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(AssetError::InvalidDataUri(
            "only base64 payloads are supported".to_string(),
        ));
    }
    STANDARD
        .decode(payload)
        .map_err(|e| AssetError::InvalidDataUri(e.to_string()))
}

/// In-memory asset map
#[derive(Debug, Default)]
pub struct MemoryAssets {
    assets: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes under a URL
    pub fn insert(&mut self, url: &str, bytes: Vec<u8>) {
        self.assets.insert(url.to_string(), bytes);
    }
}

impl AssetSource for MemoryAssets {
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, AssetError> {
        if url.starts_with("data:") {
            return decode_data_uri(url);
        }
        self.assets
            .get(url)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(url.to_string()))
    }
}

/// Filesystem asset directory
#[derive(Debug)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirAssets {
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, AssetError> {
        if url.starts_with("data:") {
            return decode_data_uri(url);
        }
        let path = self.root.join(url.trim_start_matches('/'));
        if !path.is_file() {
            return Err(AssetError::NotFound(url.to_string()));
        }
        Ok(std::fs::read(path)?)
    }
}
