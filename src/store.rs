// src/store.rs
//! Fetch-or-cache content store.
//!
//! A page is fetched at most once per cache key: if `{cache_dir}/{key}` exists
//! its bytes are returned verbatim and the network is never touched. There is
//! no expiry and the store never overwrites an entry it can read.
//!
//! Concurrent misses on the same key are not coordinated; both callers fetch
//! and both write the whole file (last write wins, content is identical).

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::core::{Fetch, FetchError};
use crate::file::ensure_directory;
use crate::report::{CacheKey, SourceLocator};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("cache I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub struct ContentStore<F> {
    dir: PathBuf,
    fetcher: F,
}

impl<F: Fetch> ContentStore<F> {
    pub fn new(dir: impl Into<PathBuf>, fetcher: F) -> Self {
        Self { dir: dir.into(), fetcher }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    pub fn is_cached(&self, key: &CacheKey) -> bool {
        self.path_for(key).is_file()
    }

    pub fn fetch_or_cache(&self, locator: &SourceLocator, key: &CacheKey) -> Result<Vec<u8>, StoreError> {
        ensure_directory(&self.dir).map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;

        let path = self.path_for(key);
        if path.is_file() {
            let bytes = fs::read(&path).map_err(|source| StoreError::Io { path: path.clone(), source })?;
            logd!("Cache: hit {} ({} bytes)", path.display(), bytes.len());
            return Ok(bytes);
        }

        let url = locator.url();
        logf!("Cache: miss {}, fetching {}", path.display(), url);
        let body = self.fetcher.get(&url)?;

        fs::write(&path, &body).map_err(|source| StoreError::Io { path: path.clone(), source })?;
        logf!("Cache: stored {} ({} bytes)", path.display(), body.len());

        Ok(body)
    }
}
