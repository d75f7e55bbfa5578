// tests/common/mod.rs
#![allow(dead_code)]

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use vitibrasil_scrape::core::{Fetch, FetchError};
use vitibrasil_scrape::scrape::Resolver;
use vitibrasil_scrape::store::ContentStore;

pub const BASE: &str = "http://portal.test/index.php";

pub fn fixture(name: &str) -> Vec<u8> {
    let p: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "fixtures", name].iter().collect();
    fs::read(&p).unwrap_or_else(|e| panic!("fixture {}: {e}", p.display()))
}

/// Fake portal: serves canned pages by URL and records every request.
#[derive(Clone, Default)]
pub struct FakePortal {
    pages: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakePortal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(&self, url: &str, body: Vec<u8>) -> &Self {
        self.pages.lock().unwrap().insert(url.to_string(), body);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Fetch for FakePortal {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Failure { url: url.to_string(), reason: "HTTP status 503".into() })
    }
}

pub fn url(query: &str) -> String {
    format!("{BASE}?{query}")
}

pub fn resolver(dir: &Path, portal: &FakePortal) -> Resolver<FakePortal> {
    Resolver::new(BASE, ContentStore::new(dir, portal.clone()))
}

pub fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(dir) {
        Ok(rd) => rd.filter_map(|e| e.ok()).map(|e| e.file_name().to_string_lossy().into_owned()).collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}
