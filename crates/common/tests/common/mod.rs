//! Shared test utilities for storage engine integration tests
#![allow(dead_code)]

use std::io;
use std::path::PathBuf;

use bytes::Bytes;
use futures::stream;
use tempfile::TempDir;

use ::common::prelude::*;

pub const RESOURCE: &str = "test-resource";

/// Set up an engine rooted in a scratch directory.
pub fn setup() -> (FsStorage, TempDir) {
    let temp = TempDir::new().unwrap();
    let config = StorageConfig {
        base_path: temp.path().to_path_buf(),
        ..Default::default()
    };
    (FsStorage::new(config), temp)
}

/// Same, with a custom per-file upload ceiling.
pub fn setup_with_limit(limit: u64) -> (FsStorage, TempDir) {
    let temp = TempDir::new().unwrap();
    let config = StorageConfig {
        base_path: temp.path().to_path_buf(),
        max_upload_size: limit,
        ..Default::default()
    };
    (FsStorage::new(config), temp)
}

/// Wrap bytes as an incoming upload, split into small chunks so the
/// streaming path is actually exercised.
pub fn incoming(filename: &str, data: &[u8]) -> IncomingFile<'static> {
    let chunks: Vec<io::Result<Bytes>> = data
        .chunks(8)
        .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
        .collect();
    IncomingFile {
        filename: filename.to_string(),
        content: Box::pin(stream::iter(chunks)),
    }
}

pub fn rel(path: &str) -> RelativePath {
    RelativePath::normalize(path, false).unwrap()
}

/// Absolute path of an entry inside the default test resource.
pub fn on_disk(temp: &TempDir, relative: &str) -> PathBuf {
    let mut path = temp.path().join(RESOURCE);
    for segment in relative.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path
}
