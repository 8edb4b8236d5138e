use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::backend::Storage;
use crate::config::StorageConfig;
use crate::content_type::content_type_for;
use crate::entry::{self, StorageEntry, URL_SHORTCUT_EXTENSION};
use crate::error::StorageError;
use crate::path::RelativePath;
use crate::resource::ResourceRoot;

/// Placeholder when a sanitized upload filename comes out empty.
pub const FALLBACK_FILE_NAME: &str = "item";
/// Default label for folders created with an empty name.
pub const DEFAULT_FOLDER_NAME: &str = "New Folder";
/// Default label for URL shortcuts created with an empty name.
pub const DEFAULT_URL_NAME: &str = "New URL";

/// One file arriving in an upload: the client-supplied name plus a chunked
/// byte stream. The stream is consumed exactly once and never buffered
/// whole.
pub struct IncomingFile<'a> {
    pub filename: String,
    pub content: BoxStream<'a, io::Result<Bytes>>,
}

impl std::fmt::Debug for IncomingFile<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncomingFile")
            .field("filename", &self.filename)
            .finish_non_exhaustive()
    }
}

/// An opened stored file ready to stream back to a client.
#[derive(Debug)]
pub struct FileDownload {
    pub file: tokio::fs::File,
    pub filename: String,
    pub content_type: &'static str,
    pub len: u64,
}

/// A directory listing snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub current_path: RelativePath,
    pub items: Vec<StorageEntry>,
}

/// Filesystem-as-truth storage engine.
///
/// Holds the immutable configuration and a map of per-directory creation
/// locks; nothing else is shared across requests. Every operation re-reads
/// the directory state from disk.
pub struct FsStorage {
    config: StorageConfig,
    // Serializes the probe-and-create step of unique-name resolution per
    // absolute directory. Entries are never pruned; the map is bounded by
    // the number of directories written to over the process lifetime.
    dir_locks: Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>,
}

impl FsStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            dir_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Resolve the resource root and the absolute target path in one step.
    async fn resolve(
        &self,
        resource: &str,
        path: &RelativePath,
    ) -> Result<(ResourceRoot, PathBuf), StorageError> {
        let root = ResourceRoot::resolve(&self.config.base_path, resource).await?;
        let absolute = path.join_to(root.path())?;
        Ok((root, absolute))
    }

    async fn lock_dir(&self, directory: &Path) -> tokio::sync::OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.dir_locks.lock().expect("dir lock map poisoned");
            Arc::clone(locks.entry(directory.to_path_buf()).or_default())
        };
        lock.lock_owned().await
    }

    /// Stream one incoming file to disk. Returns `None` for zero-length
    /// input, which must leave no trace on disk or in the response.
    async fn store_one(
        &self,
        directory: &Path,
        parent: &RelativePath,
        file: IncomingFile<'_>,
    ) -> Result<Option<StorageEntry>, StorageError> {
        let mut content = file.content;

        // Pull chunks until the first byte shows up; an empty stream is
        // skipped before anything touches the disk.
        let mut first = None;
        while let Some(chunk) = content.try_next().await? {
            if !chunk.is_empty() {
                first = Some(chunk);
                break;
            }
        }
        let Some(first) = first else {
            return Ok(None);
        };

        let limit = self.config.max_upload_size;
        let safe_name = sanitize_name(&file.filename, FALLBACK_FILE_NAME);

        let mut cleanup = PartialFile::disarmed();
        let mut out;
        let unique;
        {
            let _guard = self.lock_dir(directory).await;
            unique = unique_name(directory, &safe_name).await?;
            let destination = directory.join(&unique);
            // create_new claims the name while the lock is still held
            out = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&destination)
                .await?;
            cleanup.arm(destination);
        }

        let mut written = 0u64;
        let mut chunk = first;
        loop {
            written += chunk.len() as u64;
            if written > limit {
                return Err(StorageError::PayloadTooLarge { limit });
            }
            out.write_all(&chunk).await?;
            match content.try_next().await? {
                Some(next) => chunk = next,
                None => break,
            }
        }
        out.flush().await?;
        cleanup.disarm();

        Ok(Some(entry::file_entry(&unique, parent, &self.config.icons)))
    }
}

#[async_trait]
impl Storage for FsStorage {
    async fn list(&self, resource: &str, path: &RelativePath) -> Result<Listing, StorageError> {
        let (_root, absolute) = self.resolve(resource, path).await?;

        let meta = tokio::fs::metadata(&absolute)
            .await
            .map_err(StorageError::from_read)?;
        if !meta.is_dir() {
            return Err(StorageError::NotFound);
        }

        let mut folders = Vec::new();
        let mut files = Vec::new();
        let mut children = tokio::fs::read_dir(&absolute).await?;
        while let Some(child) = children.next_entry().await? {
            let name = child.file_name().to_string_lossy().into_owned();
            if child.file_type().await?.is_dir() {
                folders.push(name);
            } else {
                files.push(name);
            }
        }

        folders.sort_by_key(|name| name.to_lowercase());
        files.sort_by_key(|name| name.to_lowercase());

        let icons = &self.config.icons;
        let items = folders
            .iter()
            .map(|name| entry::folder_entry(name, path, icons))
            .chain(files.iter().map(|name| entry::file_entry(name, path, icons)))
            .collect();

        Ok(Listing {
            current_path: path.clone(),
            items,
        })
    }

    async fn upload<'a>(
        &self,
        resource: &str,
        path: &RelativePath,
        files: Vec<IncomingFile<'a>>,
    ) -> Result<Vec<StorageEntry>, StorageError> {
        let (_root, directory) = self.resolve(resource, path).await?;
        tokio::fs::create_dir_all(&directory).await?;

        let mut stored = Vec::new();
        for file in files {
            if let Some(entry) = self.store_one(&directory, path, file).await? {
                stored.push(entry);
            }
        }
        Ok(stored)
    }

    async fn download(
        &self,
        resource: &str,
        path: &RelativePath,
    ) -> Result<Option<FileDownload>, StorageError> {
        let (_root, absolute) = self.resolve(resource, path).await?;

        let meta = match tokio::fs::metadata(&absolute).await {
            Ok(meta) => meta,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        if !meta.is_file() {
            return Ok(None);
        }

        let filename = absolute
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Shared read: concurrent downloads of the same file are fine.
        let file = match tokio::fs::File::open(&absolute).await {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(FileDownload {
            file,
            content_type: content_type_for(&filename),
            filename,
            len: meta.len(),
        }))
    }

    async fn create_folder(
        &self,
        resource: &str,
        path: &RelativePath,
        name: &str,
    ) -> Result<StorageEntry, StorageError> {
        let (_root, parent_dir) = self.resolve(resource, path).await?;
        tokio::fs::create_dir_all(&parent_dir).await?;

        let safe_name = sanitize_name(name, DEFAULT_FOLDER_NAME);

        let unique = {
            let _guard = self.lock_dir(&parent_dir).await;
            let unique = unique_name(&parent_dir, &safe_name).await?;
            tokio::fs::create_dir(parent_dir.join(&unique)).await?;
            unique
        };

        Ok(entry::folder_entry(&unique, path, &self.config.icons))
    }

    async fn create_url(
        &self,
        resource: &str,
        path: &RelativePath,
        name: &str,
        target_url: &str,
    ) -> Result<StorageEntry, StorageError> {
        // Validate before any filesystem mutation. The raw string is what
        // gets written: Url's Display re-normalizes (adds a trailing slash
        // to bare origins) and the payload must carry the caller's bytes.
        let parsed = Url::parse(target_url)
            .map_err(|_| invalid_url())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid_url());
        }

        let (_root, parent_dir) = self.resolve(resource, path).await?;
        tokio::fs::create_dir_all(&parent_dir).await?;

        let mut safe_name = sanitize_name(name, DEFAULT_URL_NAME);
        if !safe_name
            .to_ascii_lowercase()
            .ends_with(URL_SHORTCUT_EXTENSION)
        {
            safe_name.push_str(URL_SHORTCUT_EXTENSION);
        }

        let payload = format!("[InternetShortcut]\r\nURL={target_url}\r\n");

        let unique = {
            let _guard = self.lock_dir(&parent_dir).await;
            let unique = unique_name(&parent_dir, &safe_name).await?;
            let mut out = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(parent_dir.join(&unique))
                .await?;
            out.write_all(payload.as_bytes()).await?;
            out.flush().await?;
            unique
        };

        Ok(entry::file_entry(&unique, path, &self.config.icons))
    }

    async fn delete(&self, resource: &str, path: &RelativePath) -> Result<(), StorageError> {
        if path.is_root() {
            return Err(StorageError::InvalidArgument(
                "cannot delete the resource root".to_string(),
            ));
        }

        let (_root, absolute) = self.resolve(resource, path).await?;

        let meta = tokio::fs::metadata(&absolute)
            .await
            .map_err(StorageError::from_read)?;

        if meta.is_dir() {
            tokio::fs::remove_dir_all(&absolute).await?;
        } else {
            tokio::fs::remove_file(&absolute).await?;
        }
        Ok(())
    }
}

fn invalid_url() -> StorageError {
    StorageError::InvalidArgument("url must be an absolute http or https URL".to_string())
}

/// Replace characters the host filesystem disallows in a filename with `_`;
/// an empty or whitespace-only result becomes `fallback`.
pub fn sanitize_name(name: &str, fallback: &str) -> String {
    const INVALID: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

    let sanitized: String = name
        .chars()
        .map(|c| {
            if INVALID.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if sanitized.trim().is_empty() {
        fallback.to_string()
    } else {
        sanitized
    }
}

/// Probe `desired`, then `"{stem} (1){ext}"`, `"{stem} (2){ext}"`, ... until
/// a name unused by any file or directory is found. Callers serialize this
/// against concurrent creations via the per-directory lock.
async fn unique_name(directory: &Path, desired: &str) -> io::Result<String> {
    if !tokio::fs::try_exists(directory.join(desired)).await? {
        return Ok(desired.to_string());
    }

    let (stem, extension) = split_name(desired);
    let mut counter = 1u32;
    loop {
        let candidate = format!("{stem} ({counter}){extension}");
        if !tokio::fs::try_exists(directory.join(&candidate)).await? {
            return Ok(candidate);
        }
        counter += 1;
    }
}

/// Split into (stem, extension-with-dot); platform extension semantics, so
/// `"archive.tar.gz"` -> `("archive.tar", ".gz")` and dotfiles keep their
/// name whole.
fn split_name(name: &str) -> (String, String) {
    let path = Path::new(name);
    match path.extension() {
        Some(ext) => (
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
            format!(".{}", ext.to_string_lossy()),
        ),
        None => (name.to_string(), String::new()),
    }
}

/// Removes a partially written destination on drop unless disarmed.
///
/// Armed after the destination is created, disarmed after the last byte is
/// flushed, so size-ceiling rejections, io errors and a dropped (cancelled)
/// upload future all clean up after themselves.
struct PartialFile {
    path: Option<PathBuf>,
}

impl PartialFile {
    fn disarmed() -> Self {
        Self { path: None }
    }

    fn arm(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    fn disarm(&mut self) {
        self.path = None;
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}
