use async_trait::async_trait;

use crate::engine::{FileDownload, IncomingFile, Listing};
use crate::entry::StorageEntry;
use crate::error::StorageError;
use crate::path::RelativePath;

/// The storage capability: the six operations callers are allowed to ask of
/// a backend.
///
/// [`FsStorage`](crate::engine::FsStorage) is the filesystem-as-truth
/// implementation. Callers hold `Arc<dyn Storage>` so an alternative backend
/// (e.g. one mirroring metadata into a database) can be swapped in without
/// touching the HTTP layer.
///
/// `path` arguments are already normalized; converting raw client input is
/// the caller's job via [`RelativePath::normalize`].
#[async_trait]
pub trait Storage: Send + Sync {
    /// Immediate children of a directory: folders first, then files, each
    /// group sorted case-insensitively.
    async fn list(&self, resource: &str, path: &RelativePath) -> Result<Listing, StorageError>;

    /// Store incoming files under a directory, creating it if missing.
    /// Zero-length inputs are skipped; returns one entry per stored file.
    async fn upload<'a>(
        &self,
        resource: &str,
        path: &RelativePath,
        files: Vec<IncomingFile<'a>>,
    ) -> Result<Vec<StorageEntry>, StorageError>;

    /// Open a stored file for reading. `None` when the path is not an
    /// existing regular file.
    async fn download(
        &self,
        resource: &str,
        path: &RelativePath,
    ) -> Result<Option<FileDownload>, StorageError>;

    /// Create a folder under `path`, uniquifying the desired name.
    async fn create_folder(
        &self,
        resource: &str,
        path: &RelativePath,
        name: &str,
    ) -> Result<StorageEntry, StorageError>;

    /// Create a `.url` shortcut file under `path` pointing at `target_url`
    /// (must be an absolute http/https URL).
    async fn create_url(
        &self,
        resource: &str,
        path: &RelativePath,
        name: &str,
        target_url: &str,
    ) -> Result<StorageEntry, StorageError>;

    /// Delete a file, or a directory and all of its descendants.
    async fn delete(&self, resource: &str, path: &RelativePath) -> Result<(), StorageError>;
}
