/**
 * Capability interface over the six storage
 *  operations. The filesystem engine is the
 *  only implementation shipped here; callers
 *  hold `Arc<dyn Storage>` so a metadata-backed
 *  variant can slot in without touching them.
 */
pub mod backend;
/**
 * Immutable configuration for the storage
 *  engine: base path, upload ceiling, icon
 *  glyphs and the gallery resource name.
 * Built once at startup and handed to the
 *  engine by value.
 */
pub mod config;
/**
 * The fixed extension -> content-type table
 *  used when serving downloads.
 */
pub mod content_type;
/**
 * The storage operations engine: list, upload,
 *  download, create-folder, create-url-shortcut
 *  and recursive delete against a resolved
 *  resource root.
 */
pub mod engine;
/**
 * Projection of raw directory children into the
 *  externally visible entry shape (kind, names,
 *  relative path, icon).
 */
pub mod entry;
/**
 * The error taxonomy surfaced by the core.
 *  The core never logs and never retries;
 *  mapping to transport status codes is the
 *  caller's job.
 */
pub mod error;
/**
 * Client-supplied relative paths: slash
 *  normalization, the traversal guard, and
 *  safe joining onto a resource root.
 */
pub mod path;
/**
 * Resource (tenant) key sanitization and lazy
 *  root directory resolution.
 */
pub mod resource;

pub mod prelude {
    pub use crate::backend::Storage;
    pub use crate::config::{IconConfig, StorageConfig, DEFAULT_MAX_UPLOAD_SIZE};
    pub use crate::engine::{FileDownload, FsStorage, IncomingFile, Listing};
    pub use crate::entry::{EntryKind, StorageEntry};
    pub use crate::error::StorageError;
    pub use crate::path::RelativePath;
    pub use crate::resource::ResourceRoot;
}
