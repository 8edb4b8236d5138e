use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::StorageError;

/// A resolved resource (tenant) root: the sanitized key and the absolute
/// directory all of the tenant's entries live under.
///
/// Resolution is deterministic for a given key. Sanitization is many-to-one,
/// so distinct raw keys can land on the same root; that collision is accepted
/// behavior, not isolation the resolver promises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRoot {
    key: String,
    root: PathBuf,
}

impl ResourceRoot {
    /// Resolve a tenant key against the base storage path, creating the
    /// root directory on first use.
    pub async fn resolve(base: &Path, tenant_key: &str) -> Result<Self, StorageError> {
        if tenant_key.trim().is_empty() {
            return Err(StorageError::InvalidArgument(
                "resource key must not be empty".to_string(),
            ));
        }

        let key = sanitize_key(tenant_key);
        let root = base.join(&key);
        tokio::fs::create_dir_all(&root).await?;

        Ok(Self { key, root })
    }

    /// The sanitized key, always matching `[A-Za-z0-9-_]+`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Absolute root directory for this resource.
    pub fn path(&self) -> &Path {
        &self.root
    }
}

/// Replace every character outside `[A-Za-z0-9-_]` with `_`. An empty result
/// falls back to a generated identifier, orphaning the caller's chosen key.
fn sanitize_key(raw: &str) -> String {
    let sanitized: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        format!("resource_{}", Uuid::new_v4().simple())
    } else {
        sanitized
    }
}
