use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// A normalized, traversal-free path below a resource root.
///
/// Always forward-slash separated with no leading or trailing slash; the
/// empty string addresses the root itself. Construction goes through
/// [`RelativePath::normalize`], which is idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelativePath(String);

impl RelativePath {
    /// The resource root.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Normalize a client-supplied path.
    ///
    /// Empty or whitespace-only input addresses the root, unless `required`
    /// is set in which case it is an `InvalidArgument`. Backslashes become
    /// forward slashes and surrounding slashes/whitespace are trimmed.
    ///
    /// Any occurrence of the substring `..` fails with `AccessDenied`. The
    /// guard is deliberately coarse: it also rejects legitimate filenames
    /// containing `..`.
    pub fn normalize(raw: &str, required: bool) -> Result<Self, StorageError> {
        if raw.trim().is_empty() {
            if required {
                return Err(StorageError::InvalidArgument(
                    "path must not be empty".to_string(),
                ));
            }
            return Ok(Self::root());
        }

        let cleaned = raw.replace('\\', "/");
        // One pass over both ends handles any mix of whitespace and slashes,
        // which keeps normalization idempotent.
        let cleaned = cleaned.trim_matches(|c: char| c == '/' || c.is_whitespace());

        if cleaned.contains("..") {
            return Err(StorageError::AccessDenied);
        }

        Ok(Self(cleaned.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The relative path of a child entry named `name`.
    pub fn child(&self, name: &str) -> RelativePath {
        if self.0.is_empty() {
            RelativePath(name.to_string())
        } else {
            RelativePath(format!("{}/{}", self.0, name))
        }
    }

    /// Join onto an absolute resource root.
    ///
    /// Segments are appended one at a time and each must parse as a single
    /// normal path component. Anything the OS would treat as a root, a
    /// prefix (drive letter) or a parent reference fails with
    /// `AccessDenied`, so the joined result cannot escape `root`.
    pub fn join_to(&self, root: &Path) -> Result<PathBuf, StorageError> {
        let mut joined = root.to_path_buf();
        for segment in self.0.split('/').filter(|s| !s.is_empty() && *s != ".") {
            let mut components = Path::new(segment).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(part)), None) => joined.push(part),
                _ => return Err(StorageError::AccessDenied),
            }
        }
        Ok(joined)
    }
}

impl std::fmt::Display for RelativePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
