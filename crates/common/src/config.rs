use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Per-file upload ceiling: 1.5 GiB.
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 1_610_612_736;

pub const DEFAULT_BASE_PATH: &str = "storage";
pub const DEFAULT_GALLERY_RESOURCE: &str = "public";

/// Immutable configuration for the storage engine.
///
/// Built once at startup (from the server's TOML config) and handed to
/// [`FsStorage`](crate::engine::FsStorage) by value; nothing here changes
/// after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base directory under which every resource root lives
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,
    /// Per-file upload size ceiling in bytes
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
    /// Resource key the gallery endpoints read from
    #[serde(default = "default_gallery_resource")]
    pub gallery_resource: String,
    /// Icon glyphs for entry projection
    #[serde(default)]
    pub icons: IconConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            max_upload_size: default_max_upload_size(),
            gallery_resource: default_gallery_resource(),
            icons: IconConfig::default(),
        }
    }
}

/// Icon glyphs used by entry projection.
///
/// `extensions` maps a lowercased extension including the leading dot
/// (e.g. `".pdf"`) to a glyph; anything missing falls back to `default`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconConfig {
    #[serde(default = "default_file_icon")]
    pub default: String,
    #[serde(default = "default_folder_icon")]
    pub folder: String,
    #[serde(default = "default_url_icon")]
    pub url: String,
    #[serde(default)]
    pub extensions: HashMap<String, String>,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            default: default_file_icon(),
            folder: default_folder_icon(),
            url: default_url_icon(),
            extensions: HashMap::new(),
        }
    }
}

impl IconConfig {
    /// Look up the glyph for a file extension (leading dot, any case).
    pub fn for_extension(&self, extension: &str) -> &str {
        if extension.is_empty() {
            return &self.default;
        }
        self.extensions
            .get(&extension.to_ascii_lowercase())
            .map(String::as_str)
            .unwrap_or(&self.default)
    }
}

fn default_base_path() -> PathBuf {
    PathBuf::from(DEFAULT_BASE_PATH)
}

fn default_max_upload_size() -> u64 {
    DEFAULT_MAX_UPLOAD_SIZE
}

fn default_gallery_resource() -> String {
    DEFAULT_GALLERY_RESOURCE.to_string()
}

fn default_file_icon() -> String {
    "📄".to_string()
}

fn default_folder_icon() -> String {
    "📁".to_string()
}

fn default_url_icon() -> String {
    "🔗".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.max_upload_size, 1_610_612_736);
        assert_eq!(config.base_path, PathBuf::from("storage"));
        assert_eq!(config.icons.folder, "📁");
        assert_eq!(config.icons.url, "🔗");
    }

    #[test]
    fn test_icon_lookup_is_case_insensitive() {
        let mut icons = IconConfig::default();
        icons
            .extensions
            .insert(".pdf".to_string(), "📕".to_string());

        assert_eq!(icons.for_extension(".pdf"), "📕");
        assert_eq!(icons.for_extension(".PDF"), "📕");
        assert_eq!(icons.for_extension(".docx"), icons.default);
        assert_eq!(icons.for_extension(""), icons.default);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: StorageConfig = toml::from_str(r#"base_path = "/srv/locker""#).unwrap();
        assert_eq!(config.base_path, PathBuf::from("/srv/locker"));
        assert_eq!(config.max_upload_size, DEFAULT_MAX_UPLOAD_SIZE);
        assert_eq!(config.gallery_resource, "public");
    }
}
