use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::IconConfig;
use crate::path::RelativePath;

pub const URL_SHORTCUT_EXTENSION: &str = ".url";

/// What a directory child is, as seen by clients.
///
/// Serialized as the wire codes `0` (folder), `1` (file), `2` (url shortcut).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Folder,
    File,
    UrlShortcut,
}

impl EntryKind {
    pub fn code(&self) -> u8 {
        match self {
            EntryKind::Folder => 0,
            EntryKind::File => 1,
            EntryKind::UrlShortcut => 2,
        }
    }
}

impl Serialize for EntryKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for EntryKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match u8::deserialize(deserializer)? {
            0 => Ok(EntryKind::Folder),
            1 => Ok(EntryKind::File),
            2 => Ok(EntryKind::UrlShortcut),
            other => Err(serde::de::Error::custom(format!(
                "unknown entry kind code: {other}"
            ))),
        }
    }
}

/// One directory child in the shape clients see.
///
/// A snapshot value: valid for the listing that produced it, never cached
/// across requests. The `path` doubles as the client's address for the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub filename: String,
    pub filename_without_extension: String,
    pub path: RelativePath,
    pub icon: String,
}

/// Project a folder child.
pub fn folder_entry(name: &str, parent: &RelativePath, icons: &IconConfig) -> StorageEntry {
    StorageEntry {
        kind: EntryKind::Folder,
        filename: name.to_string(),
        filename_without_extension: name.to_string(),
        path: parent.child(name),
        icon: icons.folder.clone(),
    }
}

/// Project a file child, classifying `.url` files as shortcuts.
pub fn file_entry(name: &str, parent: &RelativePath, icons: &IconConfig) -> StorageEntry {
    let extension = extension_of(name);
    let is_url = extension.eq_ignore_ascii_case(URL_SHORTCUT_EXTENSION);

    let icon = if is_url {
        icons.url.clone()
    } else {
        icons.for_extension(&extension).to_string()
    };

    StorageEntry {
        kind: if is_url {
            EntryKind::UrlShortcut
        } else {
            EntryKind::File
        },
        filename: name.to_string(),
        filename_without_extension: Path::new(name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string()),
        path: parent.child(name),
        icon,
    }
}

/// The extension of `name` including the leading dot, lowercased; empty when
/// there is none.
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_ascii_lowercase()))
        .unwrap_or_default()
}
