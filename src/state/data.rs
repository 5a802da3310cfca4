//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the catalog file and the UI layer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Represents a single imported HTML document in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Full path to the private copy (not where the user imported it from)
    pub source_path: PathBuf,
    /// User-editable name shown on the tile
    pub display_name: String,
    /// Pinned entries are listed first
    #[serde(default)]
    pub pinned: bool,
    /// Unique id, also the content file's stem
    pub id: String,
    /// Packed 0xAARRGGBB tint picked at import time
    pub accent_color: u32,
}

impl Entry {
    pub fn content_path(&self) -> &Path {
        &self.source_path
    }

    /// Whether the backing content file is still on disk
    pub fn content_exists(&self) -> bool {
        self.source_path.is_file()
    }
}

/// Result of a folder import operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: Vec<Entry>,
    pub failed_count: usize,
}

impl ImportSummary {
    pub fn imported_count(&self) -> usize {
        self.imported.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let entry = Entry {
            source_path: PathBuf::from("/data/embedded_html/abc.html"),
            display_name: "Notes".to_string(),
            pinned: true,
            id: "abc".to_string(),
            accent_color: 0xFF2196F3,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["sourcePath"], "/data/embedded_html/abc.html");
        assert_eq!(json["displayName"], "Notes");
        assert_eq!(json["pinned"], true);
        assert_eq!(json["id"], "abc");
        assert_eq!(json["accentColor"], 0xFF2196F3u32);
    }

    #[test]
    fn test_pinned_defaults_to_false() {
        let json = r#"{
            "sourcePath": "/data/embedded_html/abc.html",
            "displayName": "Notes",
            "id": "abc",
            "accentColor": 4280391411
        }"#;

        let entry: Entry = serde_json::from_str(json).unwrap();
        assert!(!entry.pinned);
        assert_eq!(entry.accent_color, 4280391411);
    }

    #[test]
    fn test_content_exists_follows_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc.html");
        let entry = Entry {
            source_path: path.clone(),
            display_name: "Notes".to_string(),
            pinned: false,
            id: "abc".to_string(),
            accent_color: 0,
        };

        assert!(!entry.content_exists());
        std::fs::write(&path, "<html></html>").unwrap();
        assert!(entry.content_exists());
        assert_eq!(entry.content_path(), path.as_path());
    }
}
