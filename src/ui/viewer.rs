//! Hand-off to the external document renderer
//!
//! The renderer itself is not ours; it only needs a title and a local
//! file URL.

use std::path::Path;

use crate::state::Entry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRequest {
    pub title: String,
    pub url: String,
    /// False when the content file has gone missing. The request is still built.
    pub available: bool,
}

impl ViewRequest {
    pub fn for_entry(entry: &Entry) -> Self {
        Self {
            title: entry.display_name.clone(),
            url: file_url(entry.content_path()),
            available: entry.content_exists(),
        }
    }
}

/// `file://` URL for a local path, percent-encoding anything unusual
pub fn file_url(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    let mut url = String::from("file://");
    if !raw.starts_with('/') {
        url.push('/');
    }

    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' | b':' => {
                url.push(byte as char)
            }
            _ => url.push_str(&format!("%{byte:02X}")),
        }
    }
    url
}
