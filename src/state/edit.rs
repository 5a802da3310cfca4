//! User edits that happen before anything reaches the catalog
//!
//! The catalog stores whatever display name it is given. Rejecting blank
//! names is the job of the UI boundary, and lives here.

use std::path::Path;

use thiserror::Error;

/// Name used when the picked file has no usable file name
pub const FALLBACK_DISPLAY_NAME: &str = "New HTML File";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("Name cannot be empty")]
    EmptyName,
}

/// Trim a user-typed display name and reject it if nothing is left
pub fn validate_display_name(input: &str) -> Result<String, EditError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(EditError::EmptyName);
    }
    Ok(name.to_string())
}

/// Display name for a freshly picked file: its last path segment
pub fn suggested_display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Report", "Report")]
    #[case("  padded name\t", "padded name")]
    #[case("x", "x")]
    fn test_validate_display_name_trims(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(validate_display_name(input), Ok(expected.to_string()));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t ")]
    fn test_blank_names_rejected(#[case] input: &str) {
        assert_eq!(validate_display_name(input), Err(EditError::EmptyName));
    }

    #[test]
    fn test_suggested_display_name() {
        assert_eq!(
            suggested_display_name(Path::new("/downloads/report.html")),
            "report.html"
        );
        assert_eq!(suggested_display_name(Path::new("/")), FALLBACK_DISPLAY_NAME);
        assert_eq!(suggested_display_name(Path::new("")), FALLBACK_DISPLAY_NAME);
    }
}
