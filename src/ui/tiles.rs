//! Text rendering of the tile grid
//!
//! One line per entry, in presentation order: pin marker, name, accent
//! color and a short id that the other commands accept.

use std::fmt::Write as _;

use crate::color::to_hex;
use crate::state::{Entry, PresentationList};

/// Shown instead of the grid when the catalog is empty
pub const EMPTY_STATE: &str = "No HTML files yet. Import one with `html-shelf import <FILE>`.";

const PIN_MARKER: char = '*';
const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((cut, _)) => &id[..cut],
        None => id,
    }
}

pub fn render_tile(entry: &Entry, name_width: usize) -> String {
    let marker = if entry.pinned { PIN_MARKER } else { ' ' };
    format!(
        "{marker} {name:<name_width$}  {color}  {id}",
        name = entry.display_name,
        color = to_hex(entry.accent_color),
        id = short_id(&entry.id),
    )
}

/// Render the whole list, or the empty state
pub fn render_grid(list: &PresentationList) -> String {
    if list.is_empty() {
        return format!("{EMPTY_STATE}\n");
    }

    let name_width = list
        .iter()
        .map(|entry| entry.display_name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in list.iter() {
        let _ = writeln!(out, "{}", render_tile(entry, name_width).trim_end());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn entry(id: &str, name: &str, pinned: bool, color: u32) -> Entry {
        Entry {
            source_path: PathBuf::from(format!("/shelf/embedded_html/{id}.html")),
            display_name: name.to_string(),
            pinned,
            id: id.to_string(),
            accent_color: color,
        }
    }

    #[test]
    fn test_empty_state() {
        let list = PresentationList::default();
        assert_eq!(render_grid(&list), format!("{EMPTY_STATE}\n"));
    }

    #[test]
    fn test_grid_lines_follow_presentation_order() {
        let list = PresentationList::from_entries(vec![
            entry("bbbbbbbb-2222", "Beta", false, 0xFF00FF00),
            entry("aaaaaaaa-1111", "Alpha doc", true, 0xFFFF0000),
        ]);

        assert_eq!(
            render_grid(&list),
            "* Alpha doc  #FFFF0000  aaaaaaaa\n  Beta       #FF00FF00  bbbbbbbb\n"
        );
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }
}
