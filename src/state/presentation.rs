//! Display order for the tile grid
//!
//! Pinned entries first, then by display name. The list is always rebuilt
//! from the catalog in full; it is never patched in place.

use std::cmp::Ordering;

use super::catalog::Catalog;
use super::data::Entry;

/// Stable sort by `(not pinned, display_name)`.
///
/// Names compare ordinally (by code point), without locale folding, so
/// uppercase sorts before lowercase.
pub fn presentation_order(mut entries: Vec<Entry>) -> Vec<Entry> {
    entries.sort_by(compare_for_display);
    entries
}

fn compare_for_display(a: &Entry, b: &Entry) -> Ordering {
    (!a.pinned, a.display_name.as_str()).cmp(&(!b.pinned, b.display_name.as_str()))
}

/// Snapshot of the catalog in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationList {
    entries: Vec<Entry>,
}

impl PresentationList {
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries: presentation_order(entries),
        }
    }

    pub fn load(catalog: &Catalog) -> Self {
        Self::from_entries(catalog.load_all())
    }

    /// Throw away the current view state and rebuild from the catalog
    pub fn refresh(&mut self, catalog: &Catalog) {
        *self = Self::load(catalog);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Entry> {
        self.entries.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Find by exact id, or by an id prefix that matches exactly one entry
    pub fn find(&self, key: &str) -> Option<&Entry> {
        if key.is_empty() {
            return None;
        }
        if let Some(entry) = self.entries.iter().find(|entry| entry.id == key) {
            return Some(entry);
        }

        let mut matches = self.entries.iter().filter(|entry| entry.id.starts_with(key));
        match (matches.next(), matches.next()) {
            (Some(entry), None) => Some(entry),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Palette;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::path::PathBuf;

    fn entry(id: &str, name: &str, pinned: bool) -> Entry {
        Entry {
            source_path: PathBuf::from(format!("/shelf/embedded_html/{id}.html")),
            display_name: name.to_string(),
            pinned,
            id: id.to_string(),
            accent_color: 0,
        }
    }

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.display_name.as_str()).collect()
    }

    #[test]
    fn test_pinned_first_then_name() {
        let ordered = presentation_order(vec![
            entry("1", "B", false),
            entry("2", "A", true),
            entry("3", "C", true),
        ]);
        assert_eq!(names(&ordered), vec!["A", "C", "B"]);
    }

    #[rstest]
    #[case(vec![("b", false), ("a", false)], vec!["a", "b"])]
    #[case(vec![("z", true), ("a", false)], vec!["z", "a"])]
    #[case(vec![("b", false), ("B", false), ("a", false)], vec!["B", "a", "b"])]
    #[case(vec![("", false), ("x", true), ("a", false)], vec!["x", "", "a"])]
    fn test_ordering_cases(#[case] input: Vec<(&str, bool)>, #[case] expected: Vec<&str>) {
        let entries = input
            .into_iter()
            .enumerate()
            .map(|(i, (name, pinned))| entry(&i.to_string(), name, pinned))
            .collect();
        assert_eq!(names(&presentation_order(entries)), expected);
    }

    #[test]
    fn test_equal_keys_keep_catalog_order() {
        let ordered = presentation_order(vec![
            entry("first", "Same", false),
            entry("second", "Same", false),
            entry("third", "Same", false),
        ]);
        let ids: Vec<&str> = ordered.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_find_by_id_and_unique_prefix() {
        let list = PresentationList::from_entries(vec![
            entry("abc123", "one", false),
            entry("abd456", "two", false),
            entry("ab", "three", false),
        ]);

        assert_eq!(list.find("abc123").unwrap().display_name, "one");
        assert_eq!(list.find("abd").unwrap().display_name, "two");
        // Exact id wins over being a prefix of others
        assert_eq!(list.find("ab").unwrap().display_name, "three");
        assert!(list.find("a").is_none());
        assert!(list.find("zzz").is_none());
        assert!(list.find("").is_none());
    }

    #[test]
    fn test_refresh_reflects_every_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::open(dir.path(), Palette::default());

        let mut list = PresentationList::load(&catalog);
        assert!(list.is_empty());

        let b = catalog.import_content("<p>b</p>".as_bytes(), "B").unwrap();
        let a = catalog.import_content("<p>a</p>".as_bytes(), "A").unwrap();
        list.refresh(&catalog);
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap().id, a.id);

        catalog.set_pinned(&b.id, true).unwrap();
        list.refresh(&catalog);
        assert_eq!(list.get(0).unwrap().id, b.id);
        assert!(list.get(0).unwrap().pinned);

        catalog.delete_content(&b).unwrap();
        list.refresh(&catalog);
        let ids: Vec<&str> = list.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec![a.id.as_str()]);
        assert!(list.get(1).is_none());
    }
}
