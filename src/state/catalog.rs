use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use uuid::Uuid;
use walkdir::WalkDir;

use super::data::{Entry, ImportSummary};
use super::edit::suggested_display_name;
use super::error::CatalogError;
use crate::color::Palette;
use crate::config::{ConfigError, ShelfConfig};

/// Catalog file name inside the data directory
const CATALOG_FILENAME: &str = "file_metadata.json";
/// Directory holding one `{id}.html` per entry
const CONTENT_DIRNAME: &str = "embedded_html";
const CONTENT_EXTENSION: &str = "html";
/// Extensions picked up by folder import (compared lowercase)
const IMPORTABLE_EXTENSIONS: [&str; 2] = ["html", "htm"];

/// The Catalog owns the metadata file and the private content files.
///
/// Every read goes back to disk and hands out a fresh snapshot. Mutations
/// reload, change one thing, and rewrite the whole catalog file. Within one
/// process mutations are serialized so concurrent callers never drop each
/// other's updates.
pub struct Catalog {
    data_dir: PathBuf,
    catalog_path: PathBuf,
    content_dir: PathBuf,
    palette: Palette,
    writer: Mutex<()>,
}

impl Catalog {
    /// Create a Catalog rooted at `data_dir`.
    ///
    /// Nothing is touched on disk until the first import or save:
    /// - `{data_dir}/file_metadata.json` holds the entry list
    /// - `{data_dir}/embedded_html/` holds the content files
    pub fn open(data_dir: impl Into<PathBuf>, palette: Palette) -> Self {
        let data_dir = absolutize(data_dir.into());
        let catalog_path = data_dir.join(CATALOG_FILENAME);
        let content_dir = data_dir.join(CONTENT_DIRNAME);

        tracing::debug!(
            catalog = %catalog_path.display(),
            content = %content_dir.display(),
            "catalog opened"
        );

        Catalog {
            data_dir,
            catalog_path,
            content_dir,
            palette,
            writer: Mutex::new(()),
        }
    }

    pub fn from_config(config: &ShelfConfig) -> Result<Self, ConfigError> {
        Ok(Self::open(config.data_dir.clone(), config.palette()?))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Load every entry, treating a missing or unreadable catalog as empty.
    ///
    /// First run (no file yet) is a normal empty state. A corrupt file is
    /// logged and also reads as empty; use [`Catalog::try_load_all`] to see
    /// the failure instead.
    pub fn load_all(&self) -> Vec<Entry> {
        match self.try_load_all() {
            Ok(entries) => entries,
            Err(error) => {
                tracing::warn!(%error, "treating unreadable catalog as empty");
                Vec::new()
            }
        }
    }

    /// Load every entry, reporting read and parse failures.
    ///
    /// A missing file is still an empty catalog, not an error. Parsing is
    /// all-or-nothing: one bad record fails the whole load.
    pub fn try_load_all(&self) -> Result<Vec<Entry>, CatalogError> {
        let contents = match fs::read_to_string(&self.catalog_path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(CatalogError::Read {
                    path: self.catalog_path.clone(),
                    source,
                })
            }
        };

        // `null` is what an empty list used to be written as
        let entries: Option<Vec<Entry>> =
            serde_json::from_str(&contents).map_err(|source| CatalogError::Malformed {
                path: self.catalog_path.clone(),
                source,
            })?;

        Ok(entries.unwrap_or_default())
    }

    /// Replace the persisted catalog with `entries`.
    pub fn save_all(&self, entries: &[Entry]) -> Result<(), CatalogError> {
        let _writer = self.lock_writer();
        self.write_catalog(entries)
    }

    /// Copy a document into private storage and add it to the catalog.
    ///
    /// The accent color depends only on how many entries exist right now:
    /// `palette[count % palette.len()]`. On any failure the copied file is
    /// removed again so nothing half-imported stays around.
    pub fn import_content<R: Read>(
        &self,
        mut reader: R,
        suggested_name: &str,
    ) -> Result<Entry, CatalogError> {
        let _writer = self.lock_writer();
        let mut entries = self.load_all();

        fs::create_dir_all(&self.content_dir).map_err(|source| CatalogError::ContentDir {
            path: self.content_dir.clone(),
            source,
        })?;

        let id = self.fresh_id(&entries);
        let content_path = self.content_path_for(&id);

        if let Err(source) = copy_into_new_file(&mut reader, &content_path) {
            tracing::error!(
                path = %content_path.display(),
                error = %source,
                "failed to copy imported content"
            );
            remove_quietly(&content_path);
            return Err(CatalogError::Import {
                path: content_path,
                source,
            });
        }

        let entry = Entry {
            source_path: content_path.clone(),
            display_name: suggested_name.to_string(),
            pinned: false,
            id,
            accent_color: self.palette.color_for_index(entries.len()),
        };

        entries.push(entry.clone());
        if let Err(error) = self.write_catalog(&entries) {
            remove_quietly(&content_path);
            return Err(error);
        }

        tracing::info!(id = %entry.id, name = %entry.display_name, "imported document");
        Ok(entry)
    }

    /// Import a local file. The display name defaults to the file's name.
    pub fn import_file(&self, path: &Path, name: Option<&str>) -> Result<Entry, CatalogError> {
        let display_name = name
            .map(str::to_string)
            .unwrap_or_else(|| suggested_display_name(path));

        let file = File::open(path).map_err(|source| CatalogError::Import {
            path: path.to_path_buf(),
            source,
        })?;

        self.import_content(BufReader::new(file), &display_name)
    }

    /// Import every `.html`/`.htm` file below `folder`, recursively.
    ///
    /// A file that fails to import is logged and counted; the rest still go
    /// in. Only an unreadable `folder` itself fails the whole call.
    pub fn import_folder(&self, folder: &Path) -> Result<ImportSummary, CatalogError> {
        let folder = absolutize(folder.to_path_buf());
        let mut summary = ImportSummary::default();

        tracing::info!(folder = %folder.display(), "scanning folder for HTML files");

        for item in WalkDir::new(&folder).follow_links(true).sort_by_file_name() {
            let item = match item {
                Ok(item) => item,
                Err(source) if source.depth() == 0 => {
                    return Err(CatalogError::Scan {
                        path: folder,
                        source,
                    })
                }
                Err(error) => {
                    tracing::warn!(%error, "skipping unreadable folder entry");
                    continue;
                }
            };

            let path = item.path();
            if !item.file_type().is_file() || !is_importable(path) {
                continue;
            }
            // Pointing at the data dir must not re-import our own copies
            if path.starts_with(&self.content_dir) {
                continue;
            }

            match self.import_file(path, None) {
                Ok(entry) => summary.imported.push(entry),
                Err(error) => {
                    tracing::warn!(%error, path = %path.display(), "failed to import file");
                    summary.failed_count += 1;
                }
            }
        }

        tracing::info!(
            imported = summary.imported_count(),
            failed = summary.failed_count,
            "folder import complete"
        );
        Ok(summary)
    }

    /// Remove an entry from the catalog and delete its content file.
    ///
    /// Entries are matched by `id`, so a caller holding a stale snapshot
    /// (e.g. from before a rename) still deletes the right record. Returns
    /// `Ok(false)` without touching the catalog file when no entry has that
    /// id. Failing to delete the content file afterwards is logged only.
    pub fn delete_content(&self, entry: &Entry) -> Result<bool, CatalogError> {
        let _writer = self.lock_writer();
        let mut entries = self.load_all();

        let Some(position) = entries.iter().position(|candidate| candidate.id == entry.id) else {
            tracing::debug!(id = %entry.id, "delete requested for unknown entry");
            return Ok(false);
        };

        let removed = entries.remove(position);
        self.write_catalog(&entries)?;
        self.remove_content_file(&removed);

        tracing::info!(id = %removed.id, name = %removed.display_name, "deleted document");
        Ok(true)
    }

    /// Look up a single entry by id
    pub fn get(&self, id: &str) -> Option<Entry> {
        self.load_all().into_iter().find(|entry| entry.id == id)
    }

    /// Change an entry's display name.
    ///
    /// The name is stored verbatim; blank names are rejected before this is
    /// called (see [`crate::state::edit::validate_display_name`]).
    pub fn rename(&self, id: &str, display_name: &str) -> Result<Option<Entry>, CatalogError> {
        self.update_entry(id, |entry| entry.display_name = display_name.to_string())
    }

    pub fn set_pinned(&self, id: &str, pinned: bool) -> Result<Option<Entry>, CatalogError> {
        self.update_entry(id, |entry| entry.pinned = pinned)
    }

    pub fn toggle_pin(&self, id: &str) -> Result<Option<Entry>, CatalogError> {
        self.update_entry(id, |entry| entry.pinned = !entry.pinned)
    }

    /// Entries whose content file is gone from disk.
    ///
    /// Loading never checks this; it is only done when asked for.
    pub fn verify_files(&self) -> Vec<Entry> {
        let missing: Vec<Entry> = self
            .load_all()
            .into_iter()
            .filter(|entry| !entry.content_exists())
            .collect();

        if !missing.is_empty() {
            tracing::warn!(count = missing.len(), "entries with missing content files");
        }

        missing
    }

    fn update_entry(
        &self,
        id: &str,
        apply: impl FnOnce(&mut Entry),
    ) -> Result<Option<Entry>, CatalogError> {
        let _writer = self.lock_writer();
        let mut entries = self.load_all();

        let Some(entry) = entries.iter_mut().find(|entry| entry.id == id) else {
            return Ok(None);
        };
        apply(entry);
        let updated = entry.clone();

        self.write_catalog(&entries)?;
        Ok(Some(updated))
    }

    /// Serialize and write; the caller holds the writer lock.
    fn write_catalog(&self, entries: &[Entry]) -> Result<(), CatalogError> {
        let result = serde_json::to_vec_pretty(entries)
            .map_err(CatalogError::Encode)
            .and_then(|payload| {
                write_atomic(&self.catalog_path, &payload).map_err(|source| {
                    CatalogError::Write {
                        path: self.catalog_path.clone(),
                        source,
                    }
                })
            });

        if let Err(error) = &result {
            tracing::error!(%error, "failed to save catalog");
        }
        result
    }

    fn remove_content_file(&self, entry: &Entry) {
        let path = entry.content_path();
        if !path.starts_with(&self.content_dir) {
            tracing::warn!(
                path = %path.display(),
                "content file is outside the content directory; leaving it alone"
            );
            return;
        }

        match fs::remove_file(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed content file"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "failed to remove content file")
            }
        }
    }

    fn fresh_id(&self, entries: &[Entry]) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            let taken = entries.iter().any(|entry| entry.id == id)
                || self.content_path_for(&id).exists();
            if !taken {
                return id;
            }
        }
    }

    fn content_path_for(&self, id: &str) -> PathBuf {
        self.content_dir.join(format!("{id}.{CONTENT_EXTENSION}"))
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        // The guarded value is (), so a poisoned lock carries no broken state
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("data_dir", &self.data_dir)
            .field("palette_len", &self.palette.len())
            .finish()
    }
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}

fn is_importable(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMPORTABLE_EXTENSIONS.contains(&ext.as_str()))
}

fn copy_into_new_file<R: Read>(reader: &mut R, path: &Path) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    io::copy(reader, &mut file)?;
    file.flush()?;
    file.sync_all()
}

fn remove_quietly(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %err, "failed to clean up file");
        }
    }
}

/// Write to a sibling temp file, then rename over the target.
fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, data)?;
    fs::rename(&tmp_path, path)
}
