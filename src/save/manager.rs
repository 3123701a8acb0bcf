//! Save manager for handling catalog save files in one directory
//!
//! This module provides the SaveManager struct which handles:
//! - Resolving save names to files inside the save directory
//! - Manual saves and timestamped autosaves
//! - Save file management (listing, cleanup)

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime};
use tracing::{debug, warn};

use super::protocol::{load_from_file, save_to_file};
use super::tokens::TokenReader;
use super::types::*;
use crate::catalog::Catalog;
use crate::entity::EntityRegistry;

/// Timestamp embedded in autosave filenames, millisecond precision
const AUTOSAVE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S%.3f";

pub struct SaveManager {
    save_directory: PathBuf,
    registry: EntityRegistry,
}

impl SaveManager {
    /// Creates a new SaveManager with the given save directory
    ///
    /// The save directory will be created if it doesn't exist.
    pub fn new(save_directory: impl AsRef<Path>) -> Result<Self, SaveError> {
        let save_dir = save_directory.as_ref().to_path_buf();

        if !save_dir.exists() {
            fs::create_dir_all(&save_dir)?;
        }

        Ok(SaveManager {
            save_directory: save_dir,
            registry: EntityRegistry::default(),
        })
    }

    /// Replaces the registry used to resolve type tags on load
    pub fn with_registry(mut self, registry: EntityRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn save_directory(&self) -> &Path {
        &self.save_directory
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Save the catalog under `name`
    ///
    /// Manual saves overwrite `<name>.txt`; autosaves get a fresh timestamped file.
    pub fn save(
        &self,
        catalog: &Catalog,
        name: &str,
        save_type: SaveType,
    ) -> Result<PathBuf, SaveError> {
        let filepath = self.save_directory.join(self.generate_filename(name, save_type));
        save_to_file(catalog, &filepath)?;
        Ok(filepath)
    }

    /// Load the manual save `<name>.txt` into the catalog
    pub fn load(&self, catalog: &mut Catalog, name: &str) -> Result<(), SaveError> {
        let filepath = self.path_for(name);
        load_from_file(catalog, &filepath, &self.registry)
    }

    /// Check if a manual save exists for `name`
    pub fn save_exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    /// Path of the manual save file for `name`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.save_directory
            .join(format!("{}.{}", name, SAVE_FILE_EXTENSION))
    }

    /// List all save files, newest first
    ///
    /// Files whose entry count or modification time cannot be read are skipped.
    pub fn list_saves(&self) -> Result<Vec<SaveFileInfo>, SaveError> {
        let mut saves = Vec::new();

        for entry in fs::read_dir(&self.save_directory)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) != Some(SAVE_FILE_EXTENSION) {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|f| f.to_str()) else {
                continue;
            };

            let info = read_entry_count(&path).and_then(|entry_count| {
                let modified: DateTime<Local> = entry.metadata()?.modified()?.into();
                Ok(SaveFileInfo {
                    filename: filename.to_string(),
                    modified,
                    entry_count,
                })
            });

            match info {
                Ok(info) => saves.push(info),
                Err(err) => {
                    warn!("Failed to read save {}: {err}", path.display());
                }
            }
        }

        saves.sort_by(|a, b| b.modified.cmp(&a.modified));

        Ok(saves)
    }

    /// Delete old autosaves of `name`, keeping only the `keep_count` most recent
    pub fn cleanup_autosaves(&self, name: &str, keep_count: usize) -> Result<usize, SaveError> {
        let mut autosaves: Vec<(NaiveDateTime, PathBuf)> = fs::read_dir(&self.save_directory)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter_map(|path| {
                let filename = path.file_name()?.to_str()?;
                let timestamp = autosave_timestamp(name, filename)?;
                Some((timestamp, path))
            })
            .collect();

        // Newest first
        autosaves.sort_by(|a, b| b.0.cmp(&a.0));

        let mut removed = 0;
        for (_, path) in autosaves.iter().skip(keep_count) {
            fs::remove_file(path)?;
            debug!(path = %path.display(), "removed old autosave");
            removed += 1;
        }

        Ok(removed)
    }

    fn generate_filename(&self, name: &str, save_type: SaveType) -> String {
        match save_type {
            SaveType::Manual => format!("{}.{}", name, SAVE_FILE_EXTENSION),
            SaveType::Auto => {
                let timestamp = Local::now().format(AUTOSAVE_TIMESTAMP_FORMAT);
                format!(
                    "{}{}.{}",
                    autosave_prefix(name),
                    timestamp,
                    SAVE_FILE_EXTENSION
                )
            }
        }
    }
}

pub struct SaveFileInfo {
    pub filename: String,
    pub modified: DateTime<Local>,
    pub entry_count: usize,
}

fn autosave_prefix(name: &str) -> String {
    format!("autosave_{}_", name)
}

/// Timestamp of `filename` if it is exactly an autosave of `name`
///
/// `autosave_run_x_<timestamp>.txt` is not an autosave of `run`: what follows
/// the prefix must be the timestamp and the extension, nothing else.
fn autosave_timestamp(name: &str, filename: &str) -> Option<NaiveDateTime> {
    let rest = filename
        .strip_prefix(&autosave_prefix(name))?
        .strip_suffix(SAVE_FILE_EXTENSION)?
        .strip_suffix('.')?;
    NaiveDateTime::parse_from_str(rest, AUTOSAVE_TIMESTAMP_FORMAT).ok()
}

/// Reads only the header line of a save file
fn read_entry_count(path: &Path) -> Result<usize, SaveError> {
    let file = File::open(path).map_err(|source| SaveError::Open {
        path: path.to_path_buf(),
        mode: OpenMode::Read,
        source,
    })?;
    let mut input = BufReader::new(file);
    TokenReader::new(&mut input).parse_field("entry count")
}
