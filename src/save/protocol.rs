//! Whole-catalog save/load protocol
//!
//! File layout:
//!
//! ```text
//! <entry_count>
//! <TypeTag> <field1> ... <fieldN>
//! ...
//! ```
//!
//! The stream-level functions (`write_catalog`, `read_catalog`) do the work;
//! the file-level ones only open the file and wrap it in a buffer.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use super::tokens::TokenReader;
use super::types::{OpenMode, SaveError};
use crate::catalog::Catalog;
use crate::entity::EntityRegistry;

/// Writes the entry count followed by one record per entry
pub fn write_catalog(catalog: &Catalog, out: &mut dyn Write) -> Result<(), SaveError> {
    writeln!(out, "{}", catalog.len())?;

    for entity in catalog {
        entity.serialize(out)?;
        debug!(tag = entity.type_tag(), "wrote record");
    }

    Ok(())
}

/// Replaces the catalog's contents with the records read from `input`
///
/// The catalog is cleared first. If a record fails, the entries loaded before
/// it stay in the catalog and the error is returned.
pub fn read_catalog(
    catalog: &mut Catalog,
    input: &mut dyn BufRead,
    registry: &EntityRegistry,
) -> Result<(), SaveError> {
    catalog.clear();

    let mut tokens = TokenReader::new(input);
    let count: usize = tokens.parse_field("entry count")?;

    for index in 0..count {
        let tag = tokens.expect_token("type tag")?;
        let mut entity = registry
            .create(&tag)
            .ok_or(SaveError::UnknownEntityType(tag))?;

        entity.load(&mut tokens)?;
        debug!(index, tag = entity.type_tag(), "loaded record");
        catalog.add(entity);
    }

    Ok(())
}

/// Saves the catalog to `path`, truncating any existing file
pub fn save_to_file(catalog: &Catalog, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| SaveError::Open {
        path: path.to_path_buf(),
        mode: OpenMode::Write,
        source,
    })?;

    let mut out = BufWriter::new(file);
    write_catalog(catalog, &mut out)?;
    out.flush()?;

    info!(path = %path.display(), entries = catalog.len(), "catalog saved");
    Ok(())
}

/// Loads `path` into the catalog, discarding whatever it held before
///
/// If the file cannot be opened the catalog is left untouched.
pub fn load_from_file(
    catalog: &mut Catalog,
    path: impl AsRef<Path>,
    registry: &EntityRegistry,
) -> Result<(), SaveError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SaveError::Open {
        path: path.to_path_buf(),
        mode: OpenMode::Read,
        source,
    })?;

    let mut input = BufReader::new(file);
    read_catalog(catalog, &mut input, registry)?;

    info!(path = %path.display(), entries = catalog.len(), "catalog loaded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Player;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add(Box::new(Player::new("Hero", 100, 1)));
        catalog.add(Box::new(Player::new("Mage", 80, 2)));
        catalog.add(Box::new(Player::new("Warrior", 120, 3)));
        catalog
    }

    fn players(catalog: &Catalog) -> Vec<Player> {
        catalog
            .iter()
            .map(|entity| {
                entity
                    .as_any()
                    .downcast_ref::<Player>()
                    .expect("entry is a Player")
                    .clone()
            })
            .collect()
    }

    fn read_str(catalog: &mut Catalog, text: &str) -> Result<(), SaveError> {
        let mut input = Cursor::new(text.as_bytes());
        read_catalog(catalog, &mut input, &EntityRegistry::default())
    }

    #[test]
    fn test_write_exact_format() {
        let mut out = Vec::new();
        write_catalog(&sample_catalog(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "3\nPlayer Hero 100 1\nPlayer Mage 80 2\nPlayer Warrior 120 3\n"
        );
    }

    #[test]
    fn test_write_empty_catalog() {
        let mut out = Vec::new();
        write_catalog(&Catalog::new(), &mut out).unwrap();
        assert_eq!(out, b"0\n");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game_save.txt");
        let original = sample_catalog();

        save_to_file(&original, &path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "3\nPlayer Hero 100 1\nPlayer Mage 80 2\nPlayer Warrior 120 3\n"
        );

        let mut loaded = Catalog::new();
        load_from_file(&mut loaded, &path, &EntityRegistry::default()).unwrap();
        assert_eq!(players(&loaded), players(&original));
        assert_eq!(loaded.describe_all(), original.describe_all());
    }

    #[test]
    fn test_round_trip_extreme_values() {
        let mut original = Catalog::new();
        original.add(Box::new(Player::new("Lich", i32::MIN, -1)));
        original.add(Box::new(Player::new("Golem", i32::MAX, 0)));
        original.add(Box::new(Player::new("Lich", i32::MIN, -1)));

        let mut buffer = Vec::new();
        write_catalog(&original, &mut buffer).unwrap();

        let mut loaded = Catalog::new();
        read_catalog(
            &mut loaded,
            &mut Cursor::new(buffer),
            &EntityRegistry::default(),
        )
        .unwrap();
        assert_eq!(players(&loaded), players(&original));
    }

    #[test]
    fn test_count_matches_records() {
        let mut buffer = Vec::new();
        write_catalog(&sample_catalog(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let mut lines = text.lines();
        let count: usize = lines.next().unwrap().parse().unwrap();
        assert_eq!(count, lines.count());
    }

    #[test]
    fn test_load_replaces_existing_entries() {
        let mut catalog = sample_catalog();
        read_str(&mut catalog, "1\nPlayer Rogue 50 7\n").unwrap();
        assert_eq!(players(&catalog), vec![Player::new("Rogue", 50, 7)]);
    }

    #[test]
    fn test_reads_exactly_count_records() {
        let mut catalog = Catalog::new();
        read_str(&mut catalog, "1\nPlayer Rogue 50 7\nGarbage that is never read\n").unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_unknown_tag_keeps_partial_progress() {
        let mut catalog = Catalog::new();
        let err = read_str(&mut catalog, "2\nPlayer Hero 100 1\nGoblin Grub 10 1\n").unwrap_err();

        match err {
            SaveError::UnknownEntityType(tag) => assert_eq!(tag, "Goblin"),
            other => panic!("expected UnknownEntityType, got {:?}", other),
        }
        assert_eq!(players(&catalog), vec![Player::new("Hero", 100, 1)]);
    }

    #[test]
    fn test_missing_field_is_parse_failure() {
        let mut catalog = Catalog::new();
        let err = read_str(&mut catalog, "1\nPlayer Hero 100\n").unwrap_err();
        assert!(err.is_parse_failure());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_non_numeric_field_is_parse_failure() {
        let mut catalog = Catalog::new();
        let err = read_str(&mut catalog, "1\nPlayer Hero strong 1\n").unwrap_err();
        assert!(matches!(err, SaveError::InvalidField { field: "health", .. }));
    }

    #[test]
    fn test_bad_count() {
        let mut catalog = Catalog::new();
        let err = read_str(&mut catalog, "-1\n").unwrap_err();
        assert!(matches!(err, SaveError::InvalidField { field: "entry count", .. }));

        let err = read_str(&mut catalog, "").unwrap_err();
        assert!(matches!(err, SaveError::MissingField { field: "entry count" }));
    }

    #[test]
    fn test_count_larger_than_records() {
        let mut catalog = Catalog::new();
        let err = read_str(&mut catalog, "2\nPlayer Hero 100 1\n").unwrap_err();
        assert!(matches!(err, SaveError::MissingField { field: "type tag" }));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_open_failures() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.txt");

        let mut catalog = sample_catalog();
        let err = load_from_file(&mut catalog, &missing, &EntityRegistry::default()).unwrap_err();
        assert!(matches!(err, SaveError::Open { mode: OpenMode::Read, .. }));
        // Open failed before the catalog was touched
        assert_eq!(catalog.len(), 3);

        let unwritable = dir.path().join("no_such_dir").join("save.txt");
        let err = save_to_file(&catalog, &unwritable).unwrap_err();
        assert!(matches!(err, SaveError::Open { mode: OpenMode::Write, .. }));
    }

    #[test]
    fn test_save_fails_on_unnamed_player() {
        let mut catalog = Catalog::new();
        catalog.add(Box::new(Player::default()));
        catalog.add(Box::new(Player::new("Hero", 100, 1)));

        let mut out = Vec::new();
        let err = write_catalog(&catalog, &mut out).unwrap_err();
        assert!(matches!(err, SaveError::UnwritableField { field: "name", .. }));
        assert_eq!(out, b"2\n");
    }

    #[test]
    fn test_save_truncates_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("save.txt");
        save_to_file(&sample_catalog(), &path).unwrap();

        let mut small = Catalog::new();
        small.add(Box::new(Player::new("Solo", 1, 1)));
        save_to_file(&small, &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1\nPlayer Solo 1 1\n");
    }
}
