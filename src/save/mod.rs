//! Save/Load system for the catalog
//!
//! This module provides a line-oriented text persistence layer with:
//! - A count header followed by one record per entity
//! - Records tagged with their entity type, resolved through the registry on load
//! - A directory-level manager for named saves and autosaves
//!
//! # Architecture
//!
//! - `types`: Error taxonomy and small save enums
//! - `tokens`: Whitespace token reader used by entity loaders
//! - `protocol`: Whole-catalog write/read, stream and file level
//! - `manager`: SaveManager for file operations inside a save directory
//!
//! # Example Usage
//!
//! ```ignore
//! let mut catalog = Catalog::new();
//! catalog.add(Box::new(Player::new("Hero", 100, 1)));
//! save_to_file(&catalog, "game_save.txt")?;
//!
//! let mut loaded = Catalog::new();
//! load_from_file(&mut loaded, "game_save.txt", &EntityRegistry::default())?;
//! ```

pub mod manager;
pub mod protocol;
pub mod tokens;
pub mod types;

// Re-export commonly used types
pub use manager::{SaveFileInfo, SaveManager};
pub use protocol::{load_from_file, read_catalog, save_to_file, write_catalog};
pub use tokens::TokenReader;
pub use types::*;
