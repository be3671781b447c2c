//! JSON Storage Implementation
//!
//! Every operation reads the full file and writes the full file back. There is
//! no locking: two processes saving the same store race and the last write wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::memory::{MemoryStore, SectionError};

/// Directory holding the memory file, relative to the project root
pub const DATA_DIR: &str = ".mcp";
/// Memory file name inside [`DATA_DIR`]
pub const MEMORY_FILE: &str = "ai_memory.json";
/// Directory holding the rules document, relative to the project root
pub const RULES_DIR: &str = ".cursor/rules";
/// Rules document name inside [`RULES_DIR`]
pub const RULES_FILE: &str = "companion.mdc";

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Storage error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The memory file does not exist yet
    #[error("Memory store not found at {}", .0.display())]
    MissingStore(PathBuf),
    /// The memory file exists but does not parse as JSON
    #[error("Memory store at {} is not valid JSON: {source}", path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The memory file is valid JSON, but its top level is not an object
    #[error("Memory store at {} must hold a JSON object at the top level", .0.display())]
    NotAnObject(PathBuf),
    /// A section the operation has to extend holds the wrong kind of value
    #[error("Memory store cannot be updated: {0}")]
    Section(#[from] SectionError),
    /// Reading or writing the file failed
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The in-memory document could not be encoded
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Storage result type
pub type Result<T> = std::result::Result<T, StorageError>;

// ============================================================================
// STORAGE
// ============================================================================

/// Handle on the memory files of one project directory
///
/// Creating a `Storage` touches nothing on disk; only [`Storage::save`] writes.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    pub fn rules_dir(&self) -> PathBuf {
        self.root.join(RULES_DIR)
    }

    pub fn memory_path(&self) -> PathBuf {
        self.data_dir().join(MEMORY_FILE)
    }

    pub fn rules_path(&self) -> PathBuf {
        self.rules_dir().join(RULES_FILE)
    }

    /// Whether the memory file has been created
    pub fn exists(&self) -> bool {
        self.memory_path().is_file()
    }

    /// Read and parse the memory file
    ///
    /// Any JSON object loads, whatever shape its sections take.
    pub fn load(&self) -> Result<MemoryStore> {
        let path = self.memory_path();
        debug!("Loading memory store from {}", path.display());

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::MissingStore(path));
            }
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        let document: Value = match serde_json::from_str(&content) {
            Ok(document) => document,
            Err(source) => return Err(StorageError::CorruptStore { path, source }),
        };
        match document {
            Value::Object(map) => Ok(MemoryStore::from_document(map)),
            _ => Err(StorageError::NotAnObject(path)),
        }
    }

    /// Overwrite the memory file with the pretty-printed store
    pub fn save(&self, store: &MemoryStore) -> Result<()> {
        let path = self.memory_path();
        let mut json = serde_json::to_string_pretty(store)?;
        json.push('\n');

        std::fs::write(&path, json).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        debug!("Saved memory store to {}", path.display());
        Ok(())
    }
}
