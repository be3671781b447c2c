//! Test Project Manager
//!
//! Provides isolated project directories for testing:
//! - Temporary project roots that are automatically cleaned up
//! - Initialized or bare (never set up) projects
//! - Snapshots of the raw memory file for before/after comparisons

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use companion_core::ops::{self, AddOutcome, AddRequest, AppendReport};
use companion_core::{setup, MemoryStore, Prompter, SetupReport, Storage};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tempfile::TempDir;

/// Manager for test projects
///
/// Each manager owns its own temporary directory, so tests never share a
/// memory file.
///
/// # Example
///
/// ```rust,ignore
/// let project = TestProject::initialized();
/// project.add_interactive("bugfix\nFix crash\nstartup\nStable\n\n");
/// assert_eq!(project.store().stats().memories, 1);
/// ```
pub struct TestProject {
    /// Storage bound to the project root
    pub storage: Storage,
    /// Temporary directory (kept alive to prevent premature deletion)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestProject {
    /// A project directory that has never been set up
    pub fn bare() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("sample-app");
        std::fs::create_dir(&root).expect("Failed to create project root");

        Self {
            storage: Storage::new(&root),
            _temp_dir: temp_dir,
            root,
        }
    }

    /// A project directory after a successful setup
    pub fn initialized() -> Self {
        let project = Self::bare();
        project.setup(Utc::now());
        project
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run setup at `now`, panicking on failure
    pub fn setup(&self, now: DateTime<Utc>) -> SetupReport {
        setup::initialize(&self.root, now).expect("Setup failed")
    }

    /// Load the current store, panicking on failure
    pub fn store(&self) -> MemoryStore {
        self.storage.load().expect("Failed to load store")
    }

    /// Raw contents of the memory file
    pub fn snapshot(&self) -> String {
        std::fs::read_to_string(self.storage.memory_path()).expect("Failed to read memory file")
    }

    /// The memory file parsed as plain JSON, untouched by the store model
    pub fn raw(&self) -> Value {
        serde_json::from_str(&self.snapshot()).expect("Memory file is not JSON")
    }

    /// Decode row `index` of the top-level array `section`
    pub fn row<T: DeserializeOwned>(&self, section: &str, index: usize) -> T {
        serde_json::from_value(self.raw()[section][index].clone())
            .expect("Failed to decode registry row")
    }

    /// Raw contents of the rules document
    pub fn rules(&self) -> String {
        std::fs::read_to_string(self.storage.rules_path()).expect("Failed to read rules file")
    }

    /// Write `document` pretty-printed, the way the tool itself saves
    pub fn write_store_value(&self, document: &Value) -> String {
        let raw = format!(
            "{}\n",
            serde_json::to_string_pretty(document).expect("Failed to encode store")
        );
        self.write_raw_store(&raw);
        raw
    }

    /// Write a raw memory file, creating `.mcp` if needed
    pub fn write_raw_store(&self, json: &str) {
        std::fs::create_dir_all(self.storage.data_dir()).expect("Failed to create data dir");
        std::fs::write(self.storage.memory_path(), json).expect("Failed to write memory file");
    }

    /// Run an interactive add, feeding `answers` as the typed input
    pub fn add_interactive(&self, answers: &str) -> AppendReport {
        let mut prompter = Prompter::new(answers.as_bytes(), Vec::new());
        let request = AddRequest {
            interactive: true,
            entry_type: None,
        };
        match ops::add(&self.storage, &request, &mut prompter, Utc::now()) {
            Ok(AddOutcome::Added(report)) => report,
            other => panic!("Interactive add did not append: {:?}", other),
        }
    }

    /// Number of entries in the project directory (files and folders)
    pub fn root_entry_count(&self) -> usize {
        std::fs::read_dir(&self.root)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}
