//! # Companion Core
//!
//! Project memory for AI-assisted development. A project keeps one JSON document,
//! `.mcp/ai_memory.json`, describing its overview, architecture, conventions,
//! features, decisions, sessions and a log of detailed memories, next to a rules
//! document at `.cursor/rules/companion.mdc` that tells the assistant how to use it.
//!
//! - **Setup**: create both files; an existing memory file is never overwritten
//! - **View**: summary counts or a single section
//! - **Update**: bump the version, add upcoming changes (no duplicates)
//! - **Add**: append a detailed memory through an interactive question sequence;
//!   feature, decision and session entries also land in their registries
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use companion_core::{setup, ops, Storage};
//!
//! let root = std::path::Path::new(".");
//! setup::initialize(root, Utc::now())?;
//!
//! let storage = Storage::new(root);
//! let request = ops::UpdateRequest {
//!     version: Some("1.1.0".to_string()),
//!     focus: Some("Add export command".to_string()),
//! };
//! ops::update(&storage, &request, Utc::now())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! There is no locking. Every operation is a full load, mutate, full save, and
//! concurrent processes writing the same store race (last save wins).

#![warn(rustdoc::missing_crate_level_docs)]

pub mod memory;
pub mod ops;
pub mod prompt;
pub mod setup;
pub mod storage;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use memory::{
    DecisionRecord, EntryType, FeatureRecord, MemoryEntry, MemoryStore, SectionError,
    SessionRecord, StoreStats,
};
pub use ops::{AddOutcome, AddRequest, UpdateOutcome, UpdateRequest, ViewOutcome};
pub use prompt::{PromptError, Prompter};
pub use setup::{SetupError, SetupReport, SetupStep};
pub use storage::{Storage, StorageError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
