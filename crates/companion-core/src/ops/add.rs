//! Appending detailed memories
//!
//! Entries are only ever appended. Feature, decision and session entries also
//! append a companion record to their registry in the same save.

use std::io::{BufRead, Write};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::memory::{
    format_date, format_timestamp, split_list, DecisionRecord, EntryContext, EntryType,
    FeatureRecord, MemoryEntry, MemoryStore, Registry, SessionRecord, DEFAULT_VERSION,
};
use crate::prompt::{collect_entry, PromptError, Prompter};
use crate::storage::{Storage, StorageError};

const DETAILED_MEMORIES: &str = "detailed_memories";

/// Status given to features recorded through an entry
const FEATURE_STATUS: &str = "completed";

/// Answers gathered for one new entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub entry_type: EntryType,
    pub description: String,
    /// Free text; for sessions it doubles as a comma-separated change list
    pub context: String,
    pub impact: String,
    pub tags: Vec<String>,
}

/// How `add` was invoked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddRequest {
    pub interactive: bool,
    pub entry_type: Option<String>,
}

/// What [`append_entry`] wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendReport {
    pub entry_type: EntryType,
    /// Registry that also received a record
    pub registry: Option<Registry>,
    /// Length of `detailed_memories` after the append
    pub total_memories: usize,
}

/// Result of an add request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(AppendReport),
    /// Non-interactive mode is not implemented; nothing was written
    Unsupported {
        requested: String,
        known_type: bool,
    },
    /// No mode given; nothing was written
    Usage,
}

/// Add error type
#[derive(Debug, thiserror::Error)]
pub enum AddError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Append `entry` to `detailed_memories` and its companion registry
///
/// Both target sections are checked before anything is pushed, so on error
/// the store is unchanged. Existing rows are never rewritten.
pub fn append_entry(
    store: &mut MemoryStore,
    entry: NewEntry,
    now: DateTime<Utc>,
) -> crate::storage::Result<AppendReport> {
    let entry_type = entry.entry_type;
    let registry = entry_type.registry();

    store.check_appendable(DETAILED_MEMORIES)?;
    if let Some(registry) = registry {
        store.check_appendable(registry.section())?;
    }

    let record = match registry {
        Some(Registry::Features) => Some(serde_json::to_value(FeatureRecord {
            name: entry.description.clone(),
            status: FEATURE_STATUS.to_string(),
            description: entry.context.clone(),
            added_in_version: store
                .version_label()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            ..Default::default()
        })?),
        Some(Registry::Decisions) => Some(serde_json::to_value(DecisionRecord {
            date: format_date(now),
            decision: entry.description.clone(),
            rationale: entry.context.clone(),
            impact: entry.impact.clone(),
            ..Default::default()
        })?),
        Some(Registry::Sessions) => Some(serde_json::to_value(SessionRecord {
            date: format_date(now),
            summary: entry.description.clone(),
            key_changes: split_list(&entry.context),
        })?),
        None => None,
    };

    let row = serde_json::to_value(MemoryEntry {
        timestamp: format_timestamp(now),
        entry_type: entry_type.as_str().to_string(),
        description: entry.description,
        context: EntryContext {
            description: entry.context,
            files: Vec::new(),
        },
        impact: entry.impact,
        tags: entry.tags,
    })?;
    let total_memories = store.append(DETAILED_MEMORIES, row)?;

    if let (Some(registry), Some(record)) = (registry, record) {
        store.append(registry.section(), record)?;
    }

    Ok(AppendReport {
        entry_type,
        registry,
        total_memories,
    })
}

/// Load the store and handle an add request
///
/// The store is loaded before the mode is looked at, so a missing store is
/// reported whatever options were given.
pub fn add<R: BufRead, W: Write>(
    storage: &Storage,
    request: &AddRequest,
    prompter: &mut Prompter<R, W>,
    now: DateTime<Utc>,
) -> Result<AddOutcome, AddError> {
    let mut store = storage.load()?;

    if !request.interactive {
        return Ok(match &request.entry_type {
            Some(requested) => AddOutcome::Unsupported {
                requested: requested.clone(),
                known_type: requested.parse::<EntryType>().is_ok(),
            },
            None => AddOutcome::Usage,
        });
    }

    let entry = collect_entry(prompter)?;
    let report = append_entry(&mut store, entry, now)?;
    storage.save(&store)?;
    info!(
        "Appended {} memory ({} total)",
        report.entry_type, report.total_memories
    );

    Ok(AddOutcome::Added(report))
}
