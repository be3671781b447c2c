//! Read-only view of the store

use serde::Serialize;
use serde_json::Value;

use crate::memory::{MemoryStore, StoreStats};
use crate::storage::{Result, Storage};

/// Overview shown when no section is requested
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSummary {
    /// Top-level keys present in the document
    pub sections: Vec<String>,
    pub project_name: Option<String>,
    pub current_version: Option<String>,
    pub stats: StoreStats,
}

/// Result of a view request
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutcome {
    Summary(StoreSummary),
    Section { name: String, value: Value },
    /// The requested key is not in the document; nothing else was done
    UnknownSection {
        requested: String,
        available: Vec<String>,
    },
}

/// Load the store and show either one section or the summary
pub fn view(storage: &Storage, section: Option<&str>) -> Result<ViewOutcome> {
    let store = storage.load()?;
    Ok(summarize(&store, section))
}

/// [`view`] over an already loaded store
pub fn summarize(store: &MemoryStore, section: Option<&str>) -> ViewOutcome {
    match section {
        Some(name) => match store.section(name) {
            Some(value) => ViewOutcome::Section {
                name: name.to_string(),
                value: value.clone(),
            },
            None => ViewOutcome::UnknownSection {
                requested: name.to_string(),
                available: store.section_names(),
            },
        },
        None => ViewOutcome::Summary(StoreSummary {
            sections: store.section_names(),
            project_name: store.project_name().map(str::to_string),
            current_version: store.version_label(),
            stats: store.stats(),
        }),
    }
}
