//! Version and focus updates

use chrono::{DateTime, Utc};
use tracing::info;

use crate::memory::{MemoryStore, SectionError};
use crate::storage::{Result, Storage};

/// Fields to update
///
/// Blank or whitespace-only values count as not given. Other values are
/// stored exactly as supplied, surrounding whitespace included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRequest {
    pub version: Option<String>,
    pub focus: Option<String>,
}

impl UpdateRequest {
    fn version(&self) -> Option<&str> {
        non_blank(self.version.as_deref())
    }

    fn focus(&self) -> Option<&str> {
        non_blank(self.focus.as_deref())
    }

    /// True when neither field carries a value
    pub fn is_empty(&self) -> bool {
        self.version().is_none() && self.focus().is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// What happened to the focus text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusChange {
    Added(String),
    AlreadyPresent(String),
}

/// Changes applied by [`apply_update`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateChanges {
    /// New `current_version`, if it was set
    pub version: Option<String>,
    pub focus: Option<FocusChange>,
}

impl UpdateChanges {
    /// Whether the store differs from before
    pub fn changed(&self) -> bool {
        self.version.is_some() || matches!(self.focus, Some(FocusChange::Added(_)))
    }
}

/// Result of an update request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Neither option was given; nothing was written
    NothingRequested,
    /// Options were applied; `saved` is false when nothing actually changed
    Applied { changes: UpdateChanges, saved: bool },
}

/// Apply `request` to an in-memory store
///
/// Fails without saving anything when a section to extend has the wrong shape.
pub fn apply_update(
    store: &mut MemoryStore,
    request: &UpdateRequest,
    now: DateTime<Utc>,
) -> std::result::Result<UpdateChanges, SectionError> {
    let mut changes = UpdateChanges::default();

    if let Some(version) = request.version() {
        store.record_version(version, now)?;
        changes.version = Some(version.to_string());
    }

    if let Some(focus) = request.focus() {
        let added = store.add_upcoming_change(focus)?;
        changes.focus = Some(if added {
            FocusChange::Added(focus.to_string())
        } else {
            FocusChange::AlreadyPresent(focus.to_string())
        });
    }

    Ok(changes)
}

/// Load the store, apply `request` and save when something changed
pub fn update(storage: &Storage, request: &UpdateRequest, now: DateTime<Utc>) -> Result<UpdateOutcome> {
    let mut store = storage.load()?;

    if request.is_empty() {
        return Ok(UpdateOutcome::NothingRequested);
    }

    let changes = apply_update(&mut store, request, now)?;
    let saved = changes.changed();
    if saved {
        storage.save(&store)?;
        info!("Updated memory store: {:?}", changes);
    }

    Ok(UpdateOutcome::Applied { changes, saved })
}
