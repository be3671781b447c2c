//! Memory Store - the root JSON document
//!
//! The document is schema-less: files written by older versions of the tool,
//! or edited by hand, may lack any section or hold values of any shape. The
//! store keeps the parsed object as-is and only touches the keys an operation
//! changes. Mutations create a missing (or `null`) section with its defaults
//! on first touch, and refuse to overwrite a section of the wrong shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::record::format_timestamp;

/// Version written into freshly initialized stores
pub const DEFAULT_VERSION: &str = "1.0.0";

const PROJECT_OVERVIEW: &str = "project_overview";
const DEVELOPMENT_FOCUS: &str = "current_development_focus";
const DETAILED_MEMORIES: &str = "detailed_memories";

/// A section exists but holds a value a mutation cannot extend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("section `{path}` holds {found}, expected {expected}")]
pub struct SectionError {
    /// Dotted path of the offending value, e.g. `current_development_focus.upcoming_changes`
    pub path: String,
    pub expected: &'static str,
    pub found: &'static str,
}

/// Registry sizes shown in the store summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub features: usize,
    pub decisions: usize,
    pub sessions: usize,
    pub memories: usize,
}

// ============================================================================
// MEMORY STORE
// ============================================================================

/// The whole `ai_memory.json` document
///
/// Serializes to exactly the object it was built from, keys in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    document: Map<String, Value>,
}

impl MemoryStore {
    pub fn from_document(document: Map<String, Value>) -> Self {
        Self { document }
    }

    /// Fully populated document for a freshly initialized project
    pub fn new_default(project_name: &str, now: DateTime<Utc>) -> Self {
        let mut document = Map::new();
        document.insert(
            PROJECT_OVERVIEW.into(),
            json!({
                "name": project_name,
                "description": "",
                "purpose": "",
                "current_version": DEFAULT_VERSION,
                "key_technologies": [],
                "last_updated": format_timestamp(now)
            }),
        );
        document.insert(
            "architecture".into(),
            json!({ "components": [], "data_flow": "", "key_patterns": [] }),
        );
        document.insert("code_conventions".into(), default_code_conventions());
        document.insert(
            "user_interaction_guidelines".into(),
            default_interaction_guidelines(),
        );
        document.insert("feature_registry".into(), json!([]));
        document.insert("decision_log".into(), json!([]));
        document.insert(DEVELOPMENT_FOCUS.into(), empty_focus());
        document.insert("session_history".into(), json!([]));
        document.insert(DETAILED_MEMORIES.into(), json!([]));
        document.insert("ai_guidance".into(), default_ai_guidance());
        Self { document }
    }

    // ========== Read access ==========

    /// `project_overview.name`, when it is a string
    pub fn project_name(&self) -> Option<&str> {
        self.document.get(PROJECT_OVERVIEW)?.get("name")?.as_str()
    }

    /// `project_overview.current_version`, when it is a string
    pub fn current_version(&self) -> Option<&str> {
        self.version_value()?.as_str()
    }

    /// `project_overview.current_version` rendered for display; hand-edited
    /// numeric versions such as `2` are shown as written
    pub fn version_label(&self) -> Option<String> {
        match self.version_value()? {
            Value::String(s) => Some(s.clone()),
            v @ (Value::Number(_) | Value::Bool(_)) => Some(v.to_string()),
            _ => None,
        }
    }

    fn version_value(&self) -> Option<&Value> {
        self.document.get(PROJECT_OVERVIEW)?.get("current_version")
    }

    /// Registry lengths; a missing or non-array registry counts as empty
    pub fn stats(&self) -> StoreStats {
        let count = |key: &str| {
            self.document
                .get(key)
                .and_then(Value::as_array)
                .map_or(0, Vec::len)
        };
        StoreStats {
            features: count("feature_registry"),
            decisions: count("decision_log"),
            sessions: count("session_history"),
            memories: count(DETAILED_MEMORIES),
        }
    }

    /// Top-level keys present in the document
    pub fn section_names(&self) -> Vec<String> {
        self.document.keys().cloned().collect()
    }

    /// Value of a single top-level section, if present
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.document.get(name)
    }

    // ========== Mutation ==========

    /// Set `project_overview.current_version` and stamp `last_updated`
    pub fn record_version(
        &mut self,
        version: &str,
        now: DateTime<Utc>,
    ) -> Result<(), SectionError> {
        let overview =
            object_at(&mut self.document, PROJECT_OVERVIEW, PROJECT_OVERVIEW, || json!({}))?;
        overview.insert("current_version".into(), Value::String(version.to_string()));
        overview.insert("last_updated".into(), Value::String(format_timestamp(now)));
        Ok(())
    }

    /// Add to `current_development_focus.upcoming_changes` unless an equal
    /// string is already listed. Returns true if it was added.
    pub fn add_upcoming_change(&mut self, change: &str) -> Result<bool, SectionError> {
        let focus =
            object_at(&mut self.document, DEVELOPMENT_FOCUS, DEVELOPMENT_FOCUS, empty_focus)?;
        let changes = array_at(
            focus,
            "upcoming_changes",
            "current_development_focus.upcoming_changes",
        )?;
        if changes.iter().any(|c| c.as_str() == Some(change)) {
            return Ok(false);
        }
        changes.push(Value::String(change.to_string()));
        Ok(true)
    }

    /// Check that `section` is absent, `null` or an array, so a later
    /// [`MemoryStore::append`] cannot fail
    pub fn check_appendable(&self, section: &str) -> Result<(), SectionError> {
        match self.document.get(section) {
            None | Some(Value::Null) | Some(Value::Array(_)) => Ok(()),
            Some(other) => Err(SectionError {
                path: section.to_string(),
                expected: "an array",
                found: describe(other),
            }),
        }
    }

    /// Push `row` onto the top-level array `section`. Earlier rows are not
    /// touched. Returns the new length.
    pub fn append(&mut self, section: &str, row: Value) -> Result<usize, SectionError> {
        let rows = array_at(&mut self.document, section, section)?;
        rows.push(row);
        Ok(rows.len())
    }
}

// ========== Get-or-create helpers ==========

fn slot<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
    default: impl FnOnce() -> Value,
) -> &'a mut Value {
    let value = map.entry(key.to_string()).or_insert(Value::Null);
    if value.is_null() {
        *value = default();
    }
    value
}

fn object_at<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
    path: &str,
    default: impl FnOnce() -> Value,
) -> Result<&'a mut Map<String, Value>, SectionError> {
    let value = slot(map, key, default);
    let found = describe(value);
    value.as_object_mut().ok_or_else(|| SectionError {
        path: path.to_string(),
        expected: "an object",
        found,
    })
}

fn array_at<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a mut Vec<Value>, SectionError> {
    let value = slot(map, key, || json!([]));
    let found = describe(value);
    value.as_array_mut().ok_or_else(|| SectionError {
        path: path.to_string(),
        expected: "an array",
        found,
    })
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn empty_focus() -> Value {
    json!({ "priority_features": [], "known_issues": [], "upcoming_changes": [] })
}

// ============================================================================
// DEFAULT GUIDANCE
// ============================================================================

fn default_code_conventions() -> Value {
    json!({
        "naming": {
            "files": "Follow the prevailing convention of each directory",
            "functions": "Verb-first names that describe the action",
            "types": "Nouns named after the domain concept they model"
        },
        "structure": {
            "modules": "One responsibility per module",
            "tests": "Keep tests next to the code they cover"
        },
        "documentation": {
            "public_api": "Document every exported item",
            "comments": "Explain constraints, not mechanics"
        }
    })
}

fn default_interaction_guidelines() -> Value {
    json!({
        "communication_style": "Concise and technical",
        "code_changes": "Explain the intent of a change before showing it",
        "questions": "Ask when requirements are ambiguous instead of guessing",
        "memory_updates": "Record features, decisions and sessions as they happen"
    })
}

fn default_ai_guidance() -> Value {
    json!({
        "retrieval_strategy": {
            "start_with": ["project_overview", "current_development_focus"],
            "for_features": "Search feature_registry and detailed_memories tagged 'feature'",
            "for_decisions": "Check decision_log before proposing alternatives",
            "for_history": "Use session_history for recent context"
        },
        "entry_types": [
            "feature", "decision", "session", "architecture",
            "pattern", "solution", "bugfix", "optimization"
        ],
        "update_triggers": [
            "A feature is completed",
            "A design decision is made",
            "A working session ends",
            "A non-obvious bug is fixed"
        ]
    })
}
