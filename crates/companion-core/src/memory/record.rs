//! Registry records - the append-only rows of the memory document
//!
//! These types build the rows this tool appends. Rows already in a store are
//! never decoded into them: they stay raw JSON so hand-edited values come back
//! out exactly as they went in.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// `2024-01-15T10:20:30.000Z`, the form every stored timestamp takes
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// UTC calendar date of `now`, as `YYYY-MM-DD`
pub fn format_date(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}

// ============================================================================
// ENTRY TYPES
// ============================================================================

/// Kind of a detailed memory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// A shipped feature (also recorded in `feature_registry`)
    Feature,
    /// An architectural or product decision (also recorded in `decision_log`)
    Decision,
    /// A working session summary (also recorded in `session_history`)
    Session,
    /// A change to the system's structure
    Architecture,
    /// A recurring code pattern
    Pattern,
    /// A solution to a problem worth remembering
    Solution,
    /// A fixed defect
    Bugfix,
    /// A performance or resource improvement
    Optimization,
}

/// Secondary registry fed by an entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registry {
    Features,
    Decisions,
    Sessions,
}

impl EntryType {
    /// All entry types, in prompt order
    pub const ALL: [EntryType; 8] = [
        EntryType::Feature,
        EntryType::Decision,
        EntryType::Session,
        EntryType::Architecture,
        EntryType::Pattern,
        EntryType::Solution,
        EntryType::Bugfix,
        EntryType::Optimization,
    ];

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Feature => "feature",
            EntryType::Decision => "decision",
            EntryType::Session => "session",
            EntryType::Architecture => "architecture",
            EntryType::Pattern => "pattern",
            EntryType::Solution => "solution",
            EntryType::Bugfix => "bugfix",
            EntryType::Optimization => "optimization",
        }
    }

    /// Registry that must receive a companion record, if any
    pub fn registry(&self) -> Option<Registry> {
        match self {
            EntryType::Feature => Some(Registry::Features),
            EntryType::Decision => Some(Registry::Decisions),
            EntryType::Session => Some(Registry::Sessions),
            _ => None,
        }
    }
}

impl Registry {
    /// Top-level key of the registry in the memory document
    pub fn section(&self) -> &'static str {
        match self {
            Registry::Features => "feature_registry",
            Registry::Decisions => "decision_log",
            Registry::Sessions => "session_history",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        EntryType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| format!("Unknown entry type: {}", s))
    }
}

// ============================================================================
// DETAILED MEMORIES
// ============================================================================

/// Context attached to a detailed memory entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryContext {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub files: Vec<String>,
}

/// One element of `detailed_memories`
///
/// The type is kept as a string, matching what other tools may have written;
/// use [`MemoryEntry::kind`] for the parsed form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    #[serde(default)]
    pub timestamp: String,
    #[serde(rename = "type", default)]
    pub entry_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub context: EntryContext,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl MemoryEntry {
    /// Parsed entry type, `None` when the stored string is not one we know
    pub fn kind(&self) -> Option<EntryType> {
        self.entry_type.parse().ok()
    }
}

// ============================================================================
// SECONDARY REGISTRIES
// ============================================================================

/// One element of `feature_registry`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub key_files: Vec<String>,
    #[serde(default)]
    pub implementation_details: String,
    #[serde(default)]
    pub usage_example: String,
    #[serde(default)]
    pub added_in_version: String,
}

/// One element of `decision_log`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub decision: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub alternatives_considered: Vec<String>,
    #[serde(default)]
    pub impact: String,
}

/// One element of `session_history`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_changes: Vec<String>,
}

/// Split a comma-separated list, trimming items and dropping empty ones
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
