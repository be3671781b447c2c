//! Test Data Factory
//!
//! Prompt scripts and stored documents for common test cases:
//! - Answer sequences for every entry type
//! - A store written by an older version of the tool
//! - A hand-edited store with extra keys

use companion_core::EntryType;

/// Factory for creating test data
pub struct TestDataFactory;

impl TestDataFactory {
    /// Typed answers for one interactive entry: type, description, context,
    /// impact, tags
    pub fn answers(entry_type: EntryType, description: &str) -> String {
        format!(
            "{}\n{}\n{}\n{}\n{}\n",
            entry_type,
            description,
            "parser, cli",
            "Fewer support requests",
            "e2e, fixtures"
        )
    }

    /// Answers with blank required fields that must be asked again
    pub fn answers_with_blanks(entry_type: EntryType) -> String {
        format!(
            "{}\n\nRetry description\n   \nRetry context\n\nRetry impact\n\n",
            entry_type
        )
    }

    /// A store as written by the first release: no registries at all
    pub fn legacy_store() -> &'static str {
        r#"{
  "entries": [],
  "lastUpdated": "2024-01-15T10:20:30.000Z",
  "version": "1.0.0"
}
"#
    }

    /// A store edited by hand and by older tools: extra keys, JS-style
    /// millisecond timestamps, sparse rows, explicit nulls and values whose
    /// shape differs from what this tool writes
    pub fn hand_edited_store() -> serde_json::Value {
        serde_json::json!({
            "project_overview": {
                "name": "billing",
                "description": null,
                "purpose": "Internal tool",
                "current_version": 4,
                "key_technologies": ["rust", "postgres"],
                "last_updated": "2024-05-01T09:00:00.000Z",
                "owner": "payments-team"
            },
            "feature_registry": [
                {
                    "name": "PDF export",
                    "status": "completed",
                    "key_files": { "render": "src/export.rs", "fonts": "assets/" },
                    "added_in_version": "4.0.0",
                    "reviewed": true
                },
                { "name": "CSV export" }
            ],
            "decision_log": [
                { "date": "2024-01-15", "decision": "Use Postgres", "rationale": null },
                { "date": "sometime in March", "decision": "Drop SOAP API" }
            ],
            "current_development_focus": {
                "priority_features": ["Refunds"],
                "known_issues": [{ "id": 12, "title": "Rounding", "severity": 2.5 }],
                "upcoming_changes": ["Multi-currency"]
            },
            "session_history": [{ "date": "2024-04-30", "summary": "Kickoff", "key_changes": "none" }],
            "detailed_memories": [
                {
                    "timestamp": "2024-04-30T17:45:12.000Z",
                    "type": "bugfix",
                    "description": "Fix rounding",
                    "context": "see ticket 12",
                    "tags": null
                },
                { "timestamp": "2024-05-01", "type": "refactor", "description": "Split invoices module" }
            ],
            "team_notes": "Ask before touching migrations"
        })
    }
}
