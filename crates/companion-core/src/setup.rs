//! Project setup
//!
//! Creates the `.mcp` and `.cursor/rules` directories, writes a default memory
//! store when none exists and (re)writes the rules document. Running setup again
//! never touches an existing memory file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::memory::MemoryStore;
use crate::storage::{Storage, StorageError};

/// Name used when neither `package.json` nor the directory name yields one
const FALLBACK_PROJECT_NAME: &str = "project";

/// Setup error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Steps reported while setup runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    CreatingDirectories,
    InitializingMemory,
    WritingRules,
}

impl std::fmt::Display for SetupStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupStep::CreatingDirectories => write!(f, "Creating MCP directories..."),
            SetupStep::InitializingMemory => write!(f, "Initializing AI memory system..."),
            SetupStep::WritingRules => write!(f, "Setting up collaboration rules..."),
        }
    }
}

/// What setup did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupReport {
    /// Project name written into a new store (or the existing store's name)
    pub project_name: String,
    /// False when a memory file was already present and left alone
    pub memory_created: bool,
    pub memory_path: PathBuf,
    pub rules_path: PathBuf,
}

/// Run setup for `root` without progress reporting
pub fn initialize(root: &Path, now: DateTime<Utc>) -> Result<SetupReport, SetupError> {
    initialize_with_progress(root, now, |_| {})
}

/// Run setup for `root`, calling `progress` before each step
pub fn initialize_with_progress(
    root: &Path,
    now: DateTime<Utc>,
    mut progress: impl FnMut(SetupStep),
) -> Result<SetupReport, SetupError> {
    let storage = Storage::new(root);

    progress(SetupStep::CreatingDirectories);
    for dir in [storage.data_dir(), storage.rules_dir()] {
        std::fs::create_dir_all(&dir).map_err(|source| SetupError::CreateDir {
            path: dir.clone(),
            source,
        })?;
    }

    let (project_name, memory_created) = if storage.exists() {
        info!("Memory store already present, leaving it untouched");
        let name = storage
            .load()
            .ok()
            .and_then(|store| store.project_name().map(str::to_string))
            .unwrap_or_else(|| resolve_project_name(root));
        (name, false)
    } else {
        progress(SetupStep::InitializingMemory);
        let name = resolve_project_name(root);
        storage.save(&MemoryStore::new_default(&name, now))?;
        info!("Created memory store for project '{}'", name);
        (name, true)
    };

    progress(SetupStep::WritingRules);
    let rules_path = storage.rules_path();
    std::fs::write(&rules_path, RULES_TEMPLATE).map_err(|source| SetupError::WriteFile {
        path: rules_path.clone(),
        source,
    })?;

    Ok(SetupReport {
        project_name,
        memory_created,
        memory_path: storage.memory_path(),
        rules_path,
    })
}

/// Project name from `package.json`, else the directory's base name
pub fn resolve_project_name(root: &Path) -> String {
    if let Some(name) = package_json_name(root) {
        return name;
    }

    let absolute = std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    absolute
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_PROJECT_NAME)
        .to_string()
}

fn package_json_name(root: &Path) -> Option<String> {
    let content = std::fs::read_to_string(root.join("package.json")).ok()?;
    let manifest: serde_json::Value = serde_json::from_str(&content).ok()?;
    let name = manifest.get("name")?.as_str()?.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Rules document written to `.cursor/rules/companion.mdc`
pub const RULES_TEMPLATE: &str = r#"---
description: Project memory for AI-assisted development
globs:
alwaysApply: true
---

# MCP Cursor Companion

This project keeps a structured memory in `.mcp/ai_memory.json`. Read it before
making changes and keep it current as work progresses.

## Memory Sections

1. **project_overview** - name, purpose, current version and key technologies
2. **architecture** - components, data flow and key patterns
3. **code_conventions** - naming, structure and documentation conventions
4. **user_interaction_guidelines** - how to communicate with the developer
5. **feature_registry** - every completed feature and where it lives
6. **decision_log** - design decisions with rationale and impact
7. **current_development_focus** - priorities, known issues, upcoming changes
8. **session_history** - summaries of past working sessions
9. **detailed_memories** - timestamped, tagged entries of any kind
10. **ai_guidance** - hints on where to look for what

## Recording Memories

Use `mcp-companion add --interactive` to append an entry. Entry types:

- `feature` - also recorded in feature_registry
- `decision` - also recorded in decision_log
- `session` - also recorded in session_history
- `architecture`, `pattern`, `solution`, `bugfix`, `optimization`

Detailed memories are append-only. Never rewrite or delete past entries.

## Keeping Focus Current

- `mcp-companion update --version <version>` after a release
- `mcp-companion update --focus "<change>"` to note an upcoming change
- `mcp-companion memory --section <name>` to inspect a section

## Tips for Best Results

- Check decision_log before proposing an alternative design
- Tag entries consistently so they can be found again
- Summarize each session before ending it
- Review generated code before applying
"#;
