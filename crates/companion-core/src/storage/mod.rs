//! Storage Module
//!
//! JSON file storage for the memory document:
//! - Fixed project layout (`.mcp/ai_memory.json`, `.cursor/rules/companion.mdc`)
//! - Whole-file load and pretty-printed save, no caching between calls

mod json;

pub use json::{
    Result, Storage, StorageError, DATA_DIR, MEMORY_FILE, RULES_DIR, RULES_FILE,
};
