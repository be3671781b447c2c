//! Memory module - the data model of `ai_memory.json`
//!
//! - The root document with optional, lazily created sections
//! - Append-only registries (features, decisions, sessions, detailed memories)
//! - Entry types and the registry each one feeds

mod record;
mod store;

pub use record::{
    format_date, format_timestamp, split_list, DecisionRecord, EntryContext, EntryType,
    FeatureRecord, MemoryEntry, Registry, SessionRecord,
};
pub use store::{MemoryStore, SectionError, StoreStats, DEFAULT_VERSION};
