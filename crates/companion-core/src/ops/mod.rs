//! Store operations
//!
//! Each operation loads the store, works on it in memory and saves it back when
//! something changed. None of them print: they return outcomes for the caller
//! to present. The pure halves (`summarize`, `apply_update`, `append_entry`)
//! work on an in-memory [`MemoryStore`](crate::memory::MemoryStore).

mod add;
mod update;
mod view;

pub use add::{add, append_entry, AddError, AddOutcome, AddRequest, AppendReport, NewEntry};
pub use update::{apply_update, update, FocusChange, UpdateChanges, UpdateOutcome, UpdateRequest};
pub use view::{summarize, view, StoreSummary, ViewOutcome};
