//! Storage abstraction for the block record
//!
//! A narrow seam: one record, loaded and saved as raw JSON text.
//! The tracker owns (de)serialization so every backend persists the exact
//! same layout. The trait is synchronous, matching the tracker.

mod error;
mod memory;
mod redb;

pub use error::StoreError;
pub use memory::MemoryStore;

pub use self::redb::RedbStore;

/// Single-record storage for the serialized [`crate::BlockState`].
///
/// Must be Clone (the tracker and tests may hold handles to the same record),
/// Send + Sync, and synchronous. Implementations share internal state, so
/// clones observe each other's writes.
pub trait BlockStore: Clone + Send + Sync + 'static {
    /// Load the stored JSON text.
    ///
    /// Returns `None` if nothing has been saved yet. Absence is a normal
    /// initial condition, not an error.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Overwrite the stored JSON text.
    ///
    /// # Invariants
    ///
    /// - Post: a following `load()` returns exactly `json`
    /// - Last write wins; there is no history
    fn save(&self, json: &str) -> Result<(), StoreError>;
}
