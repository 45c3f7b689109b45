//! Persisted selection storage.
//!
//! The selection hierarchy mirrors every committed change into a
//! [`SelectionStore`] and reads it back once at startup. The store is a
//! passive key/value mirror: it never validates values, and corrupt or
//! missing entries are simply absent, never fatal.
//!
//! Two implementations are provided:
//! - [`IniSelectionStore`] persists to an INI file in the user's config
//!   directory (the production store).
//! - [`MemorySelectionStore`] keeps values in a map (tests, embedders that
//!   handle persistence themselves).

mod ini;
mod memory;

pub use ini::IniSelectionStore;
pub use memory::MemorySelectionStore;

/// Key for the last selected country.
pub const KEY_COUNTRY: &str = "country";

/// Key for the last selected dataset id.
pub const KEY_DATASET: &str = "dataset";

/// Key for the last selected route ids, comma-joined.
pub const KEY_ROUTES: &str = "routes";

/// Durable key/value mirror for the selection hierarchy.
///
/// Implementations must treat unreadable state as absent and must not fail
/// on write: persistence is best-effort, and the in-memory selection remains
/// the source of truth.
pub trait SelectionStore: Send {
    /// Read a value. Missing or corrupt entries yield `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str);

    /// Remove a value, if present.
    fn remove(&mut self, key: &str);
}
