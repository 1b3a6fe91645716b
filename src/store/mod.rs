/// Registry storage module
///
/// Holds the in-memory registry model, the mutation operations that
/// uphold its invariants, and the JSON-backed config store.

pub mod config;
pub mod models;
pub mod mutations;

pub use config::ConfigStore;
pub use models::{CommandEntry, Registry, RESERVED_NAMES};
