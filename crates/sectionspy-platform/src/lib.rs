//! Host service abstractions for sectionspy.
//!
//! The page controller talks to its environment only through these traits:
//! a string key-value store (the `localStorage` analogue) and the reported
//! color-scheme preference. Desktop and in-memory implementations live
//! alongside the traits.

pub mod preference;
pub mod storage;

pub use preference::{ColorSchemePreference, EnvPreference, FixedPreference};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
