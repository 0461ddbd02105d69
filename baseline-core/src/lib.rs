//! # baseline-core
//!
//! Foundation crate for the Baseline feature-detection engine.
//! Defines the error taxonomy, configuration, and shared collection types.
//! The engine crate depends on this; nothing here depends on the engine.

pub mod config;
pub mod errors;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::DetectConfig;
pub use errors::{BaselineErrorCode, DetectError, RegistryError};
pub use types::collections::{FxHashMap, FxHashSet};
