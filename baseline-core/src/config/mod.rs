//! Configuration for the detection engine.
//! TOML-compatible, all fields optional with `effective_*` defaults.

pub mod detect_config;

pub use detect_config::DetectConfig;
