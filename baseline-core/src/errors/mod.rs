//! Error handling for the detection engine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod detect_error;
pub mod error_code;
pub mod registry_error;

pub use detect_error::DetectError;
pub use error_code::BaselineErrorCode;
pub use registry_error::RegistryError;
