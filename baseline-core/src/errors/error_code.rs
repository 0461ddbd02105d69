//! Stable error codes for host integrations.
//!
//! Hosts (editor plugins, dashboards) match on these strings rather than on
//! display messages, which are free to change.

/// Trait giving every subsystem error a stable machine-readable code.
pub trait BaselineErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const REGISTRY_ERROR: &str = "REGISTRY_ERROR";
pub const DETECT_ERROR: &str = "DETECT_ERROR";
