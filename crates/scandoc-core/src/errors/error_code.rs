//! ScandocErrorCode trait for structured error codes.

/// Trait for attaching a structured code string to scandoc errors.
/// Every error enum implements this so embedders can switch on a
/// stable code instead of matching display strings.
pub trait ScandocErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const RESOLVE_ERROR: &str = "RESOLVE_ERROR";
pub const CYCLIC_INHERITANCE: &str = "CYCLIC_INHERITANCE";
pub const PIPELINE_ERROR: &str = "PIPELINE_ERROR";
