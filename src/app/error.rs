use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    pub error: String,
    pub code: String,
    pub trace_id: String,
}

impl AppError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        trace_id: impl Into<String>,
    ) -> Self {
        Self {
            error: message.into(),
            code: code.into(),
            trace_id: trace_id.into(),
        }
    }

    /// The adb executable could not be located on the search path.
    pub fn adb_not_found(message: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self::new("ERR_ADB_NOT_FOUND", message, trace_id)
    }

    /// An adb invocation could not start or exited non-zero.
    pub fn execution_failed(message: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self::new("ERR_EXEC_FAILED", message, trace_id)
    }

    /// A single getprop query failed.
    pub fn property_query(message: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self::new("ERR_PROPERTY_QUERY", message, trace_id)
    }

    /// Screenshot capture failed or produced no data.
    pub fn capture_failed(message: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self::new("ERR_CAPTURE_FAILED", message, trace_id)
    }

    pub fn validation(message: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self::new("ERR_VALIDATION", message, trace_id)
    }

    pub fn system(message: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self::new("ERR_SYSTEM", message, trace_id)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.error, self.code)
    }
}

impl std::error::Error for AppError {}
