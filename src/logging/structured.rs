//! Structured logging utilities.
//!
//! Provides context-aware logging with the codec operation and the remote
//! record name included in every log message.

use std::fmt;

/// Logging context for a single record conversion.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub operation: String,
    pub record_name: Option<String>,
}

impl LogContext {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            record_name: None,
        }
    }

    pub fn with_record(&self, record_name: &str) -> Self {
        Self {
            operation: self.operation.clone(),
            record_name: Some(record_name.to_string()),
        }
    }

    /// Attach the record name when one is known (new records have none yet).
    pub fn with_optional_record(&self, record_name: Option<&str>) -> Self {
        match record_name {
            Some(name) => self.with_record(name),
            None => self.clone(),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.record_name {
            Some(name) => write!(f, "[op={}] [record={}]", self.operation, name),
            None => write!(f, "[op={}] [record=new]", self.operation),
        }
    }
}

/// Log an info message with context.
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::info!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*) $(, $value)*)
        );
    };
}

/// Log a warning message with context.
#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::warn!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*) $(, $value)*)
        );
    };
}

/// Log an error message with context.
#[macro_export]
macro_rules! log_error {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::error!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*) $(, $value)*)
        );
    };
}

/// Log a debug message with context.
#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::debug!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*) $(, $value)*)
        );
    };
}
