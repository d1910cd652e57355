//! Structured logging utilities.
//!
//! Provides context-aware logging with session_id and case_id included
//! in every log message.

use std::fmt;

use uuid::Uuid;

/// Logging context for a UI session.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub session_id: String,
    pub case_id: Option<String>,
}

impl LogContext {
    pub fn new(session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            case_id: None,
        }
    }

    /// Fresh context with a short random session id.
    pub fn session() -> Self {
        Self::new(&format!("session-{}", &Uuid::new_v4().to_string()[..8]))
    }

    pub fn with_case(&self, case_id: &str) -> Self {
        Self {
            session_id: self.session_id.clone(),
            case_id: Some(case_id.to_string()),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.case_id {
            Some(cid) => write!(f, "[session={}] [case={}]", self.session_id, cid),
            None => write!(f, "[session={}]", self.session_id),
        }
    }
}

/// Log an info message with context.
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::info!(
            concat!("{} {}", $(" ", stringify!($key), "={:?}"),*),
            $ctx,
            $event
            $(, $value)*
        );
    };
}

/// Log a warning message with context.
#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::warn!(
            concat!("{} {}", $(" ", stringify!($key), "={:?}"),*),
            $ctx,
            $event
            $(, $value)*
        );
    };
}

/// Log an error message with context.
#[macro_export]
macro_rules! log_error {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::error!(
            concat!("{} {}", $(" ", stringify!($key), "={:?}"),*),
            $ctx,
            $event
            $(, $value)*
        );
    };
}

/// Log a debug message with context.
#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::debug!(
            concat!("{} {}", $(" ", stringify!($key), "={:?}"),*),
            $ctx,
            $event
            $(, $value)*
        );
    };
}
