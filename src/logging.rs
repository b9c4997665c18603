//! Pluggable debug logging.
//!
//! Clients accept any [`Logger`] implementation. Every severity method has a
//! default no-op body, so a sink that only cares about errors can implement
//! [`Logger::error`] alone and every other level is silently skipped.
//!
//! When no logger is configured, [`TracingLogger`] forwards messages to the
//! `tracing` macros so an application subscriber picks them up.
//!
//! # Example
//!
//! ```rust
//! use drupal_api_client::Logger;
//! use std::sync::Mutex;
//!
//! #[derive(Default)]
//! struct ErrorsOnly(Mutex<Vec<String>>);
//!
//! impl Logger for ErrorsOnly {
//!     fn error(&self, message: &str) {
//!         self.0.lock().unwrap().push(message.to_string());
//!     }
//! }
//!
//! let logger = ErrorsOnly::default();
//! logger.warn("ignored");
//! logger.error("kept");
//! assert_eq!(logger.0.lock().unwrap().len(), 1);
//! ```

use std::fmt;
use std::sync::Arc;

/// Log severity levels, from most to least severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogLevel {
    /// Failures.
    Error,
    /// Recoverable problems.
    Warn,
    /// Notable events.
    Info,
    /// HTTP traffic.
    Http,
    /// Step-by-step progress (cache checks, endpoint fetches).
    Verbose,
    /// Diagnostic detail.
    Debug,
    /// Everything else.
    Silly,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Http => "http",
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Silly => "silly",
        };
        f.write_str(name)
    }
}

/// A log sink with one method per severity.
///
/// All methods default to doing nothing.
pub trait Logger: Send + Sync {
    /// Logs at error level.
    fn error(&self, _message: &str) {}
    /// Logs at warn level.
    fn warn(&self, _message: &str) {}
    /// Logs at info level.
    fn info(&self, _message: &str) {}
    /// Logs at http level.
    fn http(&self, _message: &str) {}
    /// Logs at verbose level.
    fn verbose(&self, _message: &str) {}
    /// Logs at debug level.
    fn debug(&self, _message: &str) {}
    /// Logs at silly level.
    fn silly(&self, _message: &str) {}

    /// Dispatches a message to the method matching `level`.
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => self.error(message),
            LogLevel::Warn => self.warn(message),
            LogLevel::Info => self.info(message),
            LogLevel::Http => self.http(message),
            LogLevel::Verbose => self.verbose(message),
            LogLevel::Debug => self.debug(message),
            LogLevel::Silly => self.silly(message),
        }
    }
}

/// Default logger that forwards every level to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn http(&self, message: &str) {
        tracing::info!(target: "drupal_api_client::http", "{message}");
    }

    fn verbose(&self, message: &str) {
        tracing::debug!("{message}");
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{message}");
    }

    fn silly(&self, message: &str) {
        tracing::trace!("{message}");
    }
}

/// A logger gated by the client's debug flag.
///
/// Messages are only forwarded to the sink when debug is enabled.
#[derive(Clone)]
pub struct DebugLog {
    logger: Arc<dyn Logger>,
    enabled: bool,
}

impl DebugLog {
    /// Creates a new gated logger.
    #[must_use]
    pub fn new(logger: Arc<dyn Logger>, enabled: bool) -> Self {
        Self { logger, enabled }
    }

    /// Returns whether debug logging is enabled.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Logs `message` at `level` if debug is enabled.
    pub fn log(&self, level: LogLevel, message: &str) {
        if self.enabled {
            self.logger.log(level, message);
        }
    }
}

impl Default for DebugLog {
    fn default() -> Self {
        Self::new(Arc::new(TracingLogger), false)
    }
}

impl fmt::Debug for DebugLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugLog")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
