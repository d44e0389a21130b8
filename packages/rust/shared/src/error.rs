//! Error types for the Victory.css build.
//!
//! Library crates use [`VictoryError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all build operations.
#[derive(Debug, thiserror::Error)]
pub enum VictoryError {
    /// Build configuration or package descriptor could not be loaded.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Sass compilation failed.
    #[error("style compilation failed for {path:?}: {message}")]
    Compile { path: PathBuf, message: String },

    /// A prefixing or minification tool rejected its input.
    #[error("{tool} failed: {message}")]
    Tool { tool: &'static str, message: String },

    /// Unknown task name or malformed task graph.
    #[error("task error: {message}")]
    Task { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, VictoryError>;

impl VictoryError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a compile error for the given style entry point.
    pub fn compile(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Compile {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a tool error attributed to `tool`.
    pub fn tool(tool: &'static str, msg: impl Into<String>) -> Self {
        Self::Tool {
            tool,
            message: msg.into(),
        }
    }

    /// Create a task error from any displayable message.
    pub fn task(msg: impl Into<String>) -> Self {
        Self::Task {
            message: msg.into(),
        }
    }
}
