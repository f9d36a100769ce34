//! Unified error types for navtree.
//!
//! The tree core itself never fails on lookups: a missing page degrades to
//! a collapsed tree. Errors come from the edges: reading and parsing
//! navigation tables and host failures.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for navtree operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NavTreeError {
    /// Errors while parsing or resolving a navigation table
    #[error("Failed to load navigation table: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors raised by the host UI collaborator
    #[error("Host operation failed: {context}")]
    Host {
        context: String,
        #[source]
        source: HostErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid table structure: {0}")]
    InvalidJson(String),

    #[error("No navigation table found (expected a JSON array or `var NAME = [...]`)")]
    NoTable,

    #[error("Table '{name}' referenced but not found (searched {searched:?})")]
    UnresolvedReference { name: String, searched: PathBuf },

    #[error("Table references form a cycle: {chain}")]
    ReferenceCycle { chain: String },
}

/// Specific host error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HostErrorKind {
    #[error("Anchor element '{0}' does not exist")]
    AnchorNotFound(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for navtree operations
pub type Result<T> = std::result::Result<T, NavTreeError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl NavTreeError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for input that holds no table
    pub fn no_table(origin: impl Into<String>) -> Self {
        Self::parse(format!("in {}", origin.into()), ParseErrorKind::NoTable)
    }

    /// Create a host error with context
    pub fn host(context: impl Into<String>, source: HostErrorKind) -> Self {
        Self::Host {
            context: context.into(),
            source,
        }
    }

    /// Create a host error for a missing anchor element
    pub fn anchor_not_found(anchor: impl Into<String>) -> Self {
        let anchor = anchor.into();
        Self::host(
            "attaching tree root",
            HostErrorKind::AnchorNotFound(anchor),
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for NavTreeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for NavTreeError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are prepended to the error's existing context, so the
/// final message reads outermost-first:
///
/// ```ignore
/// use navtree::error::ErrorContext;
///
/// let table = loader
///     .load_path(path)
///     .with_context(|| format!("loading {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<NavTreeError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: NavTreeError, new_ctx: &str) -> NavTreeError {
    match err {
        NavTreeError::Parse {
            context: existing,
            source,
        } => NavTreeError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        NavTreeError::Host {
            context: existing,
            source,
        } => NavTreeError::Host {
            context: chain_context(new_ctx, &existing),
            source,
        },
        NavTreeError::Io {
            path,
            message,
            source,
        } => NavTreeError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        NavTreeError::Validation(msg) => NavTreeError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NavTreeError::no_table("modules.js");
        let display = err.to_string();
        assert!(
            display.contains("modules.js"),
            "Error message should name the origin: {display}"
        );

        let err = NavTreeError::anchor_not_found("nav-tree-contents");
        assert!(err.to_string().contains("attaching tree root"));
    }

    #[test]
    fn test_error_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = NavTreeError::io("/docs/navtree.js", io_err);

        assert!(err.to_string().contains("/docs/navtree.js"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(NavTreeError::parse("base", ParseErrorKind::NoTable))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(NavTreeError::Parse { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(NavTreeError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
