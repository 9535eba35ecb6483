//! Error types for Sequin operations.
//!
//! Two kinds of failure exist:
//!
//! - [`SequinError`] is returned by the public API for conditions that stop an
//!   operation: unreadable files, invalid configuration, malformed input
//!   documents, failed exports.
//! - [`LayoutIssue`] describes a signal or actor that could not be drawn. Issues
//!   never abort a layout; they are collected in the
//!   [`DiagramState`](crate::DiagramState) and only the offending element is
//!   dropped.

use std::io;

use thiserror::Error;

/// The main error type for Sequin operations.
#[derive(Debug, Error)]
pub enum SequinError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Export error: {0}")]
    Export(String),
}

/// A non-fatal problem found while laying out a diagram.
///
/// `signal` fields hold the zero-based position of the signal in the input
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutIssue {
    /// A signal references an actor that has no live element: it was never
    /// declared, is waiting to be created, or was already destroyed.
    #[error("signal #{signal} references unresolved actor `{actor}`")]
    UnresolvedActor { signal: usize, actor: String },

    /// An actor creation targets an actor that already has an element, or
    /// targets its own source.
    #[error("signal #{signal} creates actor `{actor}` which already exists")]
    DuplicateCreation { signal: usize, actor: String },

    /// The actor list declares the same name more than once.
    #[error("actor `{actor}` is declared more than once")]
    DuplicateActor { actor: String },

    #[error("signal #{signal} has unknown kind `{kind}`")]
    UnknownSignalKind { signal: usize, kind: String },

    #[error("signal #{signal} has unknown line type `{line}`")]
    UnknownLineType { signal: usize, line: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        let err: SequinError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, SequinError::Io(_)));
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn test_issue_messages_name_the_actor() {
        let issue = LayoutIssue::UnresolvedActor {
            signal: 3,
            actor: "Backend".to_string(),
        };
        assert_eq!(
            issue.to_string(),
            "signal #3 references unresolved actor `Backend`"
        );

        let issue = LayoutIssue::DuplicateActor {
            actor: "A".to_string(),
        };
        assert_eq!(issue.to_string(), "actor `A` is declared more than once");
    }
}
