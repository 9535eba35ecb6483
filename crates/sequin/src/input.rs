//! TOML input documents.
//!
//! An input document carries the ordered actor and signal records that a
//! diagram parser would otherwise produce:
//!
//! ```toml
//! [[actors]]
//! name = "Client"
//!
//! [[actors]]
//! name = "Session"
//! created_by_signal = true
//!
//! [[signals]]
//! from = "Client"
//! to = "Session"
//! message = "open"
//! kind = "actor_creation"
//!
//! [[signals]]
//! from = "Session"
//! to = "Client"
//! message = "ready"
//! line = "response"
//! ```
//!
//! `kind` is one of `simple`, `actor_creation` or `actor_deletion` and
//! defaults to `simple`; `line` is `request` or `response` and defaults to
//! `request`.

use log::{debug, warn};
use serde::Deserialize;

use crate::{
    LayoutIssue, SequinError,
    model::{Actor, LineType, Signal, SignalKind},
};

#[derive(Debug, Default, Deserialize)]
struct Document {
    #[serde(default)]
    actors: Vec<ActorRecord>,
    #[serde(default)]
    signals: Vec<SignalRecord>,
}

#[derive(Debug, Deserialize)]
struct ActorRecord {
    name: String,
    #[serde(default)]
    created_by_signal: bool,
}

#[derive(Debug, Deserialize)]
struct SignalRecord {
    from: String,
    to: String,
    #[serde(default)]
    message: String,
    kind: Option<String>,
    line: Option<String>,
}

/// Records read from an input document.
#[derive(Debug, Default)]
pub struct InputDocument {
    actors: Vec<Actor>,
    signals: Vec<(usize, Signal)>,
    issues: Vec<LayoutIssue>,
}

impl InputDocument {
    /// Parses a TOML input document.
    ///
    /// Signals with an unknown `kind` or `line` are skipped and reported as
    /// issues; every other signal keeps its position in the document as its
    /// index.
    ///
    /// # Errors
    ///
    /// Returns [`SequinError::Input`] if the document is not valid TOML or
    /// does not have the expected structure.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sequin::input::InputDocument;
    /// let document = InputDocument::from_toml_str(
    ///     r#"
    ///     [[actors]]
    ///     name = "A"
    ///
    ///     [[signals]]
    ///     from = "A"
    ///     to = "A"
    ///     message = "tick"
    ///     kind = "teleport"
    ///     "#,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(document.actors().len(), 1);
    /// assert!(document.signals().is_empty());
    /// assert_eq!(document.issues().len(), 1);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, SequinError> {
        let document: Document = toml::from_str(content)
            .map_err(|err| SequinError::Input(format!("failed to parse input document: {err}")))?;

        let actors = document
            .actors
            .iter()
            .map(|record| {
                if record.created_by_signal {
                    Actor::created_by_signal(&record.name)
                } else {
                    Actor::new(&record.name)
                }
            })
            .collect();

        let mut signals = Vec::with_capacity(document.signals.len());
        let mut issues = Vec::new();
        for (index, record) in document.signals.into_iter().enumerate() {
            match record.into_signal(index) {
                Ok(signal) => signals.push((index, signal)),
                Err(issue) => {
                    warn!(issue:% = issue; "Skipping input signal");
                    issues.push(issue);
                }
            }
        }

        let document = Self {
            actors,
            signals,
            issues,
        };
        debug!(
            actors_count = document.actors.len(),
            signals_count = document.signals.len();
            "Input document parsed"
        );
        Ok(document)
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Readable signals, each with its position in the document.
    pub fn signals(&self) -> &[(usize, Signal)] {
        &self.signals
    }

    /// Signals that could not be read.
    pub fn issues(&self) -> &[LayoutIssue] {
        &self.issues
    }

    pub(crate) fn into_parts(self) -> (Vec<Actor>, Vec<(usize, Signal)>, Vec<LayoutIssue>) {
        (self.actors, self.signals, self.issues)
    }
}

impl SignalRecord {
    fn into_signal(self, index: usize) -> Result<Signal, LayoutIssue> {
        let kind = match self.kind {
            Some(kind) => kind
                .parse::<SignalKind>()
                .map_err(|_| LayoutIssue::UnknownSignalKind { signal: index, kind })?,
            None => SignalKind::default(),
        };
        let line_type = match self.line {
            Some(line) => line
                .parse::<LineType>()
                .map_err(|_| LayoutIssue::UnknownLineType { signal: index, line })?,
            None => LineType::default(),
        };

        Ok(Signal::new(&self.from, &self.to, self.message)
            .with_kind(kind)
            .with_line_type(line_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_document() {
        let document = InputDocument::from_toml_str(
            r#"
            [[actors]]
            name = "Client"

            [[actors]]
            name = "Session"
            created_by_signal = true

            [[signals]]
            from = "Client"
            to = "Session"
            message = "open"
            kind = "actor_creation"

            [[signals]]
            from = "Session"
            to = "Client"
            message = "ready"
            line = "response"

            [[signals]]
            from = "Client"
            to = "Session"
            message = "close"
            kind = "actor_deletion"
            "#,
        )
        .unwrap();

        assert_eq!(document.actors().len(), 2);
        assert!(document.actors()[1].is_created_by_signal());

        let kinds: Vec<SignalKind> = document.signals().iter().map(|(_, s)| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SignalKind::ActorCreation,
                SignalKind::Simple,
                SignalKind::ActorDeletion
            ]
        );
        assert_eq!(document.signals()[1].1.line_type(), LineType::Response);
        assert_eq!(document.signals()[1].1.message(), "ready");
        assert!(document.issues().is_empty());
    }

    #[test]
    fn test_unknown_types_keep_indices() {
        let document = InputDocument::from_toml_str(
            r#"
            [[signals]]
            from = "A"
            to = "B"
            line = "sideways"

            [[signals]]
            from = "A"
            to = "B"
            message = "ok"
            "#,
        )
        .unwrap();

        assert_eq!(document.signals().len(), 1);
        assert_eq!(document.signals()[0].0, 1);
        assert_eq!(
            document.issues(),
            &[LayoutIssue::UnknownLineType {
                signal: 0,
                line: "sideways".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_document() {
        let document = InputDocument::from_toml_str("").unwrap();
        assert!(document.actors().is_empty());
        assert!(document.signals().is_empty());
    }

    #[test]
    fn test_malformed_document_is_input_error() {
        let err = InputDocument::from_toml_str("[[signals]]\nfrom = \"A\"").unwrap_err();
        assert!(matches!(err, SequinError::Input(_)));

        let err = InputDocument::from_toml_str("actors = [").unwrap_err();
        assert!(matches!(err, SequinError::Input(_)));
    }
}
