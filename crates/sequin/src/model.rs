//! Input records of a sequence diagram.
//!
//! A diagram is an ordered list of [`Actor`]s and an ordered list of
//! [`Signal`]s exchanged between them. Order defines reading order: actors are
//! laid out left to right and signals top to bottom.
//!
//! # Example
//!
//! ```
//! # use sequin::model::{Actor, LineType, Signal, SignalKind};
//! let actors = vec![Actor::new("Client"), Actor::new("Server")];
//! let signals = vec![
//!     Signal::new("Client", "Server", "GET /"),
//!     Signal::new("Server", "Client", "200 OK").with_line_type(LineType::Response),
//! ];
//!
//! assert_eq!(signals[1].kind(), SignalKind::Simple);
//! assert!(!signals[1].is_self());
//! ```

use std::{fmt, str::FromStr};

use sequin_core::identifier::Id;

/// A diagram participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    name: Id,
    created_by_signal: bool,
    destroyed: bool,
}

impl Actor {
    /// Creates an actor that exists from the top of the diagram.
    pub fn new(name: &str) -> Self {
        Self {
            name: Id::new(name),
            created_by_signal: false,
            destroyed: false,
        }
    }

    /// Creates an actor that only appears once an
    /// [`ActorCreation`](SignalKind::ActorCreation) signal creates it.
    pub fn created_by_signal(name: &str) -> Self {
        Self {
            created_by_signal: true,
            ..Self::new(name)
        }
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn is_created_by_signal(&self) -> bool {
        self.created_by_signal
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.destroyed = true;
    }
}

/// What a signal does besides carrying its message.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// A plain message.
    #[default]
    Simple,
    /// The message creates its destination actor.
    ActorCreation,
    /// The message destroys its destination actor.
    ActorDeletion,
}

impl SignalKind {
    /// Returns the name used by input documents.
    pub fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::ActorCreation => "actor_creation",
            Self::ActorDeletion => "actor_deletion",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Self::Simple),
            "actor_creation" => Ok(Self::ActorCreation),
            "actor_deletion" => Ok(Self::ActorDeletion),
            _ => Err(format!("unknown signal kind `{s}`")),
        }
    }
}

/// Call or return semantics of a signal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineType {
    /// Call direction, drawn solid.
    #[default]
    Request,
    /// Return direction, drawn dashed.
    Response,
}

impl LineType {
    /// Returns the name used by input documents.
    pub fn name(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Response => "response",
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LineType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "request" => Ok(Self::Request),
            "response" => Ok(Self::Response),
            _ => Err(format!("unknown line type `{s}`")),
        }
    }
}

/// A message from `actor_a` to `actor_b`.
///
/// When both names are equal the signal is a self-signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    actor_a: Id,
    actor_b: Id,
    message: String,
    kind: SignalKind,
    line_type: LineType,
}

impl Signal {
    /// Creates a [`SignalKind::Simple`] request.
    pub fn new(actor_a: &str, actor_b: &str, message: impl Into<String>) -> Self {
        Self {
            actor_a: Id::new(actor_a),
            actor_b: Id::new(actor_b),
            message: message.into(),
            kind: SignalKind::default(),
            line_type: LineType::default(),
        }
    }

    pub fn with_kind(mut self, kind: SignalKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_line_type(mut self, line_type: LineType) -> Self {
        self.line_type = line_type;
        self
    }

    /// Source actor name.
    pub fn actor_a(&self) -> Id {
        self.actor_a
    }

    /// Destination actor name.
    pub fn actor_b(&self) -> Id {
        self.actor_b
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    pub fn line_type(&self) -> LineType {
        self.line_type
    }

    /// Returns `true` if the signal starts and ends at the same actor.
    pub fn is_self(&self) -> bool {
        self.actor_a == self.actor_b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_constructors() {
        let actor = Actor::new("A");
        assert_eq!(actor.name(), "A");
        assert!(!actor.is_created_by_signal());
        assert!(!actor.is_destroyed());

        let created = Actor::created_by_signal("C");
        assert!(created.is_created_by_signal());
        assert!(!created.is_destroyed());
    }

    #[test]
    fn test_signal_defaults() {
        let signal = Signal::new("A", "B", "hello");
        assert_eq!(signal.kind(), SignalKind::Simple);
        assert_eq!(signal.line_type(), LineType::Request);
        assert_eq!(signal.message(), "hello");
        assert!(!signal.is_self());
        assert!(Signal::new("A", "A", "loop").is_self());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("simple".parse(), Ok(SignalKind::Simple));
        assert_eq!("actor_creation".parse(), Ok(SignalKind::ActorCreation));
        assert_eq!("actor_deletion".parse(), Ok(SignalKind::ActorDeletion));
        assert!("delete".parse::<SignalKind>().is_err());
    }

    #[test]
    fn test_line_type_from_str() {
        assert_eq!("request".parse(), Ok(LineType::Request));
        assert_eq!("response".parse(), Ok(LineType::Response));
        assert!("Response".parse::<LineType>().is_err());
    }

    #[test]
    fn test_display_matches_document_names() {
        for kind in [
            SignalKind::Simple,
            SignalKind::ActorCreation,
            SignalKind::ActorDeletion,
        ] {
            assert_eq!(kind.to_string().parse(), Ok(kind));
        }
        assert_eq!(LineType::Response.to_string(), "response");
    }
}
