//! Campus locations and the connections between them.
//!
//! These are read-only snapshots supplied by the campus graph provider. The
//! route engine never mutates them; administration happens elsewhere.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a campus location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(i32);

impl LocationId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a connection between two locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(i32);

impl ConnectionId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type classifier of a location, e.g. `building`, `parking` or the
/// reserved internal-connector kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationKind(String);

impl LocationKind {
    /// Kind used for waypoint-only nodes unless configured otherwise.
    pub const DEFAULT_CONNECTOR: &'static str = "internal_connector";

    /// Wrap a kind label.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for LocationKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A campus point of interest or connector node.
///
/// `x` and `y` are percentages of the campus map image and may be absent
/// for nodes that are never drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Stable identifier.
    pub id: LocationId,
    /// Display name.
    pub name: String,
    /// Horizontal map position.
    pub x: Option<f64>,
    /// Vertical map position.
    pub y: Option<f64>,
    /// Type classifier.
    pub kind: LocationKind,
}

impl Location {
    /// Build a location snapshot.
    pub fn new(
        id: LocationId,
        name: impl Into<String>,
        position: Option<(f64, f64)>,
        kind: LocationKind,
    ) -> Self {
        let (x, y) = position.map_or((None, None), |(x, y)| (Some(x), Some(y)));
        Self {
            id,
            name: name.into(),
            x,
            y,
            kind,
        }
    }
}

/// Validation errors raised by [`Connection::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConnectionValidationError {
    /// Distance was negative, NaN or infinite.
    #[error("connection {id} has invalid distance {distance}")]
    InvalidDistance {
        /// Offending connection.
        id: ConnectionId,
        /// Rejected distance.
        distance: f64,
    },
    /// Both endpoints were the same location.
    #[error("connection {id} must join two distinct locations")]
    SelfLoop {
        /// Offending connection.
        id: ConnectionId,
    },
}

/// An undirected weighted edge between two locations.
///
/// Stored with an origin and a destination, but traversable both ways.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Stable identifier.
    pub id: ConnectionId,
    /// Optional display name, e.g. a corridor or path label.
    pub name: Option<String>,
    /// Length in metres.
    pub distance: f64,
    /// Endpoint the connection was recorded from.
    pub origin: LocationId,
    /// Endpoint the connection was recorded to.
    pub destination: LocationId,
}

/// Fields required to build a [`Connection`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionDraft {
    /// Stable identifier.
    pub id: ConnectionId,
    /// Optional display name.
    pub name: Option<String>,
    /// Length in metres.
    pub distance: f64,
    /// First endpoint.
    pub origin: LocationId,
    /// Second endpoint.
    pub destination: LocationId,
}

impl Connection {
    /// Validate and build a connection.
    ///
    /// # Examples
    /// ```
    /// use campus_backend::domain::{Connection, ConnectionDraft, ConnectionId, LocationId};
    ///
    /// let connection = Connection::new(ConnectionDraft {
    ///     id: ConnectionId::new(1),
    ///     name: None,
    ///     distance: 12.5,
    ///     origin: LocationId::new(1),
    ///     destination: LocationId::new(2),
    /// })
    /// .expect("valid connection");
    /// assert_eq!(connection.other_end(LocationId::new(2)), Some(LocationId::new(1)));
    /// ```
    pub fn new(draft: ConnectionDraft) -> Result<Self, ConnectionValidationError> {
        let ConnectionDraft {
            id,
            name,
            distance,
            origin,
            destination,
        } = draft;
        if !distance.is_finite() || distance < 0.0 {
            return Err(ConnectionValidationError::InvalidDistance { id, distance });
        }
        if origin == destination {
            return Err(ConnectionValidationError::SelfLoop { id });
        }
        Ok(Self {
            id,
            name,
            distance,
            origin,
            destination,
        })
    }

    /// The endpoint opposite `from`, or `None` when `from` is not an endpoint.
    #[must_use]
    pub fn other_end(&self, from: LocationId) -> Option<LocationId> {
        if from == self.origin {
            Some(self.destination)
        } else if from == self.destination {
            Some(self.origin)
        } else {
            None
        }
    }
}
