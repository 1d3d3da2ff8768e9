use std::fmt;

/// An error that can occur while loading a catalog.
///
/// Only the construction boundary is fallible. Once a catalog exists,
/// indexing, filtering, tree building, and statistics degrade gracefully
/// instead of erroring.
pub struct Error {
    kind: ErrorKind,
}

enum ErrorKind {
    /// The payload could not be parsed as a flat asset array.
    Json(serde_json::Error),
}

impl Error {
    /// Returns `true` if the error originated from JSON parsing.
    pub fn is_json(&self) -> bool {
        matches!(self.kind, ErrorKind::Json(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Json(err) => write!(fmt, "failed to parse catalog assets: {err}"),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Json(err) => fmt.debug_tuple("Json").field(err).finish(),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self {
            kind: ErrorKind::Json(err),
        }
    }
}
