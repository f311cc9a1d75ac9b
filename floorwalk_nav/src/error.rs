// Error type for building loading, graph construction and navigation.
//
// Every failure the crate can report is a `NavError` variant. `kind()`
// sorts them into three families so callers can branch without matching
// each variant:
// - `Lookup`: a building or location id the caller asked for doesn't exist.
// - `Configuration`: the building data itself is inconsistent (a room on a
//   floor with no corridors, a node id collision, a dangling floor ref) or
//   the navigation config holds an unusable value.
// - `Load`: the definition or config file couldn't be read or parsed.
//
// "No route between two connected-looking locations" is deliberately not an
// error: the service returns an empty `RouteResponse` instead.

use crate::types::FloorId;
use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a `NavError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Lookup,
    Configuration,
    Load,
}

#[derive(Error, Debug)]
pub enum NavError {
    #[error("unknown building: {0}")]
    UnknownBuilding(String),

    #[error("unknown location '{location}' in building '{building}'")]
    UnknownLocation { building: String, location: String },

    #[error("{entity} on floor {floor} has no corridor node to snap to")]
    NoCorridorOnFloor { entity: String, floor: FloorId },

    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("invalid building definition: {0}")]
    InvalidDefinition(String),

    #[error("invalid navigation config: {0}")]
    InvalidConfig(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl NavError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NavError::UnknownBuilding(_) | NavError::UnknownLocation { .. } => ErrorKind::Lookup,
            NavError::NoCorridorOnFloor { .. }
            | NavError::DuplicateNode(_)
            | NavError::InvalidDefinition(_)
            | NavError::InvalidConfig(_) => ErrorKind::Configuration,
            NavError::Io { .. } | NavError::Json(_) => ErrorKind::Load,
        }
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
