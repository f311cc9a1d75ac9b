// Core types shared across the crate.
//
// Defines the image-space coordinate (`Position`), the floor identifier
// (`FloorId`), and the compact graph identifiers (`NavNodeId`, `NavEdgeId`).
// All types derive `Serialize` and `Deserialize` so they can appear directly
// in building definitions and route responses.
//
// Coordinates live in floor-plan image pixel space: origin at the top-left
// corner, x to the right, y increasing downward. Consumers that draw on a
// y-up canvas must flip y and apply the image's display scale themselves.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A 2D point on a floor-plan image, in pixels.
///
/// Serialized as a two-element array `[x, y]`, which is how building
/// definitions store every `pos`, `snap` and corridor point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance between two positions.
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Position> for [f64; 2] {
    fn from(p: Position) -> Self {
        [p.x, p.y]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Floors
// ---------------------------------------------------------------------------

/// Identifier of one floor of a building, e.g. `"F0"`.
///
/// Ordered lexicographically. Ordering is only used for listing floors and
/// for chaining stair landings; it has no effect on route cost.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorId(pub String);

impl FloorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FloorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FloorId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Nav graph IDs — simple integers, assigned in creation order.
// ---------------------------------------------------------------------------

/// Compact identifier for a navigation graph node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NavNodeId(pub u32);

/// Compact identifier for a navigation graph edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NavEdgeId(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_serializes_as_pair() {
        let p = Position::new(12.0, 40.5);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "[12.0,40.5]");
        let back: Position = serde_json::from_str("[3, 4]").unwrap();
        assert_eq!(back, Position::new(3.0, 4.0));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn floor_ids_order_lexicographically() {
        let mut floors = vec![FloorId::from("F2"), FloorId::from("F0"), FloorId::from("F1")];
        floors.sort();
        assert_eq!(floors, vec![FloorId::from("F0"), FloorId::from("F1"), FloorId::from("F2")]);
    }
}
