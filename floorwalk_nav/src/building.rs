// Building definitions and the map database that holds them.
//
// A `BuildingDefinition` is the static geometric description of one
// building: its floors (each with a floor-plan image), the corridor
// polylines drawn on them, and the rooms, exits and stair landings placed on
// top. A `MapDatabase` is the top-level JSON document, keyed by building id:
//
//   { "buildings": { "<id>": { "floors": {...}, "rooms": [...], ... } } }
//
// The database is loaded once at process start and treated as immutable
// from then on. `MapDatabase::load` validates every building before handing
// the database out, so structural mistakes in the authoring data (dangling
// floor references, duplicate room ids, empty corridors) surface at load
// time instead of on the first request that happens to touch them.
//
// Room and exit snap positions are authoring-time data: the mapping tool
// picks the nearest corridor point when a room is placed and stores it. They
// are read as-is here and never recomputed.
//
// See also: `nav.rs` for how a definition becomes a graph, `service.rs` for
// the read-only accessor that request handlers go through.

use crate::error::{NavError, Result};
use crate::types::{FloorId, Position};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

// ---------------------------------------------------------------------------
// Definition records
// ---------------------------------------------------------------------------

/// One floor of a building.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorDef {
    /// Reference to the floor-plan image (a path or URL, opaque to this crate).
    pub image: String,
}

/// A named place a route can start or end at: a room or an exit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceDef {
    pub id: String,
    /// The marker position placed by the author.
    pub pos: Position,
    pub floor: FloorId,
    /// Nearest walkable corridor position, stored at authoring time.
    pub snap: Position,
}

/// A corridor polyline. Consecutive points are directly connected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorridorDef {
    pub floor: FloorId,
    pub points: Vec<Position>,
}

/// One landing of a stair shaft. Landings sharing an `id` on different
/// floors form a stair group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StairDef {
    pub id: String,
    pub pos: Position,
    pub floor: FloorId,
}

/// Static description of one building.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingDefinition {
    pub floors: BTreeMap<FloorId, FloorDef>,
    #[serde(default)]
    pub rooms: Vec<PlaceDef>,
    #[serde(default)]
    pub exits: Vec<PlaceDef>,
    #[serde(default)]
    pub corridors: Vec<CorridorDef>,
    #[serde(default)]
    pub stairs: Vec<StairDef>,
}

/// What a UI needs to offer route endpoints for one building.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingDirectory {
    /// Room ids in definition order, followed by exit ids.
    pub destinations: Vec<String>,
    /// Floor ids, sorted.
    pub floors: Vec<FloorId>,
}

impl BuildingDefinition {
    /// Whether `id` names a room or an exit of this building.
    pub fn has_place(&self, id: &str) -> bool {
        self.places().any(|p| p.id == id)
    }

    /// Rooms followed by exits, in definition order.
    pub fn places(&self) -> impl Iterator<Item = &PlaceDef> {
        self.rooms.iter().chain(self.exits.iter())
    }

    pub fn directory(&self) -> BuildingDirectory {
        BuildingDirectory {
            destinations: self.places().map(|p| p.id.clone()).collect(),
            floors: self.floors.keys().cloned().collect(),
        }
    }

    /// Image reference for a floor, if the floor is defined.
    pub fn floor_image(&self, floor: &FloorId) -> Option<&str> {
        self.floors.get(floor).map(|f| f.image.as_str())
    }

    /// Structural checks that don't need the graph. A floor with no
    /// corridors passes here; it only fails at graph build, and only if
    /// something has to snap onto it.
    pub fn validate(&self) -> Result<()> {
        let check_floor = |what: &str, floor: &FloorId| -> Result<()> {
            if self.floors.contains_key(floor) {
                Ok(())
            } else {
                Err(NavError::InvalidDefinition(format!(
                    "{what} references undefined floor {floor}"
                )))
            }
        };

        let mut seen = BTreeSet::new();
        for (kind, list) in [("room", &self.rooms), ("exit", &self.exits)] {
            for place in list {
                check_floor(&format!("{kind} {}", place.id), &place.floor)?;
                if !seen.insert(place.id.as_str()) {
                    return Err(NavError::InvalidDefinition(format!(
                        "duplicate room/exit id {}",
                        place.id
                    )));
                }
            }
        }

        for (i, corridor) in self.corridors.iter().enumerate() {
            check_floor(&format!("corridor #{i}"), &corridor.floor)?;
            if corridor.points.is_empty() {
                return Err(NavError::InvalidDefinition(format!(
                    "corridor #{i} on floor {} has no points",
                    corridor.floor
                )));
            }
        }

        for stair in &self.stairs {
            check_floor(&format!("stair {}", stair.id), &stair.floor)?;
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Map database
// ---------------------------------------------------------------------------

/// Every building known to the process, keyed by building id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapDatabase {
    pub buildings: BTreeMap<String, BuildingDefinition>,
}

impl MapDatabase {
    /// Read and validate a database from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse and validate a database from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let db: MapDatabase = serde_json::from_str(json)?;
        for (id, building) in &db.buildings {
            building.validate().map_err(|e| match e {
                NavError::InvalidDefinition(msg) => {
                    NavError::InvalidDefinition(format!("building {id}: {msg}"))
                }
                other => other,
            })?;
        }
        Ok(db)
    }

    pub fn building(&self, id: &str) -> Result<&BuildingDefinition> {
        self.buildings
            .get(id)
            .ok_or_else(|| NavError::UnknownBuilding(id.to_owned()))
    }

    /// Building ids, sorted.
    pub fn building_ids(&self) -> impl Iterator<Item = &str> {
        self.buildings.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const LIBRARY: &str = r#"{
        "buildings": {
            "Library": {
                "floors": {
                    "F1": { "image": "maps/Library/F1.jpeg" },
                    "F0": { "image": "maps/Library/F0.jpeg" }
                },
                "rooms": [
                    { "id": "101", "pos": [40, 60], "floor": "F0", "snap": [40, 100] },
                    { "id": "201", "pos": [40, 60], "floor": "F1", "snap": [40, 100] }
                ],
                "exits": [
                    { "id": "MAIN", "pos": [0, 100], "floor": "F0", "snap": [10, 100] }
                ],
                "corridors": [
                    { "floor": "F0", "points": [[10, 100], [40, 100], [80, 100]] },
                    { "floor": "F1", "points": [[10, 100], [40, 100], [80, 100]] }
                ],
                "stairs": [
                    { "id": "S1", "pos": [80, 120], "floor": "F0" },
                    { "id": "S1", "pos": [80, 120], "floor": "F1" }
                ]
            }
        }
    }"#;

    #[test]
    fn loads_from_json_string() {
        let db = MapDatabase::from_json(LIBRARY).unwrap();
        let lib = db.building("Library").unwrap();
        assert_eq!(lib.rooms.len(), 2);
        assert_eq!(lib.exits[0].snap, Position::new(10.0, 100.0));
        assert_eq!(lib.corridors[1].points.len(), 3);
        assert_eq!(lib.floor_image(&FloorId::from("F1")), Some("maps/Library/F1.jpeg"));
    }

    #[test]
    fn exits_and_stairs_are_optional() {
        let json = r#"{ "buildings": { "Annex": {
            "floors": { "G": { "image": "g.png" } },
            "rooms": [ { "id": "A", "pos": [0, 0], "floor": "G", "snap": [0, 5] } ],
            "corridors": [ { "floor": "G", "points": [[0, 5]] } ]
        } } }"#;
        let db = MapDatabase::from_json(json).unwrap();
        let annex = db.building("Annex").unwrap();
        assert!(annex.exits.is_empty());
        assert!(annex.stairs.is_empty());
    }

    #[test]
    fn directory_lists_rooms_then_exits_and_sorted_floors() {
        let db = MapDatabase::from_json(LIBRARY).unwrap();
        let dir = db.building("Library").unwrap().directory();
        assert_eq!(dir.destinations, vec!["101", "201", "MAIN"]);
        assert_eq!(dir.floors, vec![FloorId::from("F0"), FloorId::from("F1")]);
    }

    #[test]
    fn unknown_building_is_lookup_error() {
        let db = MapDatabase::from_json(LIBRARY).unwrap();
        let err = db.building("Gym").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }

    #[test]
    fn rejects_undefined_floor() {
        let json = LIBRARY.replace(r#""floor": "F1", "snap""#, r#""floor": "F9", "snap""#);
        let err = MapDatabase::from_json(&json).unwrap_err();
        assert!(matches!(err, NavError::InvalidDefinition(ref m) if m.contains("F9")));
    }

    #[test]
    fn rejects_duplicate_place_ids() {
        let json = LIBRARY.replace(r#""id": "MAIN""#, r#""id": "101""#);
        let err = MapDatabase::from_json(&json).unwrap_err();
        assert!(matches!(err, NavError::InvalidDefinition(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn rejects_empty_corridor() {
        let json = LIBRARY.replace(
            r#"{ "floor": "F1", "points": [[10, 100], [40, 100], [80, 100]] }"#,
            r#"{ "floor": "F1", "points": [] }"#,
        );
        let err = MapDatabase::from_json(&json).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn malformed_json_is_load_error() {
        let err =
            MapDatabase::from_json(r#"{ "buildings": { "X": { "rooms": 3 } } }"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
    }

    #[test]
    fn floor_without_corridors_passes_validation() {
        let json = LIBRARY.replace(
            r#""F0": { "image": "maps/Library/F0.jpeg" }"#,
            r#""F0": { "image": "maps/Library/F0.jpeg" }, "F2": { "image": "f2.png" }"#,
        );
        let db = MapDatabase::from_json(&json).unwrap();
        assert_eq!(db.building("Library").unwrap().floors.len(), 3);
    }
}
