// Test-only fixtures for floorwalk integration tests.
//
// `TestBuilding` is a small builder for `BuildingDefinition`s so scenarios
// can describe geometry in a few lines instead of JSON. `service_for()`
// wraps one building into a `NavigationService` under the id `"test"`,
// exactly as a loaded map database would be served. `brute_force_min_cost()`
// enumerates every simple path between two nodes and is the reference the
// Dijkstra results are checked against; it is exponential and only meant
// for graphs of a dozen or so nodes.
//
// See also: `tests/scenarios.rs` and `tests/optimality.rs`.

use std::sync::Arc;

use floorwalk_nav::building::{CorridorDef, FloorDef, PlaceDef, StairDef};
use floorwalk_nav::nav::NavGraph;
use floorwalk_nav::types::{FloorId, NavNodeId, Position};
use floorwalk_nav::{BuildingDefinition, MapDatabase, NavConfig, NavigationService};

/// Building id used by `service_for()`.
pub const TEST_BUILDING: &str = "test";

/// Fluent builder for building definitions.
#[derive(Default)]
pub struct TestBuilding {
    def: BuildingDefinition,
}

fn pos((x, y): (f64, f64)) -> Position {
    Position::new(x, y)
}

impl TestBuilding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn floor(mut self, id: &str) -> Self {
        self.def.floors.insert(
            FloorId::from(id),
            FloorDef {
                image: format!("maps/{id}.jpeg"),
            },
        );
        self
    }

    pub fn corridor(mut self, floor: &str, points: &[(f64, f64)]) -> Self {
        self.def.corridors.push(CorridorDef {
            floor: FloorId::from(floor),
            points: points.iter().copied().map(pos).collect(),
        });
        self
    }

    pub fn room(mut self, id: &str, floor: &str, at: (f64, f64), snap: (f64, f64)) -> Self {
        self.def.rooms.push(place(id, floor, at, snap));
        self
    }

    pub fn exit(mut self, id: &str, floor: &str, at: (f64, f64), snap: (f64, f64)) -> Self {
        self.def.exits.push(place(id, floor, at, snap));
        self
    }

    pub fn stair(mut self, id: &str, floor: &str, at: (f64, f64)) -> Self {
        self.def.stairs.push(StairDef {
            id: id.to_owned(),
            pos: pos(at),
            floor: FloorId::from(floor),
        });
        self
    }

    pub fn build(self) -> BuildingDefinition {
        self.def
    }
}

fn place(id: &str, floor: &str, at: (f64, f64), snap: (f64, f64)) -> PlaceDef {
    PlaceDef {
        id: id.to_owned(),
        pos: pos(at),
        floor: FloorId::from(floor),
        snap: pos(snap),
    }
}

/// Serve a single building under `TEST_BUILDING` with the default config.
pub fn service_for(building: BuildingDefinition) -> NavigationService {
    let mut db = MapDatabase::default();
    db.buildings.insert(TEST_BUILDING.to_owned(), building);
    NavigationService::new(Arc::new(db), NavConfig::default())
}

/// Two floors, each with a straight three-point corridor along y = 100, one
/// room above the corridor midpoint, and one landing of stair `S1` below it.
///
/// Segment lengths: room → snap 30, snap → midpoint 10, midpoint → landing
/// 30, on both floors.
pub fn two_floor_building() -> BuildingDefinition {
    TestBuilding::new()
        .floor("F0")
        .floor("F1")
        .corridor("F0", &[(0.0, 100.0), (50.0, 100.0), (100.0, 100.0)])
        .corridor("F1", &[(0.0, 100.0), (50.0, 100.0), (100.0, 100.0)])
        .room("R0", "F0", (50.0, 60.0), (50.0, 90.0))
        .room("R1", "F1", (50.0, 60.0), (50.0, 90.0))
        .stair("S1", "F0", (50.0, 130.0))
        .stair("S1", "F1", (50.0, 130.0))
        .build()
}

/// Cheapest simple path cost from `from` to `to` by exhaustive enumeration,
/// or `None` if no path exists.
pub fn brute_force_min_cost(graph: &NavGraph, from: NavNodeId, to: NavNodeId) -> Option<f64> {
    fn walk(
        graph: &NavGraph,
        at: NavNodeId,
        to: NavNodeId,
        cost: f64,
        visited: &mut Vec<bool>,
        best: &mut Option<f64>,
    ) {
        if at == to {
            if best.is_none_or(|b| cost < b) {
                *best = Some(cost);
            }
            return;
        }
        for &idx in graph.neighbors(at) {
            let edge = graph.edge(idx);
            let next = edge.to.0 as usize;
            if visited[next] {
                continue;
            }
            visited[next] = true;
            walk(graph, edge.to, to, cost + edge.cost, visited, best);
            visited[next] = false;
        }
    }

    let mut visited = vec![false; graph.node_count()];
    visited[from.0 as usize] = true;
    let mut best = None;
    walk(graph, from, to, 0.0, &mut visited, &mut best);
    best
}
