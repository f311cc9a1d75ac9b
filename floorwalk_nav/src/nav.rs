// Navigation graph for indoor routing.
//
// The nav graph is a set of `NavNode`s (labelled positions on a floor)
// connected by `NavEdge`s (typed, weighted connections). It is built from a
// `BuildingDefinition` by `build_nav_graph()` and searched by
// `pathfinding.rs`.
//
// Storage uses `Vec` indexed by `NavNodeId`/`NavEdgeId` for O(1) lookup and
// deterministic iteration order. The only hash map is the label index used
// to resolve a node id string (e.g. `"101_SNAP"`) to its `NavNodeId`; it is
// never iterated.
//
// A graph is built fresh for every navigation request and dropped after it.
// Nothing here is cached or shared between requests.
//
// See also: `building.rs` for the definition records, `pathfinding.rs` for
// the search, `route.rs` for turning a node path into per-floor polylines.
//
// **Critical constraint: determinism.** Node ids are sequential integers
// assigned in a fixed order (corridors, rooms, exits, stairs), and node
// labels follow a fixed naming scheme, so the same definition always yields
// the same graph.

use crate::building::{BuildingDefinition, PlaceDef};
use crate::config::NavConfig;
use crate::error::{NavError, Result};
use crate::types::{FloorId, NavEdgeId, NavNodeId, Position};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use tracing::debug;

/// Suffix appended to a room or exit id to name its snap node.
pub const SNAP_SUFFIX: &str = "_SNAP";

/// What a node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    CorridorPoint,
    Room,
    RoomSnap,
    Exit,
    ExitSnap,
    StairLanding,
}

/// A node in the navigation graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NavNode {
    pub id: NavNodeId,
    /// Building-unique label, e.g. `C12`, `101`, `101_SNAP`, `S1_F0`.
    pub label: String,
    pub floor: FloorId,
    pub position: Position,
    pub kind: NodeKind,
    /// Indices into `NavGraph.edges` for edges that originate from this node.
    pub edge_indices: SmallVec<[usize; 4]>,
}

/// The type of connection between two nav nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeType {
    /// Consecutive points of one corridor polyline.
    CorridorSegment,
    /// Corridor points of different polylines (or non-adjacent points of the
    /// same one) within the corridor snap distance.
    CorridorJunction,
    /// Room or exit marker to its snap point.
    PlaceToSnap,
    /// Snap point or stair landing to its nearest corridor point.
    SnapToCorridor,
    /// Adjacent landings of one stair group.
    StairFlight,
}

/// A directed edge in the navigation graph. Every edge is stored together
/// with its reverse twin at the neighbouring index.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NavEdge {
    pub id: NavEdgeId,
    pub from: NavNodeId,
    pub to: NavNodeId,
    pub edge_type: EdgeType,
    /// Traversal weight: pixel distance on a floor, or the floor change cost.
    pub cost: f64,
}

/// The navigation graph container.
#[derive(Clone, Debug, Default)]
pub struct NavGraph {
    pub nodes: Vec<NavNode>,
    pub edges: Vec<NavEdge>,
    index: FxHashMap<String, NavNodeId>,
}

impl NavGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns its ID, or `DuplicateNode` if the label is taken.
    pub fn add_node(
        &mut self,
        label: impl Into<String>,
        floor: FloorId,
        position: Position,
        kind: NodeKind,
    ) -> Result<NavNodeId> {
        let label = label.into();
        if self.index.contains_key(&label) {
            return Err(NavError::DuplicateNode(label));
        }
        let id = NavNodeId(self.nodes.len() as u32);
        self.index.insert(label.clone(), id);
        self.nodes.push(NavNode {
            id,
            label,
            floor,
            position,
            kind,
            edge_indices: SmallVec::new(),
        });
        Ok(id)
    }

    /// Add a bidirectional edge between two nodes. Returns the edge ID of the
    /// forward (from -> to) edge. Both directions carry the same cost.
    pub fn add_edge(
        &mut self,
        from: NavNodeId,
        to: NavNodeId,
        edge_type: EdgeType,
        cost: f64,
    ) -> NavEdgeId {
        let forward_idx = self.edges.len();
        let forward_id = NavEdgeId(forward_idx as u32);
        self.edges.push(NavEdge {
            id: forward_id,
            from,
            to,
            edge_type,
            cost,
        });

        let reverse_idx = self.edges.len();
        self.edges.push(NavEdge {
            id: NavEdgeId(reverse_idx as u32),
            from: to,
            to: from,
            edge_type,
            cost,
        });

        self.nodes[from.0 as usize].edge_indices.push(forward_idx);
        self.nodes[to.0 as usize].edge_indices.push(reverse_idx);

        forward_id
    }

    /// Get all edges originating from a node.
    pub fn neighbors(&self, node: NavNodeId) -> &[usize] {
        &self.nodes[node.0 as usize].edge_indices
    }

    /// Get a node by ID.
    pub fn node(&self, id: NavNodeId) -> &NavNode {
        &self.nodes[id.0 as usize]
    }

    /// Get an edge by index.
    pub fn edge(&self, idx: usize) -> &NavEdge {
        &self.edges[idx]
    }

    /// Resolve a node label to its ID.
    pub fn lookup(&self, label: &str) -> Option<NavNodeId> {
        self.index.get(label).copied()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges (each stored twice).
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Label → position view of the graph.
    pub fn positions(&self) -> BTreeMap<&str, Position> {
        self.nodes
            .iter()
            .map(|n| (n.label.as_str(), n.position))
            .collect()
    }

    /// Label → floor view of the graph.
    pub fn floors(&self) -> BTreeMap<&str, &FloorId> {
        self.nodes
            .iter()
            .map(|n| (n.label.as_str(), &n.floor))
            .collect()
    }

    /// Label → `[(neighbor label, weight)]` view of the graph, neighbors in
    /// insertion order.
    pub fn adjacency(&self) -> BTreeMap<&str, Vec<(&str, f64)>> {
        self.nodes
            .iter()
            .map(|n| {
                let out = n
                    .edge_indices
                    .iter()
                    .map(|&idx| {
                        let edge = &self.edges[idx];
                        (self.node(edge.to).label.as_str(), edge.cost)
                    })
                    .collect();
                (n.label.as_str(), out)
            })
            .collect()
    }

    /// Find the node closest to `pos` among `candidates` (straight-line
    /// distance). Ties go to the earliest candidate. Returns `None` if
    /// `candidates` is empty.
    pub fn find_nearest_node(&self, candidates: &[NavNodeId], pos: Position) -> Option<NavNodeId> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| {
                let da = self.node(a).position.distance(pos);
                let db = self.node(b).position.distance(pos);
                da.total_cmp(&db)
            })
    }
}

/// Final weight of an edge between two nodes: the floor change cost if they
/// sit on different floors, their straight-line distance otherwise.
pub fn traversal_cost(a: &NavNode, b: &NavNode, config: &NavConfig) -> f64 {
    if a.floor != b.floor {
        config.floor_change_cost
    } else {
        a.position.distance(b.position)
    }
}

/// Build a navigation graph from a building definition.
///
/// Steps, in order (the order fixes node ids and adjacency order):
/// 1. **Corridors**: one `C{n}` node per polyline point, `n` counting across
///    all corridors. Consecutive points are linked (`CorridorSegment`).
/// 2. **Junctions**: every pair of corridor nodes on the same floor within
///    `corridor_snap_distance` (inclusive) is linked (`CorridorJunction`).
///    This is a pairwise scan; corridor node counts stay in the hundreds.
/// 3. **Rooms**: a node at the room marker and a `{id}_SNAP` node at its
///    stored snap position, linked to each other; the snap node links to
///    the nearest corridor node on the same floor.
/// 4. **Exits**: same as rooms.
/// 5. **Stairs**: a `{id}_{floor}` node per landing, linked to the nearest
///    corridor node on its floor. Landings of one stair id are then sorted
///    by `(floor, label)` and adjacent pairs linked (`StairFlight`).
/// 6. **Weights**: every edge gets `traversal_cost()` of its endpoints. This
///    is applied to all edges alike, not only to stair flights.
///
/// Fails with `NoCorridorOnFloor` if a room, exit or stair sits on a floor
/// without corridor nodes, and with `DuplicateNode` on a label collision.
pub fn build_nav_graph(building: &BuildingDefinition, config: &NavConfig) -> Result<NavGraph> {
    let mut graph = NavGraph::new();
    let mut links: Vec<(NavNodeId, NavNodeId, EdgeType)> = Vec::new();

    // --- 1. Corridor polylines ---
    let mut corridor_nodes: Vec<NavNodeId> = Vec::new();
    let mut corridors_by_floor: BTreeMap<&FloorId, Vec<NavNodeId>> = BTreeMap::new();

    for corridor in &building.corridors {
        let mut prev: Option<NavNodeId> = None;
        for &point in &corridor.points {
            let label = format!("C{}", corridor_nodes.len());
            let id = graph.add_node(label, corridor.floor.clone(), point, NodeKind::CorridorPoint)?;
            if let Some(prev) = prev {
                links.push((prev, id, EdgeType::CorridorSegment));
            }
            corridor_nodes.push(id);
            corridors_by_floor.entry(&corridor.floor).or_default().push(id);
            prev = Some(id);
        }
    }

    // --- 2. Corridor junctions ---
    for (i, &a) in corridor_nodes.iter().enumerate() {
        for &b in &corridor_nodes[i + 1..] {
            let (na, nb) = (graph.node(a), graph.node(b));
            if na.floor == nb.floor
                && na.position.distance(nb.position) <= config.corridor_snap_distance
            {
                links.push((a, b, EdgeType::CorridorJunction));
            }
        }
    }

    let nearest_corridor = |graph: &NavGraph, entity: String, floor: &FloorId, pos: Position| {
        corridors_by_floor
            .get(floor)
            .and_then(|candidates| graph.find_nearest_node(candidates, pos))
            .ok_or_else(|| NavError::NoCorridorOnFloor {
                entity,
                floor: floor.clone(),
            })
    };

    // --- 3 & 4. Rooms, then exits ---
    let place_groups: [(&[PlaceDef], &str, NodeKind, NodeKind); 2] = [
        (building.rooms.as_slice(), "room", NodeKind::Room, NodeKind::RoomSnap),
        (building.exits.as_slice(), "exit", NodeKind::Exit, NodeKind::ExitSnap),
    ];
    for (places, noun, kind, snap_kind) in place_groups {
        for place in places {
            let node = graph.add_node(place.id.clone(), place.floor.clone(), place.pos, kind)?;
            let snap = graph.add_node(
                format!("{}{SNAP_SUFFIX}", place.id),
                place.floor.clone(),
                place.snap,
                snap_kind,
            )?;
            links.push((node, snap, EdgeType::PlaceToSnap));

            let nearest =
                nearest_corridor(&graph, format!("{noun} {}", place.id), &place.floor, place.snap)?;
            links.push((snap, nearest, EdgeType::SnapToCorridor));
        }
    }

    // --- 5. Stair landings and flights ---
    let mut stair_groups: BTreeMap<&str, Vec<NavNodeId>> = BTreeMap::new();
    for stair in &building.stairs {
        let landing = graph.add_node(
            format!("{}_{}", stair.id, stair.floor),
            stair.floor.clone(),
            stair.pos,
            NodeKind::StairLanding,
        )?;
        stair_groups.entry(stair.id.as_str()).or_default().push(landing);

        let nearest =
            nearest_corridor(&graph, format!("stair {}", stair.id), &stair.floor, stair.pos)?;
        links.push((landing, nearest, EdgeType::SnapToCorridor));
    }

    for landings in stair_groups.values_mut() {
        landings.sort_by(|&a, &b| {
            let (na, nb) = (graph.node(a), graph.node(b));
            na.floor.cmp(&nb.floor).then_with(|| na.label.cmp(&nb.label))
        });
        for pair in landings.windows(2) {
            links.push((pair[0], pair[1], EdgeType::StairFlight));
        }
    }

    // --- 6. Weight finalization ---
    for (a, b, edge_type) in links {
        let cost = traversal_cost(graph.node(a), graph.node(b), config);
        graph.add_edge(a, b, edge_type, cost);
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        corridor_nodes = corridor_nodes.len(),
        stair_groups = stair_groups.len(),
        "built nav graph"
    );

    Ok(graph)
}
