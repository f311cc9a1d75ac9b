// Per-floor segmentation of a node path.
//
// `segment_path()` turns the node sequence from `pathfinding.rs` into what a
// floor-plan renderer consumes: for each floor, the flat `[x0, y0, x1, y1,
// ...]` list of pixel coordinates in traversal order; the floors in the
// order they are first entered; the image of each floor touched; and the
// floor the route starts on.
//
// A route that leaves a floor and later comes back (up a stair, along a
// corridor, back down another stair) gets one merged coordinate list for
// that floor. The two visits are simply concatenated, so a renderer that
// draws the list as a single polyline will show a jump between them.
// `floor_visits()` is the alternative for consumers that need one run per
// visit; it leaves `segment_path()` untouched.
//
// See also: `service.rs`, which wraps the `Route` into a `RouteResponse`.

use crate::building::BuildingDefinition;
use crate::nav::NavGraph;
use crate::types::{FloorId, NavNodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A path split by floor, ready for drawing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Floor → flat `[x0, y0, x1, y1, ...]` in traversal order.
    pub floor_points: BTreeMap<FloorId, Vec<f64>>,
    /// Distinct floors in first-visit order.
    pub floor_order: Vec<FloorId>,
    /// Floor → image reference, only for floors in `floor_order`.
    pub floor_images: BTreeMap<FloorId, String>,
    /// Floor of the first node, `None` for an empty route.
    pub start_floor: Option<FloorId>,
}

impl Route {
    pub fn is_empty(&self) -> bool {
        self.floor_order.is_empty()
    }
}

/// One uninterrupted stretch of a route on a single floor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorVisit {
    pub floor: FloorId,
    /// Flat `[x0, y0, x1, y1, ...]` for this stretch only.
    pub points: Vec<f64>,
}

/// Split a path by floor. Floors missing from the building's floor table get
/// points and an order slot but no image.
pub fn segment_path(graph: &NavGraph, path: &[NavNodeId], building: &BuildingDefinition) -> Route {
    let mut route = Route::default();

    for &id in path {
        let node = graph.node(id);
        if !route.floor_points.contains_key(&node.floor) {
            route.floor_order.push(node.floor.clone());
        }
        route
            .floor_points
            .entry(node.floor.clone())
            .or_default()
            .extend([node.position.x, node.position.y]);
    }

    route.floor_images = route
        .floor_order
        .iter()
        .filter_map(|f| building.floor_image(f).map(|img| (f.clone(), img.to_owned())))
        .collect();
    route.start_floor = path.first().map(|&id| graph.node(id).floor.clone());

    route
}

/// Split a path into maximal consecutive runs on one floor. A floor that is
/// left and re-entered yields two visits.
pub fn floor_visits(graph: &NavGraph, path: &[NavNodeId]) -> Vec<FloorVisit> {
    let mut visits: Vec<FloorVisit> = Vec::new();
    for &id in path {
        let node = graph.node(id);
        match visits.last_mut() {
            Some(visit) if visit.floor == node.floor => {
                visit.points.extend([node.position.x, node.position.y]);
            }
            _ => visits.push(FloorVisit {
                floor: node.floor.clone(),
                points: vec![node.position.x, node.position.y],
            }),
        }
    }
    visits
}
