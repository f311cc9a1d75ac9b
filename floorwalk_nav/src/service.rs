// Navigation service — the entry point external collaborators call.
//
// `NavigationService` holds the immutable `MapDatabase` behind an `Arc`
// together with the `NavConfig`, and answers route requests. Each call is
// independent:
//
//   look up building → check start/end → build_nav_graph() → dijkstra()
//   → segment_path() → RouteResponse
//
// Nothing is cached between calls; the graph is rebuilt from the full
// building definition every time and dropped at the end of the call. The
// service is `Send + Sync` and can be shared across threads as-is.
// `navigate_batch()` uses that to route many requests in parallel, one
// private graph per request.
//
// Lookup and configuration problems come back as `NavError`. An unreachable
// destination is not an error: the response is the empty route, with
// `total_cost` set to `None`.

use crate::building::{BuildingDirectory, MapDatabase};
use crate::config::NavConfig;
use crate::error::{NavError, Result};
use crate::nav::build_nav_graph;
use crate::pathfinding::dijkstra;
use crate::route::{Route, segment_path};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// A route request, shaped like the body clients post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub building: String,
    pub start: String,
    pub end: String,
}

/// A computed route. Serializes to the four route fields plus the node
/// path and its cost.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    #[serde(flatten)]
    pub route: Route,
    /// Node labels from start to end; empty when there is no route.
    pub path: Vec<String>,
    /// Sum of edge weights along `path`; `None` when there is no route.
    pub total_cost: Option<f64>,
}

impl RouteResponse {
    /// Whether the request found no route between start and end.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Stateless route planner over a shared, read-only map database.
#[derive(Clone, Debug)]
pub struct NavigationService {
    db: Arc<MapDatabase>,
    config: NavConfig,
}

impl NavigationService {
    pub fn new(db: Arc<MapDatabase>, config: NavConfig) -> Self {
        Self { db, config }
    }

    pub fn database(&self) -> &MapDatabase {
        &self.db
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Building ids, sorted.
    pub fn buildings(&self) -> Vec<String> {
        self.db.building_ids().map(str::to_owned).collect()
    }

    /// Destinations and floors of one building.
    pub fn directory(&self, building: &str) -> Result<BuildingDirectory> {
        Ok(self.db.building(building)?.directory())
    }

    /// Compute the route from `start` to `end` (room or exit ids) inside
    /// `building`.
    pub fn navigate(&self, building: &str, start: &str, end: &str) -> Result<RouteResponse> {
        let def = self.db.building(building)?;
        for location in [start, end] {
            if !def.has_place(location) {
                return Err(NavError::UnknownLocation {
                    building: building.to_owned(),
                    location: location.to_owned(),
                });
            }
        }

        let graph = build_nav_graph(def, &self.config)?;
        let (Some(from), Some(to)) = (graph.lookup(start), graph.lookup(end)) else {
            // has_place() passed, so both labels were added by the builder.
            return Err(NavError::UnknownLocation {
                building: building.to_owned(),
                location: if graph.lookup(start).is_none() { start } else { end }.to_owned(),
            });
        };

        let Some(result) = dijkstra(&graph, from, to) else {
            warn!(building, start, end, "no route");
            return Ok(RouteResponse::default());
        };

        let route = segment_path(&graph, &result.nodes, def);
        info!(
            building,
            start,
            end,
            hops = result.nodes.len().saturating_sub(1),
            floors = route.floor_order.len(),
            cost = result.total_cost,
            "route computed"
        );

        Ok(RouteResponse {
            route,
            path: result
                .nodes
                .iter()
                .map(|&id| graph.node(id).label.clone())
                .collect(),
            total_cost: Some(result.total_cost),
        })
    }

    pub fn navigate_request(&self, request: &RouteRequest) -> Result<RouteResponse> {
        self.navigate(&request.building, &request.start, &request.end)
    }

    /// Route every request in parallel. Results come back in request order;
    /// a failing request doesn't affect the others.
    pub fn navigate_batch(&self, requests: &[RouteRequest]) -> Vec<Result<RouteResponse>> {
        requests
            .par_iter()
            .map(|request| self.navigate_request(request))
            .collect()
    }
}
