// floorwalk_nav — indoor route planning library.
//
// This crate turns a static building description (floors, corridors, rooms,
// exits, stairs) into a walking route between two rooms or exits, split by
// floor with pixel coordinates for drawing over floor-plan images. It has no
// I/O beyond reading definition and config files, and no UI or HTTP
// dependencies; front ends call `service::NavigationService`.
//
// Module overview:
// - `building.rs`:    Building definition records, `MapDatabase`, load-time validation.
// - `nav.rs`:         Navigation graph structures + construction from a building definition.
// - `pathfinding.rs`: Dijkstra search over the nav graph.
// - `route.rs`:       Per-floor segmentation of a node path.
// - `service.rs`:     `NavigationService` — per-request orchestration and batch routing.
// - `config.rs`:      `NavConfig` — corridor snap distance and floor change cost.
// - `error.rs`:       `NavError` and its lookup/configuration/load classification.
// - `types.rs`:       `Position`, `FloorId`, nav graph ids.
//
// **Critical constraint: determinism.** The same definition and request
// always give the same route. Graph ids are assigned in a fixed order,
// the search breaks ties on node labels, and every collection whose order
// reaches output is a `BTreeMap` or `Vec`.

pub mod building;
pub mod config;
pub mod error;
pub mod nav;
pub mod pathfinding;
pub mod route;
pub mod service;
pub mod types;

pub use building::{BuildingDefinition, MapDatabase};
pub use config::NavConfig;
pub use error::{ErrorKind, NavError};
pub use service::{NavigationService, RouteRequest, RouteResponse};
