//! Orthogonal connector routing for grid diagrams.
//!
//! Given two endpoint cells, the optional bounding boxes of the shapes that own them and
//! optional approach directions, [`route`] computes a right-angle path with few bends that
//! stays out of both shapes and runs along the center line between them where it can.
//!
//! ```no_run
//! use orthoroute::{Cell, Direction, Endpoint, Region, RouteRequest, RoutingConfig, route};
//!
//! let start = Endpoint::within(Cell::new(4, 4), Region::new(Cell::new(0, 0), Cell::new(7, 6))?)
//!     .heading(Direction::Right);
//! let end = Endpoint::within(Cell::new(17, 17), Region::new(Cell::new(12, 15), Cell::new(20, 23))?)
//!     .heading(Direction::Left);
//! let route = route(&RouteRequest::new(start, end), &RoutingConfig::default())?;
//! for event in route.events() {
//!     println!("{} {:?}", event.cell, event.kind);
//! }
//! # Ok::<(), orthoroute::RoutingError>(())
//! ```

pub mod config;
pub mod error;
pub mod routing;

pub use error::RoutingError;
pub use routing::events::{EventKind, PathEvent, PathEvents, for_each_event};
pub use routing::serialize::{compute_complexity, path_to_string, string_to_path};
pub use routing::types::{
    Axis, COORD_LIMIT, Cell, Connector, Direction, Endpoint, Region, Route, RouteComplexity,
    RouteRequest, RouteResult, RoutingConfig, RoutingOutput,
};
pub use routing::{resolve_directions, route, route_connectors};
