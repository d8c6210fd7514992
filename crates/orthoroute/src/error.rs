//! Error types for the routing engine.
//!
//! Every variant is a caller contract violation: bad geometry or malformed text input.
//! A search that finds no path is not an error, it yields an empty path.

use thiserror::Error;

use crate::routing::types::{Cell, Direction, Region};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("region {region} has zero area")]
    DegenerateRegion { region: Region },

    #[error("no first-hop cell for {cell} heading {direction} within {region} ({limit} steps)")]
    FirstHopNotFound {
        cell: Cell,
        direction: Direction,
        region: Region,
        limit: i32,
    },

    #[error("cell {cell} is outside the routable range of ±{limit}")]
    CoordinateOutOfRange { cell: Cell, limit: i32 },

    #[error("invalid direction '{0}': expected up, right, down or left")]
    InvalidDirection(String),

    #[error("invalid cell '{0}': expected ROW,COL")]
    InvalidCell(String),

    #[error("invalid region '{0}': expected TOP,LEFT:BOTTOM,RIGHT")]
    InvalidRegion(String),
}
