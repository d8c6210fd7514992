
use super::graph::RoutingGraph;
use super::route;
use super::types::{Cell, Direction, Endpoint, Region, Route, RouteRequest, RoutingConfig};

/// Helper to create a Cell.
fn cell(row: i32, col: i32) -> Cell {
    Cell::new(row, col)
}

/// Helper to create a list of cells.
fn cells(points: &[(i32, i32)]) -> Vec<Cell> {
    points.iter().map(|&(r, c)| cell(r, c)).collect()
}

/// Helper to create a Region from its inclusive edges.
fn region(top: i32, left: i32, bottom: i32, right: i32) -> Region {
    Region::new(cell(top, left), cell(bottom, right)).unwrap()
}

/// Endpoint inside a region, heading in `dir`.
fn boxed(row: i32, col: i32, r: Region, dir: Direction) -> Endpoint {
    Endpoint::within(cell(row, col), r).heading(dir)
}

/// Endpoint without a region, heading in `dir`.
fn open(row: i32, col: i32, dir: Direction) -> Endpoint {
    Endpoint::open(cell(row, col)).heading(dir)
}

/// Build the graph for a request, resolving missing directions the way `route` does.
fn build(start: &Endpoint, end: &Endpoint) -> RoutingGraph {
    let (sd, ed) = super::resolve_directions(start, end);
    RoutingGraph::build(start, sd, end, ed).unwrap()
}

/// Route with default configuration.
fn route_default(start: Endpoint, end: Endpoint) -> Route {
    route(&RouteRequest::new(start, end), &RoutingConfig::default()).unwrap()
}

/// Route without center-line correction.
fn route_raw(start: Endpoint, end: Endpoint) -> Route {
    let config = RoutingConfig {
        center_line: false,
        ..RoutingConfig::default()
    };
    route(&RouteRequest::new(start, end), &config).unwrap()
}

/// Assert that a path joins `from` to `to` with axis-aligned steps only.
fn assert_connects(path: &[Cell], from: Cell, to: Cell) {
    assert!(!path.is_empty(), "path from {from} to {to} is empty");
    assert_eq!(path.first(), Some(&from), "path {path:?} does not start at {from}");
    assert_eq!(path.last(), Some(&to), "path {path:?} does not end at {to}");
    for pair in path.windows(2) {
        assert!(
            Direction::between(pair[0], pair[1]).is_some(),
            "step {} -> {} is not axis-aligned in {path:?}",
            pair[0],
            pair[1]
        );
    }
}

/// Scenario A: two boxed endpoints, far apart on both axes.
fn standard_request() -> (Endpoint, Endpoint) {
    (
        boxed(4, 4, region(0, 0, 7, 6), Direction::Right),
        boxed(17, 17, region(12, 15, 20, 23), Direction::Left),
    )
}

/// Scenario B: open end embedded in the start's region.
fn embedded_request() -> (Endpoint, Endpoint) {
    (
        boxed(5, 4, region(0, 0, 7, 7), Direction::Down),
        open(7, 5, Direction::Up),
    )
}

/// Overlapping regions where the end cell is the start's first-hop cell: heading down
/// from (14,10) reaches the start region's bottom edge at (15,10), but heading left from
/// (14,12) reaches the end region's left edge exactly at the start cell.
fn hop_onto_start_request() -> (Endpoint, Endpoint) {
    (
        boxed(14, 10, region(7, 7, 15, 16), Direction::Down),
        boxed(14, 12, region(12, 10, 16, 15), Direction::Left),
    )
}

/// Start region and end region of the same size at `(dr, dc)` from it, endpoints in the
/// middle of each, directions inferred.
fn placed_pair(dr: i32, dc: i32, end_boxed: bool) -> (Endpoint, Endpoint) {
    let start = Endpoint::within(cell(3, 4), region(0, 0, 6, 8));
    let end_cell = cell(3 + dr, 4 + dc);
    let end = if end_boxed {
        Endpoint::within(end_cell, region(dr, dc, 6 + dr, 8 + dc))
    } else {
        Endpoint::open(end_cell)
    };
    (start, end)
}

/// Offsets used by the property-style tests: all eight compass placements, plus a
/// few lopsided ones.
const PLACEMENTS: [(i32, i32); 12] = [
    (0, 20),
    (0, -20),
    (20, 0),
    (-20, 0),
    (15, 15),
    (-15, 15),
    (15, -15),
    (-15, -15),
    (12, 3),
    (-3, 14),
    (9, -30),
    (-40, 2),
];

/// Offsets smaller than the region size: the two regions overlap and, for some, each
/// endpoint sits inside the other's region.
const OVERLAPS: [(i32, i32); 8] = [
    (3, 4),
    (-2, 5),
    (4, -3),
    (0, 3),
    (2, 0),
    (-3, -6),
    (1, 1),
    (-5, 7),
];
