pub mod center;
pub mod events;
pub mod graph;
pub mod search;
pub mod serialize;
pub mod types;

#[cfg(test)]
mod tests;

use rayon::prelude::*;
use tracing::debug;

use crate::error::RoutingError;
use graph::RoutingGraph;
use search::find_path;
use serialize::path_to_string;
use types::{
    COORD_LIMIT, Connector, Direction, Endpoint, Route, RouteRequest, RouteResult, RoutingConfig,
    RoutingOutput,
};

/// Route a single connector.
///
/// Builds the guide-line graph, runs the turn-penalized search and, when enabled,
/// moves the path onto the center lines between the endpoints.
///
/// # Errors
/// Returns a [`RoutingError`] for contract violations: a zero-area region, a coordinate
/// beyond [`COORD_LIMIT`](types::COORD_LIMIT) or an endpoint whose direction can never
/// leave its region. An unreachable goal is not an error; the route comes back with an
/// empty path.
pub fn route(request: &RouteRequest, config: &RoutingConfig) -> Result<Route, RoutingError> {
    let RouteRequest { start, end } = request;
    for region in [start.region, end.region].iter().flatten() {
        region.validate()?;
    }
    let corners = [start.region, end.region]
        .into_iter()
        .flatten()
        .flat_map(|r| [r.top_left, r.bottom_right]);
    if let Some(cell) = [start.cell, end.cell]
        .into_iter()
        .chain(corners)
        .find(|c| !c.in_range())
    {
        return Err(RoutingError::CoordinateOutOfRange {
            cell,
            limit: COORD_LIMIT,
        });
    }

    let (start_direction, end_direction) = resolve_directions(start, end);
    let graph = RoutingGraph::build(start, start_direction, end, end_direction)?;
    debug!(
        nodes = graph.len(),
        center_row = graph.center_row,
        center_col = graph.center_col,
        %start_direction,
        %end_direction,
        "graph ready"
    );

    let raw = find_path(&graph, graph.start, graph.goal, config.turn_penalty);
    let path = if config.center_line && !raw.is_empty() {
        let obstacles: Vec<_> = [start.region, end.region].into_iter().flatten().collect();
        center::correct(
            &raw,
            graph.center_row,
            graph.center_col,
            &obstacles,
            &[start.cell, end.cell],
        )
    } else {
        raw.clone()
    };
    debug!(raw = %path_to_string(&raw), path = %path_to_string(&path), "routed");

    Ok(Route {
        path,
        raw,
        start_direction,
        end_direction,
        center_row: graph.center_row,
        center_col: graph.center_col,
    })
}

/// Fill in missing approach directions.
///
/// The dominant axis is the one with the larger coordinate delta (ties go horizontal).
/// The start heads toward the end and the end points back toward the start.
pub fn resolve_directions(start: &Endpoint, end: &Endpoint) -> (Direction, Direction) {
    let dr = end.cell.row - start.cell.row;
    let dc = end.cell.col - start.cell.col;
    let toward_end = if dc.abs() >= dr.abs() {
        if dc >= 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dr > 0 {
        Direction::Down
    } else {
        Direction::Up
    };
    (
        start.direction.unwrap_or(toward_end),
        end.direction.unwrap_or(toward_end.opposite()),
    )
}

/// Route a batch of independent connectors.
///
/// Connectors share no state, so they are routed in parallel via rayon; results keep
/// the input order.
pub fn route_connectors(connectors: &[Connector], config: &RoutingConfig) -> RoutingOutput {
    let results = connectors
        .par_iter()
        .map(|connector| {
            let result = match route(&connector.request(), config) {
                Ok(route) if route.is_empty() => RouteResult::Failure {
                    warning: format!("No path found for connector '{}'", connector.name),
                },
                Ok(route) => RouteResult::Success(route),
                Err(e) => RouteResult::Failure {
                    warning: format!("Connector '{}': {e}", connector.name),
                },
            };
            (connector.clone(), result)
        })
        .collect();

    RoutingOutput { results }
}
