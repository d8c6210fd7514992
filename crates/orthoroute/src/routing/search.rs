use tracing::trace;

use super::graph::{NodeId, RoutingGraph};
use super::types::{Axis, Cell};

/// Per-node search scratch. Fresh for every search.
#[derive(Debug, Clone, Copy, Default)]
struct Scratch {
    /// Best known cost from the start.
    g: f64,
    /// Heuristic estimate to the goal.
    h: f64,
    came_from: Option<NodeId>,
    /// Axis used to reach this node, for turn detection.
    came_from_axis: Option<Axis>,
}

impl Scratch {
    fn f(&self) -> f64 {
        self.g + self.h
    }
}

/// Heuristic: Manhattan distance to the goal cell.
fn heuristic(from: Cell, goal: Cell) -> f64 {
    from.manhattan_to(goal) as f64
}

/// Turn-penalized A* from `start` to `goal`.
///
/// The open list keeps insertion order and is scanned linearly for the minimal
/// `f`; on ties the earliest entry wins, which makes results reproducible.
/// Returns the path as cells, start to goal inclusive, or an empty vector when
/// the goal is unreachable.
pub fn find_path(graph: &RoutingGraph, start: NodeId, goal: NodeId, turn_penalty: f64) -> Vec<Cell> {
    if graph.is_empty() {
        return Vec::new();
    }

    let goal_cell = graph.node(goal).cell;
    let mut scratch = vec![Scratch::default(); graph.len()];
    let mut in_open = vec![false; graph.len()];
    let mut closed = vec![false; graph.len()];

    scratch[start].h = heuristic(graph.node(start).cell, goal_cell);
    let mut open = vec![start];
    in_open[start] = true;

    while !open.is_empty() {
        let mut best = 0;
        for (i, &id) in open.iter().enumerate().skip(1) {
            if scratch[id].f() < scratch[open[best]].f() {
                best = i;
            }
        }
        let current = open.remove(best);
        in_open[current] = false;

        if current == goal {
            return reconstruct_path(graph, &scratch, goal);
        }

        closed[current] = true;
        trace!(cell = %graph.node(current).cell, g = scratch[current].g, "expand");

        for edge in &graph.node(current).neighbors {
            let neighbor = edge.to;
            if closed[neighbor] {
                continue;
            }

            let mut tentative = scratch[current].g + edge.cost as f64;
            if scratch[current]
                .came_from_axis
                .is_some_and(|axis| axis != edge.axis)
            {
                tentative += turn_penalty;
            }

            if !in_open[neighbor] {
                open.push(neighbor);
                in_open[neighbor] = true;
            } else if tentative >= scratch[neighbor].g {
                continue;
            }

            scratch[neighbor] = Scratch {
                g: tentative,
                h: heuristic(graph.node(neighbor).cell, goal_cell),
                came_from: Some(current),
                came_from_axis: Some(edge.axis),
            };
        }
    }

    Vec::new()
}

/// Follow `came_from` links back from the goal.
fn reconstruct_path(graph: &RoutingGraph, scratch: &[Scratch], goal: NodeId) -> Vec<Cell> {
    let mut path = vec![graph.node(goal).cell];
    let mut current = goal;
    while let Some(prev) = scratch[current].came_from {
        path.push(graph.node(prev).cell);
        current = prev;
    }
    path.reverse();
    path
}
