use std::collections::HashMap;

use tracing::trace;

use super::types::{Axis, Cell, Direction, Endpoint, Region};
use crate::error::RoutingError;

/// Index of a node in the graph arena.
pub type NodeId = usize;

/// What a node means to the connector being routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Standard,
    Start,
    Goal,
    /// First node outside the start's region, along the start direction.
    AfterStart,
    /// First node outside the goal's region, along the end direction.
    BeforeGoal,
}

impl Role {
    /// Start and goal only ever get their single dedicated edge.
    pub fn is_terminal(self) -> bool {
        matches!(self, Role::Start | Role::Goal)
    }
}

/// Weighted, axis-tagged edge to a neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: NodeId,
    pub cost: i32,
    pub axis: Axis,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub cell: Cell,
    pub role: Role,
    pub neighbors: Vec<Edge>,
}

/// Sparse routing graph built from the guide lines of one connector.
///
/// Nodes sit at intersections of a handful of guide rows and columns: region
/// edges, endpoint rows/columns and the center lines. Rebuilt for every request.
#[derive(Debug, Clone)]
pub struct RoutingGraph {
    pub nodes: Vec<Node>,
    pub index: HashMap<Cell, NodeId>,
    pub start: NodeId,
    pub goal: NodeId,
    pub center_row: i32,
    pub center_col: i32,
}

/// Dense guide-line lattice with holes where nodes were suppressed.
struct GuideGrid {
    rows: Vec<i32>,
    cols: Vec<i32>,
    slots: Vec<Option<NodeId>>,
}

impl GuideGrid {
    fn at(&self, (r, c): (usize, usize)) -> Option<NodeId> {
        if r < self.rows.len() && c < self.cols.len() {
            self.slots[r * self.cols.len() + c]
        } else {
            None
        }
    }

    fn locate(&self, cell: Cell) -> Option<(usize, usize)> {
        let r = self.rows.binary_search(&cell.row).ok()?;
        let c = self.cols.binary_search(&cell.col).ok()?;
        Some((r, c))
    }

    /// Grid-index neighbor of `pos` in `dir`, if that slot holds a node.
    fn step(&self, (r, c): (usize, usize), dir: Direction) -> Option<NodeId> {
        let pos = match dir {
            Direction::Up => (r.checked_sub(1)?, c),
            Direction::Down => (r + 1, c),
            Direction::Left => (r, c.checked_sub(1)?),
            Direction::Right => (r, c + 1),
        };
        self.at(pos)
    }
}

impl RoutingGraph {
    fn empty(center_row: i32, center_col: i32) -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            start: 0,
            goal: 0,
            center_row,
            center_col,
        }
    }

    /// Build the routing graph for one connector.
    ///
    /// `start_dir` is the direction the path leaves the start cell; `end_dir` the
    /// direction from the end cell toward its last hop (the path arrives opposite to it).
    pub fn build(
        start: &Endpoint,
        start_dir: Direction,
        end: &Endpoint,
        end_dir: Direction,
    ) -> Result<Self, RoutingError> {
        if start.cell == end.cell {
            let mut graph = Self::empty(start.cell.row, start.cell.col);
            let id = graph.push_node(start.cell, Role::Start);
            graph.start = id;
            graph.goal = id;
            return Ok(graph);
        }

        let center_row = center_line(start, end, Axis::Vertical);
        let center_col = center_line(start, end, Axis::Horizontal);

        let after_start = match &start.region {
            Some(region) => first_hop(start.cell, region, start_dir)?,
            None => None,
        };
        let before_goal = match &end.region {
            Some(region) => first_hop(end.cell, region, end_dir)?,
            None => None,
        };

        let role_of = |cell: Cell| {
            if cell == start.cell {
                Role::Start
            } else if cell == end.cell {
                Role::Goal
            } else if Some(cell) == after_start {
                Role::AfterStart
            } else if Some(cell) == before_goal {
                Role::BeforeGoal
            } else {
                Role::Standard
            }
        };

        let keep_inner = keeps_inner_nodes(start, end);
        let regions: Vec<Region> = [start.region, end.region].into_iter().flatten().collect();

        let rows = guide_lines(start, end, Axis::Vertical, center_row);
        let cols = guide_lines(start, end, Axis::Horizontal, center_col);

        let mut graph = Self::empty(center_row, center_col);
        let mut slots = Vec::with_capacity(rows.len() * cols.len());
        for &row in &rows {
            for &col in &cols {
                let cell = Cell::new(row, col);
                let role = role_of(cell);
                let suppressed = !keep_inner
                    && role == Role::Standard
                    && regions.iter().any(|r| r.strictly_contains(cell));
                if suppressed {
                    slots.push(None);
                    continue;
                }
                let id = graph.push_node(cell, role);
                match role {
                    Role::Start => graph.start = id,
                    Role::Goal => graph.goal = id,
                    _ => {}
                }
                slots.push(Some(id));
            }
        }

        let grid = GuideGrid { rows, cols, slots };
        graph.assign_neighbors(&grid, start_dir, end_dir, after_start, before_goal);

        trace!(
            nodes = graph.nodes.len(),
            rows = ?grid.rows,
            cols = ?grid.cols,
            center_row,
            center_col,
            "routing graph built"
        );

        Ok(graph)
    }

    /// Connect every node to its grid neighbors, then give start and goal their single edge.
    fn assign_neighbors(
        &mut self,
        grid: &GuideGrid,
        start_dir: Direction,
        end_dir: Direction,
        after_start: Option<Cell>,
        before_goal: Option<Cell>,
    ) {
        for r in 0..grid.rows.len() {
            for c in 0..grid.cols.len() {
                let Some(id) = grid.at((r, c)) else {
                    continue;
                };
                if self.nodes[id].role.is_terminal() {
                    continue;
                }
                // Right and down only: `connect` adds both sides.
                for other in [grid.at((r, c + 1)), grid.at((r + 1, c))]
                    .into_iter()
                    .flatten()
                {
                    if !self.nodes[other].role.is_terminal() {
                        self.connect(id, other);
                    }
                }
            }
        }

        for (id, hop, dir) in [
            (self.start, after_start, start_dir),
            (self.goal, before_goal, end_dir),
        ] {
            // Already joined by the other terminal's fallback step.
            if !self.nodes[id].neighbors.is_empty() {
                continue;
            }
            if let Some(target) = self.terminal_target(grid, id, hop, dir) {
                self.connect(id, target);
            }
        }
    }

    /// The single neighbor of a start or goal node.
    ///
    /// The first-hop node when it exists as a hop node, otherwise the nearest grid slot in
    /// `dir`, then clockwise, counter-clockwise and opposite. A terminal slot is only taken
    /// while that terminal has no edge yet.
    fn terminal_target(
        &self,
        grid: &GuideGrid,
        id: NodeId,
        hop: Option<Cell>,
        dir: Direction,
    ) -> Option<NodeId> {
        let hop_node = hop
            .and_then(|cell| self.index.get(&cell).copied())
            .filter(|&t| matches!(self.nodes[t].role, Role::AfterStart | Role::BeforeGoal));
        if hop_node.is_some() {
            return hop_node;
        }

        let usable = |t: NodeId| {
            let node = &self.nodes[t];
            t != id && (!node.role.is_terminal() || node.neighbors.is_empty())
        };
        let pos = grid.locate(self.nodes[id].cell)?;
        [dir, dir.clockwise(), dir.counter_clockwise(), dir.opposite()]
            .into_iter()
            .filter_map(|d| grid.step(pos, d))
            .find(|&t| usable(t))
    }

    /// Append a node. The cell must not already be present.
    pub(crate) fn push_node(&mut self, cell: Cell, role: Role) -> NodeId {
        debug_assert!(!self.index.contains_key(&cell), "duplicate node at {cell}");
        let id = self.nodes.len();
        self.nodes.push(Node {
            cell,
            role,
            neighbors: Vec::new(),
        });
        self.index.insert(cell, id);
        id
    }

    /// Add a symmetric edge between two nodes on a common row or column.
    /// Existing edges are left untouched.
    pub(crate) fn connect(&mut self, a: NodeId, b: NodeId) {
        if a == b || self.nodes[a].neighbors.iter().any(|e| e.to == b) {
            return;
        }
        let (ca, cb) = (self.nodes[a].cell, self.nodes[b].cell);
        let Some(dir) = Direction::between(ca, cb) else {
            debug_assert!(false, "nodes {ca} and {cb} are not aligned");
            return;
        };
        let axis = dir.axis();
        let cost = ca.manhattan_to(cb);
        self.nodes[a].neighbors.push(Edge { to: b, cost, axis });
        self.nodes[b].neighbors.push(Edge { to: a, cost, axis });
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Node at a cell, if the cell is a graph node.
    pub fn node_at(&self, cell: Cell) -> Option<&Node> {
        self.index.get(&cell).map(|&id| &self.nodes[id])
    }
}

/// Floor midpoint, correct for negative sums.
fn midpoint(a: i32, b: i32) -> i32 {
    // The floor of the mean always lies between `a` and `b`, so it fits back into i32.
    (i64::from(a) + i64::from(b)).div_euclid(2) as i32
}

/// Center line between the two endpoints along `axis`.
///
/// Midpoint of the gap between the facing edges when the extents are apart
/// (touching counts as apart), otherwise midpoint of the endpoint cells.
fn center_line(start: &Endpoint, end: &Endpoint, axis: Axis) -> i32 {
    let (start_lo, start_hi) = start.extent(axis);
    let (end_lo, end_hi) = end.extent(axis);
    if start_hi <= end_lo {
        midpoint(start_hi, end_lo)
    } else if end_hi <= start_lo {
        midpoint(end_hi, start_lo)
    } else {
        midpoint(start.cell.along(axis), end.cell.along(axis))
    }
}

/// Sorted, deduplicated guide lines along `axis`: rows for `Vertical`, columns for `Horizontal`.
fn guide_lines(start: &Endpoint, end: &Endpoint, axis: Axis, center: i32) -> Vec<i32> {
    let mut lines = vec![start.cell.along(axis), end.cell.along(axis), center];
    for region in [start.region, end.region].into_iter().flatten() {
        let (lo, hi) = region.extent(axis);
        lines.extend([lo, hi]);
    }
    lines.sort_unstable();
    lines.dedup();
    lines
}

/// Interior nodes are needed to keep the graph connected when the regions
/// overlap or when an endpoint sits inside the other endpoint's region.
fn keeps_inner_nodes(start: &Endpoint, end: &Endpoint) -> bool {
    let overlapping = match (&start.region, &end.region) {
        (Some(a), Some(b)) => a.overlaps(b),
        _ => false,
    };
    overlapping
        || start.region.is_some_and(|r| r.contains(end.cell))
        || end.region.is_some_and(|r| r.contains(start.cell))
}

/// Walk from `cell` in `dir` until the region edge on that side.
///
/// Returns `None` when the cell already sits on that edge.
fn first_hop(cell: Cell, region: &Region, dir: Direction) -> Result<Option<Cell>, RoutingError> {
    let axis = dir.axis();
    let (lo, hi) = region.extent(axis);
    let limit = hi - lo;
    let edge = region.edge(dir);

    let mut probe = cell;
    for _ in 0..=limit {
        if probe.along(axis) == edge {
            return Ok((probe != cell).then_some(probe));
        }
        probe = probe.step(dir);
    }

    Err(RoutingError::FirstHopNotFound {
        cell,
        direction: dir,
        region: *region,
        limit,
    })
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn region(top: i32, left: i32, bottom: i32, right: i32) -> Region {
        Region::new(Cell::new(top, left), Cell::new(bottom, right)).unwrap()
    }

    #[test]
    fn midpoint_floors_toward_negative_infinity() {
        assert_eq!(midpoint(7, 12), 9);
        assert_eq!(midpoint(-3, 0), -2);
        assert_eq!(midpoint(5, 5), 5);
    }

    #[test]
    fn midpoint_of_extreme_coordinates() {
        assert_eq!(midpoint(i32::MAX, i32::MAX), i32::MAX);
        assert_eq!(midpoint(i32::MIN, i32::MIN), i32::MIN);
        assert_eq!(midpoint(i32::MIN, i32::MAX), -1);
    }

    #[test]
    fn center_line_in_gap_between_regions() {
        let start = Endpoint::within(Cell::new(4, 4), region(0, 0, 7, 6));
        let end = Endpoint::within(Cell::new(17, 17), region(12, 15, 20, 23));
        assert_eq!(center_line(&start, &end, Axis::Vertical), 9);
        assert_eq!(center_line(&start, &end, Axis::Horizontal), 10);
        // Symmetric when the endpoints are swapped.
        assert_eq!(center_line(&end, &start, Axis::Vertical), 9);
        assert_eq!(center_line(&end, &start, Axis::Horizontal), 10);
    }

    #[test]
    fn center_line_between_cells_when_extents_overlap() {
        let start = Endpoint::within(Cell::new(5, 4), region(0, 0, 7, 7));
        let end = Endpoint::open(Cell::new(7, 5));
        // Rows touch at 7, so the gap rule applies.
        assert_eq!(center_line(&start, &end, Axis::Vertical), 7);
        // Columns overlap, so the endpoint cells decide.
        assert_eq!(center_line(&start, &end, Axis::Horizontal), 4);
    }

    #[test]
    fn guide_lines_are_sorted_and_unique() {
        let start = Endpoint::within(Cell::new(4, 4), region(0, 0, 7, 6));
        let end = Endpoint::within(Cell::new(17, 17), region(12, 15, 20, 23));
        assert_eq!(
            guide_lines(&start, &end, Axis::Vertical, 9),
            vec![0, 4, 7, 9, 12, 17, 20]
        );
        assert_eq!(
            guide_lines(&start, &end, Axis::Horizontal, 10),
            vec![0, 4, 6, 10, 15, 17, 23]
        );
    }

    #[test]
    fn first_hop_walks_to_region_edge() {
        let r = region(0, 0, 7, 6);
        let cell = Cell::new(4, 4);
        assert_eq!(first_hop(cell, &r, Direction::Right), Ok(Some(Cell::new(4, 6))));
        assert_eq!(first_hop(cell, &r, Direction::Left), Ok(Some(Cell::new(4, 0))));
        assert_eq!(first_hop(cell, &r, Direction::Up), Ok(Some(Cell::new(0, 4))));
        assert_eq!(first_hop(cell, &r, Direction::Down), Ok(Some(Cell::new(7, 4))));
    }

    #[test]
    fn first_hop_on_edge_is_none() {
        let r = region(0, 0, 7, 6);
        assert_eq!(first_hop(Cell::new(4, 6), &r, Direction::Right), Ok(None));
    }

    #[test]
    fn first_hop_outside_region_fails() {
        let r = region(0, 0, 7, 6);
        let err = first_hop(Cell::new(4, 10), &r, Direction::Right).unwrap_err();
        assert!(matches!(err, RoutingError::FirstHopNotFound { limit: 6, .. }));
    }

    #[test]
    fn keeps_inner_nodes_for_embedded_endpoint() {
        let start = Endpoint::within(Cell::new(5, 4), region(0, 0, 7, 7));
        let inside = Endpoint::open(Cell::new(7, 5));
        let outside = Endpoint::open(Cell::new(12, 5));
        assert!(keeps_inner_nodes(&start, &inside));
        assert!(!keeps_inner_nodes(&start, &outside));
    }

    #[test]
    fn connect_is_symmetric_and_deduplicated() {
        let mut graph = RoutingGraph::empty(0, 0);
        let a = graph.push_node(Cell::new(0, 0), Role::Standard);
        let b = graph.push_node(Cell::new(0, 5), Role::Standard);
        graph.connect(a, b);
        graph.connect(b, a);
        assert_eq!(
            graph.node(a).neighbors,
            vec![Edge {
                to: b,
                cost: 5,
                axis: Axis::Horizontal
            }]
        );
        assert_eq!(
            graph.node(b).neighbors,
            vec![Edge {
                to: a,
                cost: 5,
                axis: Axis::Horizontal
            }]
        );
    }
}
