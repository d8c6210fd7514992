use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::events::PathEvents;
use crate::error::RoutingError;

/// Largest coordinate magnitude accepted for routing. Sums and distances of in-range
/// coordinates stay inside `i32`.
pub const COORD_LIMIT: i32 = 1 << 28;

/// Integer grid coordinate.
///
/// Ordering is row-major: rows compare first, then columns.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The coordinate that changes when moving along `axis`.
    /// Horizontal travel changes the column, vertical travel changes the row.
    pub fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.col,
            Axis::Vertical => self.row,
        }
    }

    /// Copy of this cell with the coordinate along `axis` replaced.
    pub fn with_along(self, axis: Axis, value: i32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(self.row, value),
            Axis::Vertical => Self::new(value, self.col),
        }
    }

    /// Step one unit in the given direction.
    pub fn step(self, dir: Direction) -> Self {
        self.offset(dir, 1)
    }

    /// Move `n` units in the given direction.
    pub fn offset(self, dir: Direction, n: i32) -> Self {
        match dir {
            Direction::Up => Self::new(self.row - n, self.col),
            Direction::Down => Self::new(self.row + n, self.col),
            Direction::Left => Self::new(self.row, self.col - n),
            Direction::Right => Self::new(self.row, self.col + n),
        }
    }

    /// Manhattan distance to another cell, saturating at `i32::MAX`.
    pub fn manhattan_to(self, other: Cell) -> i32 {
        let d = self
            .row
            .abs_diff(other.row)
            .saturating_add(self.col.abs_diff(other.col));
        i32::try_from(d).unwrap_or(i32::MAX)
    }

    /// Whether both coordinates are within [`COORD_LIMIT`].
    pub fn in_range(self) -> bool {
        self.row.unsigned_abs() <= COORD_LIMIT.unsigned_abs()
            && self.col.unsigned_abs() <= COORD_LIMIT.unsigned_abs()
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Parses `ROW,COL`, optionally wrapped in parentheses.
impl FromStr for Cell {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RoutingError::InvalidCell(s.to_string());
        let inner = s.trim();
        let inner = inner
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(inner);
        let (row, col) = inner.split_once(',').ok_or_else(invalid)?;
        let row = row.trim().parse().map_err(|_| invalid())?;
        let col = col.trim().parse().map_err(|_| invalid())?;
        let cell = Self::new(row, col);
        if !cell.in_range() {
            return Err(invalid());
        }
        Ok(cell)
    }
}

/// Orientation of a segment or a travel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The other axis.
    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Cardinal direction for travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All four directions, clockwise from `Up`.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    /// Whether a transition from `self` to `other` constitutes a turn.
    pub fn is_turn(self, other: Direction) -> bool {
        self.axis() != other.axis()
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn clockwise(self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    pub fn counter_clockwise(self) -> Direction {
        self.clockwise().opposite()
    }

    /// Direction of travel from `a` to `b`.
    /// `None` when the cells are equal or not on a common row or column.
    pub fn between(a: Cell, b: Cell) -> Option<Direction> {
        let dr = b.row - a.row;
        let dc = b.col - a.col;
        match (dr, dc) {
            (0, dc) if dc > 0 => Some(Direction::Right),
            (0, dc) if dc < 0 => Some(Direction::Left),
            (dr, 0) if dr > 0 => Some(Direction::Down),
            (dr, 0) if dr < 0 => Some(Direction::Up),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" | "n" | "north" => Ok(Direction::Up),
            "right" | "r" | "e" | "east" => Ok(Direction::Right),
            "down" | "d" | "s" | "south" => Ok(Direction::Down),
            "left" | "l" | "w" | "west" => Ok(Direction::Left),
            _ => Err(RoutingError::InvalidDirection(s.to_string())),
        }
    }
}

/// Axis-aligned rectangle with inclusive corners, typically the bounding box
/// of the shape that owns an endpoint.
///
/// Area is measured between the corner coordinates, so a valid region spans at least
/// two rows and two columns (a drawn box needs both of its borders). A single row or
/// column of cells is rejected as zero area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub top_left: Cell,
    pub bottom_right: Cell,
}

impl Region {
    /// Create a region, rejecting rectangles with zero area.
    pub fn new(top_left: Cell, bottom_right: Cell) -> Result<Self, RoutingError> {
        let region = Self {
            top_left,
            bottom_right,
        };
        region.validate()?;
        Ok(region)
    }

    /// Normalized rectangle spanned by two corners. May be degenerate.
    pub(crate) fn spanning(a: Cell, b: Cell) -> Self {
        Self {
            top_left: Cell::new(a.row.min(b.row), a.col.min(b.col)),
            bottom_right: Cell::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    /// Reject regions with `top >= bottom` or `left >= right`.
    pub fn validate(&self) -> Result<(), RoutingError> {
        if self.top() >= self.bottom() || self.left() >= self.right() {
            return Err(RoutingError::DegenerateRegion { region: *self });
        }
        Ok(())
    }

    pub fn top(&self) -> i32 {
        self.top_left.row
    }

    pub fn left(&self) -> i32 {
        self.top_left.col
    }

    pub fn bottom(&self) -> i32 {
        self.bottom_right.row
    }

    pub fn right(&self) -> i32 {
        self.bottom_right.col
    }

    /// `(low, high)` edges along `axis`.
    pub fn extent(&self, axis: Axis) -> (i32, i32) {
        match axis {
            Axis::Horizontal => (self.left(), self.right()),
            Axis::Vertical => (self.top(), self.bottom()),
        }
    }

    /// The edge faced when travelling in `dir`.
    pub fn edge(&self, dir: Direction) -> i32 {
        match dir {
            Direction::Up => self.top(),
            Direction::Right => self.right(),
            Direction::Down => self.bottom(),
            Direction::Left => self.left(),
        }
    }

    /// Inclusive containment: boundary cells count as inside.
    pub fn contains(&self, cell: Cell) -> bool {
        (self.top()..=self.bottom()).contains(&cell.row)
            && (self.left()..=self.right()).contains(&cell.col)
    }

    /// Interior containment: boundary cells are outside.
    pub fn strictly_contains(&self, cell: Cell) -> bool {
        self.top() < cell.row
            && cell.row < self.bottom()
            && self.left() < cell.col
            && cell.col < self.right()
    }

    /// Whether the interiors intersect. Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Region) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{}]", self.top_left, self.bottom_right)
    }
}

/// Parses `TOP,LEFT:BOTTOM,RIGHT`.
impl FromStr for Region {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once(':')
            .ok_or_else(|| RoutingError::InvalidRegion(s.to_string()))?;
        let top_left: Cell = a
            .parse()
            .map_err(|_| RoutingError::InvalidRegion(s.to_string()))?;
        let bottom_right: Cell = b
            .parse()
            .map_err(|_| RoutingError::InvalidRegion(s.to_string()))?;
        Region::new(top_left, bottom_right)
    }
}

/// One end of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub cell: Cell,
    /// Bounding box of the owning shape. `None` for an open end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    /// Preferred direction to leave (start) or approach from (end).
    /// Inferred from the endpoint geometry when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

impl Endpoint {
    /// An endpoint not owned by any shape.
    pub fn open(cell: Cell) -> Self {
        Self {
            cell,
            region: None,
            direction: None,
        }
    }

    /// An endpoint owned by the shape bounded by `region`.
    pub fn within(cell: Cell, region: Region) -> Self {
        Self {
            cell,
            region: Some(region),
            direction: None,
        }
    }

    pub fn heading(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// `(low, high)` extent along `axis`: the region edges, or the bare cell.
    pub fn extent(&self, axis: Axis) -> (i32, i32) {
        match &self.region {
            Some(region) => region.extent(axis),
            None => (self.cell.along(axis), self.cell.along(axis)),
        }
    }
}

/// A single routing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start: Endpoint,
    pub end: Endpoint,
}

impl RouteRequest {
    pub fn new(start: Endpoint, end: Endpoint) -> Self {
        Self { start, end }
    }
}

/// Configuration for the routing engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingConfig {
    /// Extra cost added by the search whenever the path bends.
    pub turn_penalty: f64,
    /// Whether to move a parallel run onto the center line after the search.
    pub center_line: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            turn_penalty: 0.5,
            center_line: true,
        }
    }
}

/// Complexity metrics for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RouteComplexity {
    /// Total path length in grid units.
    pub length: i32,
    /// Number of horizontal/vertical direction changes.
    pub turns: u32,
}

/// A routed connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Final path, start cell to end cell inclusive. Empty when no path exists.
    pub path: Vec<Cell>,
    /// Search output before center-line correction.
    pub raw: Vec<Cell>,
    pub start_direction: Direction,
    pub end_direction: Direction,
    pub center_row: i32,
    pub center_col: i32,
}

impl Route {
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn complexity(&self) -> RouteComplexity {
        super::serialize::compute_complexity(&self.path)
    }

    /// Per-cell drawing events along the final path.
    pub fn events(&self) -> PathEvents<'_> {
        PathEvents::new(&self.path, self.start_direction, self.end_direction)
    }
}

/// A named connector in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    pub name: String,
    pub start: Endpoint,
    pub end: Endpoint,
}

impl Connector {
    pub fn request(&self) -> RouteRequest {
        RouteRequest::new(self.start, self.end)
    }
}

/// Result for routing a single connector.
#[derive(Debug, Clone)]
pub enum RouteResult {
    /// Successfully found a route.
    Success(Route),
    /// Could not route the connector.
    Failure { warning: String },
}

/// Output of routing a batch of connectors, in input order.
#[derive(Debug, Clone)]
pub struct RoutingOutput {
    pub results: Vec<(Connector, RouteResult)>,
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn parse_cell_plain_and_parenthesized() {
        assert_eq!("4,17".parse::<Cell>().unwrap(), Cell::new(4, 17));
        assert_eq!("(-2, 3)".parse::<Cell>().unwrap(), Cell::new(-2, 3));
        assert!("4;17".parse::<Cell>().is_err());
        assert!("a,b".parse::<Cell>().is_err());
    }

    #[test]
    fn parse_cell_rejects_huge_coordinates() {
        assert!("2147483647,0".parse::<Cell>().is_err());
        assert!("0,-268435457".parse::<Cell>().is_err());
        assert_eq!(
            "268435456,-268435456".parse::<Cell>().unwrap(),
            Cell::new(COORD_LIMIT, -COORD_LIMIT)
        );
    }

    #[test]
    fn manhattan_distance_saturates() {
        assert_eq!(Cell::new(0, 0).manhattan_to(Cell::new(-3, 4)), 7);
        assert_eq!(
            Cell::new(i32::MIN, i32::MIN).manhattan_to(Cell::new(i32::MAX, i32::MAX)),
            i32::MAX
        );
        assert!(!Cell::new(i32::MIN, 0).in_range());
        assert!(Cell::new(-COORD_LIMIT, COORD_LIMIT).in_range());
    }

    #[test]
    fn parse_region() {
        let region: Region = "0,0:7,6".parse().unwrap();
        assert_eq!(region.top_left, Cell::new(0, 0));
        assert_eq!(region.bottom_right, Cell::new(7, 6));
        assert!("0,0-7,6".parse::<Region>().is_err());
    }

    #[test]
    fn parse_direction_aliases() {
        assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("e".parse::<Direction>().unwrap(), Direction::Right);
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(RoutingError::InvalidDirection("sideways".to_string()))
        );
    }

    #[test]
    fn direction_axes() {
        assert_eq!(Direction::Up.axis(), Axis::Vertical);
        assert_eq!(Direction::Down.axis(), Axis::Vertical);
        assert_eq!(Direction::Left.axis(), Axis::Horizontal);
        assert_eq!(Direction::Right.axis(), Axis::Horizontal);
        assert!(Direction::Up.is_turn(Direction::Left));
        assert!(!Direction::Up.is_turn(Direction::Down));
    }

    #[test]
    fn rotation_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(dir.clockwise().counter_clockwise(), dir);
            assert_eq!(dir.clockwise().clockwise(), dir.opposite());
        }
    }

    #[test]
    fn direction_between_cells() {
        let a = Cell::new(4, 4);
        assert_eq!(Direction::between(a, Cell::new(4, 9)), Some(Direction::Right));
        assert_eq!(Direction::between(a, Cell::new(1, 4)), Some(Direction::Up));
        assert_eq!(Direction::between(a, a), None);
        assert_eq!(Direction::between(a, Cell::new(5, 5)), None);
    }

    #[test]
    fn region_containment() {
        let region = Region::new(Cell::new(0, 0), Cell::new(7, 6)).unwrap();
        assert!(region.contains(Cell::new(7, 6)));
        assert!(!region.strictly_contains(Cell::new(7, 3)));
        assert!(region.strictly_contains(Cell::new(4, 4)));
        assert!(!region.contains(Cell::new(8, 0)));
    }

    #[test]
    fn touching_regions_do_not_overlap() {
        let a = Region::new(Cell::new(0, 0), Cell::new(6, 4)).unwrap();
        let b = Region::new(Cell::new(0, 4), Cell::new(6, 8)).unwrap();
        let c = Region::new(Cell::new(2, 3), Cell::new(4, 9)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn zero_area_region_rejected() {
        let err = Region::new(Cell::new(3, 3), Cell::new(3, 8)).unwrap_err();
        assert!(matches!(err, RoutingError::DegenerateRegion { .. }));
    }

    #[test]
    fn smallest_region_is_two_by_two() {
        assert!(Region::new(Cell::new(3, 3), Cell::new(4, 4)).is_ok());
        // One row or one column of cells has no area between its corners.
        assert!(Region::new(Cell::new(3, 3), Cell::new(3, 4)).is_err());
        assert!(Region::new(Cell::new(3, 3), Cell::new(4, 3)).is_err());
        // Inverted corners.
        assert!(Region::new(Cell::new(4, 4), Cell::new(3, 3)).is_err());
    }
}
