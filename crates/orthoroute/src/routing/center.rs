use tracing::debug;

use super::serialize::compute_complexity;
use super::types::{Axis, Cell, Direction, Region};

/// Nudge the path onto the center lines between the two endpoints.
///
/// Tries the center column first, then the center row on the result. Each attempt
/// moves at most one run parallel to its center line, and only when the move keeps
/// clear of `obstacles` and `endpoints` and does not add turns.
pub fn correct(
    path: &[Cell],
    center_row: i32,
    center_col: i32,
    obstacles: &[Region],
    endpoints: &[Cell],
) -> Vec<Cell> {
    let mut current = path.to_vec();
    for (axis, center) in [(Axis::Horizontal, center_col), (Axis::Vertical, center_row)] {
        if let Some(moved) = correct_along(&current, axis, center, obstacles, endpoints) {
            debug!(?axis, center, from = ?current, to = ?moved, "moved onto center line");
            current = moved;
        }
    }
    current
}

/// Single attempt for the center line at coordinate `center` along `axis`.
///
/// `axis` is the travel axis that crosses the line: `Horizontal` for the center
/// column, `Vertical` for the center row.
fn correct_along(
    path: &[Cell],
    axis: Axis,
    center: i32,
    obstacles: &[Region],
    endpoints: &[Cell],
) -> Option<Vec<Cell>> {
    if path.len() < 3 {
        return None;
    }
    // dirs[i] is the departure direction from path[i].
    let dirs: Vec<Direction> = path
        .windows(2)
        .map(|w| Direction::between(w[0], w[1]))
        .collect::<Option<_>>()?;

    let hit = path.iter().position(|c| c.along(axis) == center)?;
    let hit_dir = if hit == 0 { dirs[0] } else { dirs[hit - 1] };
    if hit_dir.axis() != axis {
        // Already running along the center line.
        return None;
    }

    let turn = (hit..dirs.len()).find(|&i| dirs[i] != hit_dir)?;
    if turn == hit {
        return None;
    }
    let run_dir = dirs[turn];
    if run_dir.axis() == axis {
        return None;
    }

    let end = (turn + 1..dirs.len()).find(|&i| dirs[i] != run_dir)?;
    if dirs[end] != hit_dir {
        return None;
    }

    let pivot = path[end].with_along(axis, center);
    if [path[hit], path[end], pivot]
        .iter()
        .any(|c| endpoints.contains(c))
    {
        return None;
    }

    let sweep = Region::spanning(path[turn], pivot);
    if obstacles.iter().any(|r| sweep.overlaps(r))
        || endpoints.iter().any(|&c| sweep.strictly_contains(c))
    {
        debug!(?axis, center, %sweep, "center line blocked");
        return None;
    }

    let mut corrected = Vec::with_capacity(path.len());
    corrected.extend_from_slice(&path[..=hit]);
    corrected.push(pivot);
    corrected.extend_from_slice(&path[end..]);
    corrected.dedup();

    if compute_complexity(&corrected).turns > compute_complexity(path).turns {
        return None;
    }
    Some(corrected)
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn cells(points: &[(i32, i32)]) -> Vec<Cell> {
        points.iter().map(|&(r, c)| Cell::new(r, c)).collect()
    }

    fn region(top: i32, left: i32, bottom: i32, right: i32) -> Region {
        Region::new(Cell::new(top, left), Cell::new(bottom, right)).unwrap()
    }

    /// Right, down, right with the vertical run at column 8.
    fn z_path() -> Vec<Cell> {
        cells(&[(0, 0), (0, 4), (0, 8), (6, 8), (6, 12)])
    }

    fn z_endpoints() -> Vec<Cell> {
        cells(&[(0, 0), (6, 12)])
    }

    #[test]
    fn vertical_run_moves_to_center_column() {
        let corrected = correct(&z_path(), 100, 4, &[], &z_endpoints());
        assert_eq!(corrected, cells(&[(0, 0), (0, 4), (6, 4), (6, 8), (6, 12)]));
    }

    #[test]
    fn obstacle_in_sweep_blocks_correction() {
        let corrected = correct(&z_path(), 100, 4, &[region(2, 5, 4, 7)], &z_endpoints());
        assert_eq!(corrected, z_path());
    }

    #[test]
    fn touching_obstacle_is_allowed() {
        let corrected = correct(&z_path(), 100, 4, &[region(0, 0, 6, 4)], &z_endpoints());
        assert_eq!(corrected, cells(&[(0, 0), (0, 4), (6, 4), (6, 8), (6, 12)]));
    }

    #[test]
    fn endpoint_on_center_line_blocks_correction() {
        let corrected = correct(&z_path(), 100, 0, &[], &z_endpoints());
        assert_eq!(corrected, z_path());
    }

    #[test]
    fn endpoint_inside_sweep_blocks_correction() {
        let mut endpoints = z_endpoints();
        endpoints.push(Cell::new(3, 6));
        let corrected = correct(&z_path(), 100, 4, &[], &endpoints);
        assert_eq!(corrected, z_path());
    }

    #[test]
    fn path_already_turning_on_center_is_unchanged() {
        let corrected = correct(&z_path(), 100, 8, &[], &z_endpoints());
        assert_eq!(corrected, z_path());
    }

    #[test]
    fn center_touched_only_at_the_end_is_unchanged() {
        let path = cells(&[(0, 0), (0, 4), (5, 4), (5, 9)]);
        let endpoints = cells(&[(0, 0), (5, 9)]);
        assert_eq!(correct(&path, 100, 9, &[], &endpoints), path);
    }

    #[test]
    fn reversal_after_run_is_not_spliced() {
        // Down onto row 7, left, up, right, down: the run after the turn is not a
        // single straight segment back into the hit direction.
        let path = cells(&[
            (5, 4),
            (7, 4),
            (7, 0),
            (5, 0),
            (0, 0),
            (0, 4),
            (0, 5),
            (5, 5),
            (7, 5),
        ]);
        let endpoints = cells(&[(5, 4), (7, 5)]);
        assert_eq!(correct(&path, 7, 4, &[], &endpoints), path);
    }

    #[test]
    fn horizontal_run_moves_to_center_row() {
        // Down, right, down with the horizontal run at row 8.
        let path = cells(&[(0, 0), (3, 0), (8, 0), (8, 10), (12, 10)]);
        let endpoints = cells(&[(0, 0), (12, 10)]);
        let corrected = correct(&path, 3, 100, &[], &endpoints);
        assert_eq!(corrected, cells(&[(0, 0), (3, 0), (3, 10), (8, 10), (12, 10)]));
    }

    #[test]
    fn short_paths_are_unchanged() {
        let path = cells(&[(0, 0), (0, 5)]);
        assert_eq!(correct(&path, 0, 2, &[], &path), path);
    }
}
