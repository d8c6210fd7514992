use super::types::{Cell, Direction, RouteComplexity};

/// Serialize a path to the compact text form.
///
/// Format: `(4,4)-(4,6)-(17,6)`, each vertex as `(row,col)`.
pub fn path_to_string(path: &[Cell]) -> String {
    path.iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

/// Parse a path from the compact text form.
///
/// Returns `None` if the string is malformed or empty.
pub fn string_to_path(s: &str) -> Option<Vec<Cell>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let mut path = Vec::new();
    let mut rest = s;
    while !rest.is_empty() {
        // Separators only between vertices; a leading '-' belongs to a negative number.
        if !path.is_empty() {
            rest = rest.strip_prefix('-')?;
        }
        let rest_after_open = rest.strip_prefix('(')?;
        let close = rest_after_open.find(')')?;
        let cell: Cell = rest_after_open[..close].parse().ok()?;
        path.push(cell);
        rest = &rest_after_open[close + 1..];
    }

    Some(path)
}

/// Length and turn count of a path. Zero-length segments are ignored.
pub fn compute_complexity(path: &[Cell]) -> RouteComplexity {
    let mut length = 0;
    let mut turns = 0;
    let mut last_dir: Option<Direction> = None;

    for pair in path.windows(2) {
        length += pair[0].manhattan_to(pair[1]);
        let Some(dir) = Direction::between(pair[0], pair[1]) else {
            continue;
        };
        if last_dir.is_some_and(|prev| prev.is_turn(dir)) {
            turns += 1;
        }
        last_dir = Some(dir);
    }

    RouteComplexity { length, turns }
}
