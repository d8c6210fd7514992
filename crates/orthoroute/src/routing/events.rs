//! Translation of a routed path into per-cell drawing events.
//!
//! A renderer walks the events and picks a glyph for each cell: terminators for the
//! two endpoints, straight strokes for runs and corners for bends.

use super::types::{Cell, Direction};

/// What to draw at a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The start cell, with the start's approach direction.
    Start(Direction),
    /// The end cell, with the end's approach direction.
    End(Direction),
    /// A straight stroke travelling in the given direction.
    Line(Direction),
    /// A corner where travel turns from one direction to another.
    Bend { from: Direction, to: Direction },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathEvent {
    pub cell: Cell,
    pub kind: EventKind,
}

/// Lazy iterator over the events of a path, one per covered cell.
///
/// The path must be orthogonal: consecutive vertices share a row or a column.
/// Repeated vertices are skipped.
#[derive(Debug, Clone)]
pub struct PathEvents<'a> {
    path: &'a [Cell],
    start: Direction,
    end: Direction,
    /// Index of the vertex the current segment leaves from.
    segment: usize,
    /// Cells already emitted on the current segment.
    offset: i32,
    started: bool,
}

impl<'a> PathEvents<'a> {
    pub fn new(path: &'a [Cell], start: Direction, end: Direction) -> Self {
        Self {
            path,
            start,
            end,
            segment: 0,
            offset: 0,
            started: false,
        }
    }

    /// Direction of the first non-empty segment leaving vertex `from`.
    fn next_direction(&self, from: usize) -> Option<Direction> {
        self.path[from..]
            .windows(2)
            .find_map(|w| Direction::between(w[0], w[1]))
    }

    /// Whether every vertex after `index` repeats it.
    fn is_last_vertex(&self, index: usize) -> bool {
        self.path[index + 1..].iter().all(|&c| c == self.path[index])
    }
}

impl Iterator for PathEvents<'_> {
    type Item = PathEvent;

    fn next(&mut self) -> Option<PathEvent> {
        if !self.started {
            self.started = true;
            let cell = *self.path.first()?;
            return Some(PathEvent {
                cell,
                kind: EventKind::Start(self.start),
            });
        }

        loop {
            let from = *self.path.get(self.segment)?;
            let to = *self.path.get(self.segment + 1)?;
            let Some(dir) = Direction::between(from, to) else {
                debug_assert!(from == to, "diagonal segment {from} -> {to}");
                self.segment += 1;
                self.offset = 0;
                continue;
            };

            self.offset += 1;
            let len = from.manhattan_to(to);
            if self.offset < len {
                return Some(PathEvent {
                    cell: from.offset(dir, self.offset),
                    kind: EventKind::Line(dir),
                });
            }

            self.segment += 1;
            self.offset = 0;
            let kind = if self.is_last_vertex(self.segment) {
                self.segment = self.path.len();
                EventKind::End(self.end)
            } else {
                match self.next_direction(self.segment) {
                    Some(next) if next != dir => EventKind::Bend { from: dir, to: next },
                    _ => EventKind::Line(dir),
                }
            };
            return Some(PathEvent { cell: to, kind });
        }
    }
}

/// Callback form of [`PathEvents`]: `f` is called once per cell, in path order.
pub fn for_each_event(
    path: &[Cell],
    start: Direction,
    end: Direction,
    mut f: impl FnMut(Cell, EventKind),
) {
    for event in PathEvents::new(path, start, end) {
        f(event.cell, event.kind);
    }
}
