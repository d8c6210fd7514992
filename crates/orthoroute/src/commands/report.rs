//! Text and JSON renderings of routed connectors.

use colored::Colorize;
use serde::Serialize;

use orthoroute::{Cell, Direction, EventKind, Route, RouteComplexity, path_to_string};

/// JSON shape of one routed connector.
#[derive(Debug, Serialize)]
pub struct RouteReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    pub path: &'a [Cell],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<&'a [Cell]>,
    pub start_direction: Direction,
    pub end_direction: Direction,
    pub center_row: i32,
    pub center_col: i32,
    pub complexity: RouteComplexity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventReport>>,
}

impl<'a> RouteReport<'a> {
    pub fn new(route: &'a Route, name: Option<&'a str>, raw: bool, events: bool) -> Self {
        Self {
            name,
            path: &route.path,
            raw: raw.then_some(route.raw.as_slice()),
            start_direction: route.start_direction,
            end_direction: route.end_direction,
            center_row: route.center_row,
            center_col: route.center_col,
            complexity: route.complexity(),
            events: events.then(|| route.events().map(|e| EventReport::new(e.cell, e.kind)).collect()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventReport {
    pub cell: Cell,
    pub kind: &'static str,
    pub direction: Direction,
    /// Outgoing direction, bends only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Direction>,
}

impl EventReport {
    fn new(cell: Cell, kind: EventKind) -> Self {
        let (kind, direction, to) = match kind {
            EventKind::Start(d) => ("start", d, None),
            EventKind::End(d) => ("end", d, None),
            EventKind::Line(d) => ("line", d, None),
            EventKind::Bend { from, to } => ("bend", from, Some(to)),
        };
        Self {
            cell,
            kind,
            direction,
            to,
        }
    }
}

/// One-line description of an event for text output.
fn describe(kind: EventKind) -> String {
    match kind {
        EventKind::Start(d) => format!("{} {d}", "start".green()),
        EventKind::End(d) => format!("{} {d}", "end".green()),
        EventKind::Line(d) => format!("line {d}"),
        EventKind::Bend { from, to } => format!("{} {from} -> {to}", "bend".cyan()),
    }
}

pub fn print_route(route: &Route, raw: bool, events: bool) {
    let complexity = route.complexity();
    println!("{}  {}", "path".bold(), path_to_string(&route.path));
    if raw {
        println!("{}   {}", "raw".bold(), path_to_string(&route.raw).dimmed());
    }
    println!(
        "{}  {} -> {}",
        "dirs".bold(),
        route.start_direction,
        route.end_direction
    );
    println!(
        "{}  row {}, col {}",
        "mid ".bold(),
        route.center_row,
        route.center_col
    );
    println!(
        "{}  length {}, {} turn(s)",
        "size".bold(),
        complexity.length,
        complexity.turns
    );

    if events {
        println!();
        for event in route.events() {
            println!("  {:<10} {}", event.cell.to_string(), describe(event.kind));
        }
    }
}
