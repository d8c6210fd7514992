use anyhow::Result;
use tracing::debug;

use super::report::{self, RouteReport};
use crate::cli::{Format, RouteArgs};
use orthoroute::config::Config;
use orthoroute::{Endpoint, RouteRequest};

/// Run the route command.
pub fn run(args: RouteArgs) -> Result<()> {
    let config = args.engine.apply(Config::load_or_default().routing_config())?;
    debug!(?config, "routing config");

    let start = Endpoint {
        cell: args.from,
        region: args.from_region,
        direction: args.from_dir,
    };
    let end = Endpoint {
        cell: args.to,
        region: args.to_region,
        direction: args.to_dir,
    };

    let route = orthoroute::route(&RouteRequest::new(start, end), &config)?;
    if route.is_empty() {
        anyhow::bail!("No path found from {} to {}", start.cell, end.cell);
    }

    match args.format {
        Format::Text => report::print_route(&route, args.raw, args.events),
        Format::Json => {
            let report = RouteReport::new(&route, None, args.raw, args.events);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
